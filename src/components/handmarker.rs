//! On-screen marker following one tracked hand.

use bevy_ecs::prelude::Component;

use crate::resources::hands::Hand;

/// Attach to a [`GameObject`](crate::components::gameobject::GameObject)
/// entity to have it follow `hand`. The marker is hidden while the hand is
/// not tracked.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandMarker {
    pub hand: Hand,
}
