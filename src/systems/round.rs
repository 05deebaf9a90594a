//! Round system.
//!
//! Ticks the [`RoundState`] with the hands published this frame and triggers
//! a [`RoundSolvedEvent`] when a hand touched the correct item. Must run after
//! the hand systems.
use bevy_ecs::prelude::*;
use log::error;

use crate::events::round::RoundSolvedEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::hands::TrackedHands;
use crate::resources::itemcatalog::ItemCatalog;
use crate::resources::round::{RoundOutcome, RoundState};

pub fn round_system(
    hands: Res<TrackedHands>,
    catalog: Res<ItemCatalog>,
    config: Res<GameConfig>,
    mut round: ResMut<RoundState>,
    mut commands: Commands,
) {
    let positions = hands.positions();
    match round.tick(&positions, &catalog) {
        Ok(RoundOutcome::Solved { position }) => {
            commands.trigger(RoundSolvedEvent {
                position,
                sparkles: config.sparkle_count,
            });
        }
        Ok(RoundOutcome::Miss | RoundOutcome::Idle) => {}
        Err(e) => error!("Failed to start the next round: {}", e),
    }
}
