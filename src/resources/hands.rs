//! Tracked hand positions for the current tick.
//!
//! The hand-tracking collaborator (mouse and keyboard cursor on desktop)
//! rewrites [`TrackedHands`] at the start of every tick. Gameplay systems treat
//! it as an opaque list of screen-space points and never care where they came
//! from.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedHand {
    pub hand: Hand,
    /// Screen coordinates in pixels.
    pub position: Vector2,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct TrackedHands {
    pub hands: SmallVec<[TrackedHand; 2]>,
}

impl TrackedHands {
    pub fn clear(&mut self) {
        self.hands.clear();
    }

    /// Record `hand` at `position`, replacing an earlier sample of the same hand.
    pub fn set(&mut self, hand: Hand, position: Vector2) {
        match self.hands.iter_mut().find(|h| h.hand == hand) {
            Some(existing) => existing.position = position,
            None => self.hands.push(TrackedHand { hand, position }),
        }
    }

    pub fn get(&self, hand: Hand) -> Option<Vector2> {
        self.hands
            .iter()
            .find(|h| h.hand == hand)
            .map(|h| h.position)
    }

    pub fn positions(&self) -> SmallVec<[Vector2; 2]> {
        self.hands.iter().map(|h| h.position).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

/// Keyboard-driven stand-in for the right hand.
#[derive(Resource, Debug, Clone, Copy)]
pub struct KeyboardCursor {
    pub position: Vector2,
    /// Pixels per tick.
    pub speed: f32,
}

impl KeyboardCursor {
    pub const DEFAULT_SPEED: f32 = 6.0;

    pub fn new(position: Vector2) -> Self {
        Self {
            position,
            speed: Self::DEFAULT_SPEED,
        }
    }

    /// Move by `direction * speed` and stay within `[0, width] x [0, height]`.
    pub fn steer(&mut self, direction: Vector2, width: f32, height: f32) {
        self.position.x = (self.position.x + direction.x * self.speed).clamp(0.0, width);
        self.position.y = (self.position.y + direction.y * self.speed).clamp(0.0, height);
    }
}
