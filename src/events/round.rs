//! Round events and the celebration observer.
//!
//! The round system triggers a [`RoundSolvedEvent`] whenever a hand touches
//! the correct item. [`round_solved_observer`] answers with a burst of
//! sparkles from the [`CelebrationSpawner`] at the hand position and plays
//! the "correct" sound.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use fastrand::Rng;
use log::debug;
use raylib::prelude::Vector2;

use crate::components::spawner::{CelebrationSpawner, ObjectSpawner};
use crate::events::audio::AudioCmd;

/// Sound id registered by the setup for correct answers.
pub const CORRECT_FX_ID: &str = "correct";

/// Sparkle launch fan in degrees, 0° pointing up.
const SPARKLE_ARC_DEGREES: (f32, f32) = (-75.0, 75.0);
const SPARKLE_SPEED: (f32, f32) = (2.0, 6.0);

/// A hand at `position` solved the round.
#[derive(Event, Debug, Clone, Copy)]
pub struct RoundSolvedEvent {
    pub position: Vector2,
    /// Sparkles to emit.
    pub sparkles: u32,
}

#[inline]
fn random_f32_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    min + rng.f32() * (max - min)
}

/// Velocity for one sparkle: a random angle in the upward fan, random speed.
pub fn sparkle_velocity(rng: &mut Rng) -> Vector2 {
    let theta = random_f32_range(rng, SPARKLE_ARC_DEGREES.0, SPARKLE_ARC_DEGREES.1).to_radians();
    let speed = random_f32_range(rng, SPARKLE_SPEED.0, SPARKLE_SPEED.1);
    // 0° = up, Y+ is down
    Vector2::new(theta.sin() * speed, -theta.cos() * speed)
}

/// Emit the celebration burst and sound for a solved round.
///
/// Sparkles are centred on the hand. Spawns refused by the spawner's alive
/// cap are dropped silently.
pub fn round_solved_observer(
    trigger: On<RoundSolvedEvent>,
    mut spawners: Query<&mut ObjectSpawner, With<CelebrationSpawner>>,
    mut audio_cmds: MessageWriter<AudioCmd>,
    mut rng: Local<Rng>,
) {
    let event = trigger.event();

    for mut spawner in spawners.iter_mut() {
        let size = spawner.template.scaled_size();
        let origin = Vector2::new(
            event.position.x - size.x / 2.0,
            event.position.y - size.y / 2.0,
        );
        let mut spawned = 0;
        for _ in 0..event.sparkles {
            if spawner.spawn_object_with_velocity(origin, sparkle_velocity(&mut rng)) {
                spawned += 1;
            }
        }
        debug!(
            "celebration: {} of {} sparkles at ({:.0}, {:.0})",
            spawned, event.sparkles, event.position.x, event.position.y
        );
    }

    audio_cmds.write(AudioCmd::PlayFx {
        id: CORRECT_FX_ID.to_string(),
    });
}
