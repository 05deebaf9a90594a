//! Hand tracking systems.
//!
//! The mouse stands in for the left hand and, when enabled in the config, a
//! WASD / arrow-key cursor for the right one. Both are published in
//! [`TrackedHands`] before the round system runs. [`hand_marker_system`] then
//! moves the on-screen markers onto them.
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::gameobject::GameObject;
use crate::components::handmarker::HandMarker;
use crate::resources::gameconfig::GameConfig;
use crate::resources::hands::{Hand, KeyboardCursor, TrackedHands};
use crate::resources::input::InputState;
use crate::resources::screensize::ScreenSize;

/// Publish the mouse position as the left hand.
pub fn mouse_hand_system(rl: NonSend<raylib::RaylibHandle>, mut hands: ResMut<TrackedHands>) {
    hands.set(Hand::Left, rl.get_mouse_position());
}

/// Steer the keyboard cursor and publish it as the right hand.
pub fn keyboard_hand_system(
    input: Res<InputState>,
    config: Res<GameConfig>,
    screen: Res<ScreenSize>,
    mut cursor: ResMut<KeyboardCursor>,
    mut hands: ResMut<TrackedHands>,
) {
    if !config.keyboard_hand {
        return;
    }
    cursor.steer(input.cursor_direction(), screen.w as f32, screen.h as f32);
    hands.set(Hand::Right, cursor.position);
}

/// Centre every hand marker on its hand; untracked hands hide their marker.
pub fn hand_marker_system(
    hands: Res<TrackedHands>,
    mut markers: Query<(&HandMarker, &mut GameObject)>,
) {
    for (marker, mut object) in markers.iter_mut() {
        match hands.get(marker.hand) {
            Some(position) => {
                let size = object.sprite.scaled_size();
                if !object.is_alive() {
                    object.revive();
                }
                object.set_position(Vector2::new(
                    position.x - size.x / 2.0,
                    position.y - size.y / 2.0,
                ));
            }
            None => {
                if object.is_alive() {
                    object.kill();
                }
            }
        }
    }
}
