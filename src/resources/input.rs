//! Per-frame keyboard input resource.
//!
//! Captures the subset of keyboard state the game cares about and exposes it
//! to systems via the [`InputState`] resource. WASD and the arrow keys both
//! steer the keyboard hand cursor.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }

    /// Store this frame's raw key state.
    pub fn set(&mut self, down: bool, pressed: bool, released: bool) {
        self.active = down;
        self.just_pressed = pressed;
        self.just_released = released;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub maindirection_up: BoolState,
    pub maindirection_left: BoolState,
    pub maindirection_down: BoolState,
    pub maindirection_right: BoolState,
    // Arrow keys
    pub secondarydirection_up: BoolState,
    pub secondarydirection_down: BoolState,
    pub secondarydirection_left: BoolState,
    pub secondarydirection_right: BoolState,
    // Action special keys
    pub action_back: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_up: BoolState::bound_to(KeyboardKey::KEY_W),
            maindirection_left: BoolState::bound_to(KeyboardKey::KEY_A),
            maindirection_down: BoolState::bound_to(KeyboardKey::KEY_S),
            maindirection_right: BoolState::bound_to(KeyboardKey::KEY_D),
            secondarydirection_up: BoolState::bound_to(KeyboardKey::KEY_UP),
            secondarydirection_down: BoolState::bound_to(KeyboardKey::KEY_DOWN),
            secondarydirection_left: BoolState::bound_to(KeyboardKey::KEY_LEFT),
            secondarydirection_right: BoolState::bound_to(KeyboardKey::KEY_RIGHT),
            action_back: BoolState::bound_to(KeyboardKey::KEY_ESCAPE),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
        }
    }
}

impl InputState {
    /// Mutable access to every binding, for polling in one pass.
    pub fn bindings_mut(&mut self) -> [&mut BoolState; 10] {
        [
            &mut self.maindirection_up,
            &mut self.maindirection_left,
            &mut self.maindirection_down,
            &mut self.maindirection_right,
            &mut self.secondarydirection_up,
            &mut self.secondarydirection_down,
            &mut self.secondarydirection_left,
            &mut self.secondarydirection_right,
            &mut self.action_back,
            &mut self.mode_debug,
        ]
    }

    /// Unit-less steering direction from WASD or the arrow keys.
    ///
    /// Each axis is -1, 0 or 1; opposite keys cancel out.
    pub fn cursor_direction(&self) -> Vector2 {
        let up = self.maindirection_up.active || self.secondarydirection_up.active;
        let down = self.maindirection_down.active || self.secondarydirection_down.active;
        let left = self.maindirection_left.active || self.secondarydirection_left.active;
        let right = self.maindirection_right.active || self.secondarydirection_right.active;
        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        Vector2::new(axis(left, right), axis(up, down))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, KeyboardKey::KEY_NULL);
    }

    #[test]
    fn test_inputstate_default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.maindirection_up.key_binding, KeyboardKey::KEY_W);
        assert_eq!(input.maindirection_left.key_binding, KeyboardKey::KEY_A);
        assert_eq!(input.maindirection_down.key_binding, KeyboardKey::KEY_S);
        assert_eq!(input.maindirection_right.key_binding, KeyboardKey::KEY_D);
        assert_eq!(
            input.secondarydirection_up.key_binding,
            KeyboardKey::KEY_UP
        );
        assert_eq!(
            input.secondarydirection_right.key_binding,
            KeyboardKey::KEY_RIGHT
        );
        assert_eq!(input.action_back.key_binding, KeyboardKey::KEY_ESCAPE);
        assert_eq!(input.mode_debug.key_binding, KeyboardKey::KEY_F11);
    }

    #[test]
    fn test_cursor_direction() {
        let mut input = InputState::default();
        assert_eq!(input.cursor_direction(), Vector2::new(0.0, 0.0));

        input.maindirection_right.active = true;
        input.secondarydirection_up.active = true;
        assert_eq!(input.cursor_direction(), Vector2::new(1.0, -1.0));

        input.maindirection_left.active = true;
        assert_eq!(input.cursor_direction(), Vector2::new(0.0, -1.0));
    }

    #[test]
    fn test_set_tracks_edges() {
        let mut input = InputState::default();
        input.mode_debug.set(true, true, false);
        assert!(input.mode_debug.active);
        assert!(input.mode_debug.just_pressed);
        input.mode_debug.set(false, false, true);
        assert!(!input.mode_debug.active);
        assert!(input.mode_debug.just_released);
    }
}
