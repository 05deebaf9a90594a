//! Game systems.
//!
//! Submodules overview
//! - [`audio`] – bridge with the audio thread (forward commands, poll replies)
//! - [`gameobject`] – advance free-standing game objects
//! - [`hands`] – publish mouse and keyboard hands, move hand markers
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`render`] – draw the round, effects, hands and the debug overlay
//! - [`round`] – tick the round controller and announce solved rounds
//! - [`spawner`] – advance and cull spawner pools
//! - [`time`] – update simulation time and tick count

pub mod audio;
pub mod gameobject;
pub mod hands;
pub mod input;
pub mod render;
pub mod round;
pub mod spawner;
pub mod time;
