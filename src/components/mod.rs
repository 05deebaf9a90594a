//! Components and the plain data types the game objects are built from.
//!
//! Submodules overview:
//! - [`animatedsprite`] – sprite sheet playback state
//! - [`boundingbox`] – axis-aligned rectangle used for collisions and culling
//! - [`frametimer`] – one-shot tick counter
//! - [`gameobject`] – animated, moving, collidable object
//! - [`handmarker`] – marker entity following a tracked hand
//! - [`spawner`] – pool of homogeneous game objects

pub mod animatedsprite;
pub mod boundingbox;
pub mod frametimer;
pub mod gameobject;
pub mod handmarker;
pub mod spawner;
