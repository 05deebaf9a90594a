//! ECS resources made available to systems.
//!
//! Overview
//! - `audio` – bridge and channels for the background audio thread
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – settings loaded from the INI file
//! - `hands` – tracked hand positions and the keyboard cursor
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `itemcatalog` – item pictures grouped in sets
//! - `round` – the round controller
//! - `screensize` – current framebuffer dimensions in pixels
//! - `texturestore` – loaded textures keyed by string IDs
//! - `worldtime` – simulation time, delta and tick count
pub mod audio;
pub mod debugmode;
pub mod gameconfig;
pub mod hands;
pub mod input;
pub mod itemcatalog;
pub mod round;
pub mod screensize;
pub mod texturestore;
pub mod worldtime;
