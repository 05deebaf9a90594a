//! Event types and observers.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`round`] – round solved notification and the celebration observer
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod audio;
pub mod round;
pub mod switchdebug;
