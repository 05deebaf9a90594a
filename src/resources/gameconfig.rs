//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 640
//! height = 480
//! target_fps = 60
//! fullscreen = false
//!
//! [round]
//! probe_size = 80
//! slot_spacing = 5
//! sets_dir = ./assets/sets
//! manifest = sets.json
//! keyboard_hand = true
//!
//! [effects]
//! sparkle_count = 24
//! sparkle_max = 256
//! sparkle_gravity = 0.25
//! cleanup_frames = 30
//!
//! [audio]
//! correct_fx = ./assets/audio/correct.wav
//! music = ./assets/audio/background.ogg
//! ```
//!
//! `music = none` disables background music. The manifest path is
//! relative to `sets_dir`; when the file does not exist every sub-folder of
//! `sets_dir` is used.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::spawner::DEFAULT_CLEANUP_FRAMES;
use crate::resources::round::{DEFAULT_PROBE_SIZE, DEFAULT_SLOT_SPACING};

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 640;
const DEFAULT_WINDOW_HEIGHT: u32 = 480;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_SETS_DIR: &str = "./assets/sets";
const DEFAULT_MANIFEST: &str = "sets.json";
const DEFAULT_KEYBOARD_HAND: bool = true;
const DEFAULT_SPARKLE_COUNT: u32 = 24;
const DEFAULT_SPARKLE_MAX: u32 = 256;
const DEFAULT_SPARKLE_GRAVITY: f32 = 0.25;
const DEFAULT_CORRECT_FX: &str = "./assets/audio/correct.wav";
const DEFAULT_MUSIC: &str = "./assets/audio/background.ogg";
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels. Also the width rounds are laid out on.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second. Game logic advances once per frame.
    pub target_fps: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Side of the square hand probe in pixels.
    pub probe_size: f32,
    /// Gap above the top-left slot.
    pub slot_spacing: f32,
    /// Folder holding one sub-folder per item set.
    pub sets_dir: PathBuf,
    /// Optional set list, relative to `sets_dir`.
    pub manifest: PathBuf,
    /// Drive a second hand with WASD / arrow keys.
    pub keyboard_hand: bool,
    /// Sparkles emitted per correct answer.
    pub sparkle_count: u32,
    /// Cap on alive sparkles.
    pub sparkle_max: u32,
    pub sparkle_gravity: f32,
    /// Ticks between compactions of dead sparkles.
    pub cleanup_frames: u32,
    /// Sound played on a correct answer.
    pub correct_fx: PathBuf,
    /// Looping background music. `None` disables it.
    pub music: Option<PathBuf>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a float key. Unparsable values are reported and ignored.
fn get_float(config: &Ini, section: &str, key: &str) -> Option<f32> {
    match config.getfloat(section, key) {
        Ok(value) => value.map(|v| v as f32),
        Err(e) => {
            warn!("Ignoring [{}] {}: {}", section, key, e);
            None
        }
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            fullscreen: DEFAULT_FULLSCREEN,
            probe_size: DEFAULT_PROBE_SIZE,
            slot_spacing: DEFAULT_SLOT_SPACING,
            sets_dir: PathBuf::from(DEFAULT_SETS_DIR),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            keyboard_hand: DEFAULT_KEYBOARD_HAND,
            sparkle_count: DEFAULT_SPARKLE_COUNT,
            sparkle_max: DEFAULT_SPARKLE_MAX,
            sparkle_gravity: DEFAULT_SPARKLE_GRAVITY,
            cleanup_frames: DEFAULT_CLEANUP_FRAMES,
            correct_fx: PathBuf::from(DEFAULT_CORRECT_FX),
            music: Some(PathBuf::from(DEFAULT_MUSIC)),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, fullscreen={}, sets_dir={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.fullscreen,
            self.sets_dir.display()
        );

        Ok(())
    }

    /// Load configuration from INI text. Same rules as [`GameConfig::load_from_file`].
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [round] section
        if let Some(size) = get_float(config, "round", "probe_size") {
            self.probe_size = size;
        }
        if let Some(spacing) = get_float(config, "round", "slot_spacing") {
            self.slot_spacing = spacing;
        }
        if let Some(dir) = config.get("round", "sets_dir") {
            self.sets_dir = PathBuf::from(dir);
        }
        if let Some(manifest) = config.get("round", "manifest") {
            self.manifest = PathBuf::from(manifest);
        }
        if let Some(keyboard) = config.getbool("round", "keyboard_hand").ok().flatten() {
            self.keyboard_hand = keyboard;
        }

        // [effects] section
        if let Some(count) = config.getuint("effects", "sparkle_count").ok().flatten() {
            self.sparkle_count = count as u32;
        }
        if let Some(max) = config.getuint("effects", "sparkle_max").ok().flatten() {
            self.sparkle_max = max as u32;
        }
        if let Some(gravity) = get_float(config, "effects", "sparkle_gravity") {
            self.sparkle_gravity = gravity;
        }
        if let Some(frames) = config.getuint("effects", "cleanup_frames").ok().flatten() {
            self.cleanup_frames = frames as u32;
        }

        // [audio] section
        if let Some(fx) = config.get("audio", "correct_fx") {
            self.correct_fx = PathBuf::from(fx);
        }
        if let Some(music) = config.get("audio", "music") {
            let music = music.trim();
            let disabled = music.is_empty() || music.eq_ignore_ascii_case("none");
            self.music = (!disabled).then(|| PathBuf::from(music));
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));

        // [round] section
        config.set("round", "probe_size", Some(self.probe_size.to_string()));
        config.set("round", "slot_spacing", Some(self.slot_spacing.to_string()));
        config.set("round", "sets_dir", Some(self.sets_dir.display().to_string()));
        config.set("round", "manifest", Some(self.manifest.display().to_string()));
        config.set("round", "keyboard_hand", Some(self.keyboard_hand.to_string()));

        // [effects] section
        config.set("effects", "sparkle_count", Some(self.sparkle_count.to_string()));
        config.set("effects", "sparkle_max", Some(self.sparkle_max.to_string()));
        config.set(
            "effects",
            "sparkle_gravity",
            Some(self.sparkle_gravity.to_string()),
        );
        config.set("effects", "cleanup_frames", Some(self.cleanup_frames.to_string()));

        // [audio] section
        config.set("audio", "correct_fx", Some(self.correct_fx.display().to_string()));
        let music = self
            .music
            .as_ref()
            .map(|m| m.display().to_string())
            .unwrap_or_else(|| "none".to_string());
        config.set("audio", "music", Some(music));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Manifest location resolved against the sets folder.
    pub fn manifest_path(&self) -> PathBuf {
        self.sets_dir.join(&self.manifest)
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (640, 480));
        assert!(approx_eq(config.probe_size, 80.0));
        assert_eq!(config.cleanup_frames, DEFAULT_CLEANUP_FRAMES);
        assert_eq!(config.manifest_path(), PathBuf::from("./assets/sets/sets.json"));
        assert!(config.music.is_some());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[window]\nwidth = 1280\n\n[round]\nprobe_size = 64.5\nkeyboard_hand = false\n\n[audio]\nmusic = none\n",
            )
            .unwrap();
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.window_height, 480);
        assert!(approx_eq(config.probe_size, 64.5));
        assert!(!config.keyboard_hand);
        assert!(config.music.is_none());
        assert_eq!(config.sparkle_count, DEFAULT_SPARKLE_COUNT);
    }

    #[test]
    fn test_bad_number_is_ignored() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[effects]\nsparkle_gravity = lots\nsparkle_count = 3\n")
            .unwrap();
        assert!(approx_eq(config.sparkle_gravity, DEFAULT_SPARKLE_GRAVITY));
        assert_eq!(config.sparkle_count, 3);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "astarlearner-config-{}-{}.ini",
            std::process::id(),
            fastrand::u64(..)
        ));
        let mut original = GameConfig::with_path(&path);
        original.window_width = 800;
        original.sparkle_max = 12;
        original.music = None;
        original.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.window_width, 800);
        assert_eq!(loaded.sparkle_max, 12);
        assert!(loaded.music.is_none());
        assert_eq!(loaded.sets_dir, original.sets_dir);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/definitely/not/here.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.window_width, DEFAULT_WINDOW_WIDTH);
    }
}
