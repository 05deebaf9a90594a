//! Frame-stepped spritesheet animation.
//!
//! An [`AnimatedSprite`] walks a `rows x columns` spritesheet left-to-right,
//! top-to-bottom. It is advanced once per tick by its owner
//! ([`GameObject`](crate::components::gameobject::GameObject)) and reports the
//! end of a cycle through the returned [`AnimationStatus`] instead of a
//! callback, so the owner decides what to do (loop on, kill itself, ...).
//!
//! # Playback speed
//!
//! `playback_speed` is a fraction of a frame per tick in `[0, 1]`. A phase
//! accumulator collects it and each whole unit moves one frame forward, the
//! remainder is carried into the next tick. A speed of `1.0` moves one frame
//! per tick, `0.25` one frame every four ticks, `0.0` freezes the animation.

use raylib::prelude::{Rectangle, Vector2};

/// Result of a single [`AnimatedSprite::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Still playing (or paused).
    Running,
    /// The last frame was passed on this tick.
    JustCompleted,
    /// A non-looping animation that already completed. Frame stays on the last one.
    Finished,
}

#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    /// Texture key in [`TextureStore`](crate::resources::texturestore::TextureStore).
    pub tex_key: String,
    /// Size of one frame in pixels.
    pub frame_width: f32,
    pub frame_height: f32,
    pub rows: usize,
    pub columns: usize,
    total_frames: usize,
    frame_index: usize,
    pub playback_speed: f32,
    pub looping: bool,
    paused: bool,
    phase: f32,
    finished: bool,
    pub scale: Vector2,
}

impl AnimatedSprite {
    /// Create a sprite whose frames are `frame_width x frame_height` pixels.
    ///
    /// Starts on frame 0, looping, at one frame per tick.
    pub fn new(
        tex_key: impl Into<String>,
        frame_width: f32,
        frame_height: f32,
        rows: usize,
        columns: usize,
    ) -> Self {
        debug_assert!(rows > 0 && columns > 0, "spritesheet needs rows and columns");
        Self {
            tex_key: tex_key.into(),
            frame_width,
            frame_height,
            rows,
            columns,
            total_frames: rows * columns,
            frame_index: 0,
            playback_speed: 1.0,
            looping: true,
            paused: false,
            phase: 0.0,
            finished: false,
            scale: Vector2::new(1.0, 1.0),
        }
    }

    /// Create a sprite from the pixel size of a whole spritesheet.
    pub fn from_sheet(
        tex_key: impl Into<String>,
        sheet_width: f32,
        sheet_height: f32,
        rows: usize,
        columns: usize,
    ) -> Self {
        Self::new(
            tex_key,
            sheet_width / columns.max(1) as f32,
            sheet_height / rows.max(1) as f32,
            rows,
            columns,
        )
    }

    /// Single-frame sprite showing a whole image, as used for item pictures.
    pub fn still(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self::new(tex_key, width, height, 1, 1).with_speed(0.0)
    }

    /// Set playback speed, clamped to `[0, 1]`.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.playback_speed = speed.clamp(0.0, 1.0);
        self
    }

    pub fn with_start_frame(mut self, frame: usize) -> Self {
        self.frame_index = frame.min(self.total_frames - 1);
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.scale = Vector2::new(sx, sy);
        self
    }

    /// Copy of this sprite with fresh playback state.
    ///
    /// Used when an owner is built from a shared template so that each
    /// owner animates independently.
    pub fn instantiate(&self) -> Self {
        Self {
            frame_index: 0,
            phase: 0.0,
            finished: false,
            ..self.clone()
        }
    }

    /// Step the animation by one tick.
    pub fn advance(&mut self) -> AnimationStatus {
        if self.paused {
            return AnimationStatus::Running;
        }
        if self.finished {
            return AnimationStatus::Finished;
        }

        self.phase += self.playback_speed;
        if self.phase < 1.0 {
            return AnimationStatus::Running;
        }
        self.phase -= 1.0;
        self.frame_index += 1;

        if self.frame_index < self.total_frames {
            return AnimationStatus::Running;
        }

        if self.looping {
            self.frame_index = 0;
        } else {
            self.frame_index = self.total_frames - 1;
            self.finished = true;
        }
        AnimationStatus::JustCompleted
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    /// Rewind to the first frame and allow a finished animation to play again.
    pub fn restart(&mut self) {
        self.frame_index = 0;
        self.phase = 0.0;
        self.finished = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    /// On-screen size of one frame after scaling.
    pub fn scaled_size(&self) -> Vector2 {
        Vector2::new(
            self.frame_width * self.scale.x,
            self.frame_height * self.scale.y,
        )
    }

    /// Area of the spritesheet holding the current frame.
    pub fn source_rect(&self) -> Rectangle {
        let col = self.frame_index % self.columns;
        let row = self.frame_index / self.columns;
        Rectangle::new(
            col as f32 * self.frame_width,
            row as f32 * self.frame_height,
            self.frame_width,
            self.frame_height,
        )
    }
}
