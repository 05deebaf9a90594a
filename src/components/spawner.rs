//! Pool of homogeneous game objects.
//!
//! An [`ObjectSpawner`] clones every new [`GameObject`] from one template
//! sprite, enforces an optional cap on simultaneously alive objects, and
//! periodically drops dead entries from its collection. The periodic cleanup
//! is driven by a one-shot [`FrameTimer`] that the spawner resumes each time
//! it fires.
//!
//! # Usage
//!
//! ```ignore
//! let template = AnimatedSprite::new("sparkle", 8.0, 8.0, 1, 4).with_looping(false);
//! let mut sparkles = ObjectSpawner::new(template)
//!     .with_max_alive(64)
//!     .with_gravity(0.25)
//!     .destroy_on_animation_end(true);
//!
//! sparkles.spawn_object_with_velocity(hand, Vector2::new(1.5, -4.0));
//! sparkles.update_culled(&screen.viewport());
//! ```

use bevy_ecs::prelude::Component;
use log::debug;
use raylib::prelude::Vector2;

use crate::components::animatedsprite::AnimatedSprite;
use crate::components::boundingbox::BoundingBox;
use crate::components::frametimer::{FrameTimer, TimerStatus};
use crate::components::gameobject::GameObject;

/// Ticks between two compactions of the object list.
pub const DEFAULT_CLEANUP_FRAMES: u32 = 30;

#[derive(Component, Debug, Clone)]
pub struct ObjectSpawner {
    objects: Vec<GameObject>,
    pub template: AnimatedSprite,
    /// Minimum ticks between two successful spawns. Zero disables the delay.
    pub spawn_delay_frames: u32,
    frames_since_spawn: u32,
    /// Cap on alive objects. `None` means unbounded.
    pub max_alive: Option<usize>,
    /// Copied onto every spawned object.
    pub destroy_on_animation_end: bool,
    /// Copied onto every spawned object.
    pub gravity: f32,
    cleanup_timer: FrameTimer,
}

impl ObjectSpawner {
    pub fn new(template: AnimatedSprite) -> Self {
        Self {
            objects: Vec::new(),
            template,
            spawn_delay_frames: 0,
            frames_since_spawn: 0,
            max_alive: None,
            destroy_on_animation_end: false,
            gravity: 0.0,
            cleanup_timer: FrameTimer::new(DEFAULT_CLEANUP_FRAMES),
        }
    }

    pub fn with_max_alive(mut self, max_alive: usize) -> Self {
        self.max_alive = Some(max_alive);
        self
    }

    pub fn with_spawn_delay(mut self, frames: u32) -> Self {
        self.spawn_delay_frames = frames;
        self.frames_since_spawn = frames;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_cleanup_frames(mut self, frames: u32) -> Self {
        self.cleanup_timer = FrameTimer::new(frames);
        self
    }

    pub fn destroy_on_animation_end(mut self, destroy: bool) -> Self {
        self.destroy_on_animation_end = destroy;
        self
    }

    /// Spawn a still object at `position`. See [`ObjectSpawner::spawn_object_with_velocity`].
    pub fn spawn_object(&mut self, position: Vector2) -> bool {
        self.spawn_object_with_velocity(position, Vector2::zero())
    }

    /// Append a new object cloned from the template.
    ///
    /// Returns false, without any other effect, when the alive cap is reached
    /// or the spawn delay has not elapsed yet.
    pub fn spawn_object_with_velocity(&mut self, position: Vector2, velocity: Vector2) -> bool {
        if let Some(max_alive) = self.max_alive {
            if self.alive_count() >= max_alive {
                return false;
            }
        }
        if self.frames_since_spawn < self.spawn_delay_frames {
            return false;
        }

        let mut object = GameObject::with_velocity(&self.template, position, velocity)
            .with_gravity(self.gravity);
        object.destroy_on_animation_end = self.destroy_on_animation_end;
        self.objects.push(object);
        self.frames_since_spawn = 0;
        true
    }

    /// Advance every object one tick, then the cleanup timer.
    pub fn update(&mut self) {
        for object in self.objects.iter_mut() {
            object.update();
        }
        self.tick_timers();
    }

    /// Like [`ObjectSpawner::update`], but also kills objects that left `viewport`.
    pub fn update_culled(&mut self, viewport: &BoundingBox) {
        for object in self.objects.iter_mut() {
            object.update();
            if object.is_alive() && !object.bounding_box().intersects(viewport) {
                object.kill();
            }
        }
        self.tick_timers();
    }

    fn tick_timers(&mut self) {
        if self.frames_since_spawn < self.spawn_delay_frames {
            self.frames_since_spawn += 1;
        }
        if self.cleanup_timer.advance() == TimerStatus::JustCompleted {
            self.compact();
            self.cleanup_timer.resume();
        }
    }

    /// Drop every dead object, keeping survivors in their original order.
    pub fn compact(&mut self) {
        let before = self.objects.len();
        self.objects.retain(GameObject::is_alive);
        let removed = before - self.objects.len();
        if removed > 0 {
            debug!(
                "spawner '{}' compacted {} dead objects, {} left",
                self.template.tex_key,
                removed,
                self.objects.len()
            );
        }
    }

    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [GameObject] {
        &mut self.objects
    }

    pub fn alive_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_alive()).count()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Marker for the spawner that plays the "correct answer" burst.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CelebrationSpawner;
