//! Animated, moving, collidable game object.
//!
//! A [`GameObject`] owns one [`AnimatedSprite`], integrates a very small
//! per-tick physics model (`velocity.y += gravity; position += velocity`)
//! and keeps its [`BoundingBox`] in sync with its position and sprite size.
//!
//! Liveness is tracked by the `alive` flag only. Killing an object also parks
//! it off-screen at `(-width, -height)` so nothing is drawn where it died, but
//! no code should infer liveness from the position.
//!
//! The component form is used for free-standing objects driven by
//! [`game_object_system`](crate::systems::gameobject::game_object_system).
//! Objects owned by an [`ObjectSpawner`](crate::components::spawner::ObjectSpawner)
//! or by the round live inside those owners instead.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

use crate::components::animatedsprite::{AnimatedSprite, AnimationStatus};
use crate::components::boundingbox::BoundingBox;

#[derive(Component, Debug, Clone)]
pub struct GameObject {
    pub sprite: AnimatedSprite,
    pub position: Vector2,
    pub velocity: Vector2,
    /// Added to `velocity.y` every tick.
    pub gravity: f32,
    bounding_box: BoundingBox,
    alive: bool,
    /// Kill the object when its sprite completes a cycle.
    pub destroy_on_animation_end: bool,
    /// Marks the correct answer of a round.
    pub is_solution_object: bool,
}

impl GameObject {
    /// Create a live object with its own copy of `sprite` at `position`.
    pub fn new(sprite: &AnimatedSprite, position: Vector2) -> Self {
        Self::with_velocity(sprite, position, Vector2::zero())
    }

    pub fn with_velocity(sprite: &AnimatedSprite, position: Vector2, velocity: Vector2) -> Self {
        let sprite = sprite.instantiate();
        let bounding_box = BoundingBox::at(position, sprite.scaled_size());
        Self {
            sprite,
            position,
            velocity,
            gravity: 0.0,
            bounding_box,
            alive: true,
            destroy_on_animation_end: false,
            is_solution_object: false,
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Advance animation and physics by one tick. Does nothing when dead.
    pub fn update(&mut self) {
        if !self.step() {
            return;
        }
        self.refresh_bounding_box();
    }

    /// Like [`GameObject::update`], then pushes the object back so that its
    /// whole bounding box stays inside `viewport`.
    pub fn update_clamped(&mut self, viewport: &BoundingBox) {
        if !self.step() {
            return;
        }
        let size = self.sprite.scaled_size();
        let (min, max) = viewport.min_max();
        if self.position.x < min.x {
            self.position.x = min.x;
        }
        if self.position.y < min.y {
            self.position.y = min.y;
        }
        if self.position.x + size.x > max.x {
            self.position.x = max.x - size.x;
        }
        if self.position.y + size.y > max.y {
            self.position.y = max.y - size.y;
        }
        self.refresh_bounding_box();
    }

    /// Sprite + physics. Returns false when the object is (or just became) dead.
    fn step(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        let status = self.sprite.advance();
        if status == AnimationStatus::JustCompleted && self.destroy_on_animation_end {
            self.kill();
            return false;
        }
        self.velocity.y += self.gravity;
        self.position += self.velocity;
        true
    }

    fn refresh_bounding_box(&mut self) {
        self.bounding_box = BoundingBox::at(self.position, self.sprite.scaled_size());
    }

    /// True when this object is alive and its box intersects `other`.
    pub fn collides_with_box(&self, other: &BoundingBox) -> bool {
        self.alive && self.bounding_box.intersects(other)
    }

    /// True when both objects are alive and their boxes intersect.
    pub fn collides_with(&self, other: &GameObject) -> bool {
        self.alive && other.alive && self.bounding_box.intersects(&other.bounding_box)
    }

    /// Mark dead and park the object just outside the top-left corner.
    pub fn kill(&mut self) {
        let size = self.sprite.scaled_size();
        self.position = Vector2::new(-size.x, -size.y);
        self.alive = false;
        self.refresh_bounding_box();
    }

    /// Bring the object back. Its position is left where it is.
    pub fn revive(&mut self) {
        self.alive = true;
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
        self.refresh_bounding_box();
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }
}

/// Marker for free-standing objects that must stay fully inside the screen.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct KeepOnScreen;
