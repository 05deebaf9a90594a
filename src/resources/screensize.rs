//! Screen size resource.
//!
//! Stores the current framebuffer dimensions in pixels. Round layout and the
//! spawner culling read it to know where the visible area ends.

use bevy_ecs::prelude::Resource;

use crate::components::boundingbox::BoundingBox;

/// Current screen size in pixels.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    /// The visible area as a box anchored at the origin.
    pub fn viewport(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.w as f32, self.h as f32)
    }
}
