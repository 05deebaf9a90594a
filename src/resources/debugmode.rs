//! Debug toggle resource.
//!
//! The mere presence of this resource indicates that the debug overlay
//! (bounding boxes, hand probes, FPS) should be drawn.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the renderer draws the debug overlay.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DebugMode {}
