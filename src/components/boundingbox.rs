use raylib::prelude::{Rectangle, Vector2};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in screen space.
///
/// `x`/`y` is the top-left corner. Every collision test in the game goes
/// through [`BoundingBox::intersects`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of `size` placed with its top-left corner at `position`.
    pub fn at(position: Vector2, size: Vector2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Square probe of side `size` centred on `center`.
    pub fn centered(center: Vector2, size: f32) -> Self {
        let half = size * 0.5;
        Self::new(center.x - half, center.y - half, size, size)
    }

    /// Returns (min, max) corners.
    /// Handles negative size by normalizing to proper min/max.
    pub fn min_max(&self) -> (Vector2, Vector2) {
        let x1 = self.x + self.width;
        let y1 = self.y + self.height;
        (
            Vector2::new(self.x.min(x1), self.y.min(y1)),
            Vector2::new(self.x.max(x1), self.y.max(y1)),
        )
    }

    pub fn center(&self) -> Vector2 {
        let (min, max) = self.min_max();
        Vector2::new((min.x + max.x) * 0.5, (min.y + max.y) * 0.5)
    }

    /// Strict AABB overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        let (min_a, max_a) = self.min_max();
        let (min_b, max_b) = other.min_max();
        min_a.x < max_b.x && min_b.x < max_a.x && min_a.y < max_b.y && min_b.y < max_a.y
    }

    /// Point containment, edges included.
    pub fn contains_point(&self, point: Vector2) -> bool {
        let (min, max) = self.min_max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    pub fn to_rectangle(&self) -> Rectangle {
        let (min, max) = self.min_max();
        Rectangle::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let right = BoundingBox::new(10.0, 0.0, 10.0, 10.0);
        let below = BoundingBox::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_separated_boxes() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(50.0, 50.0, 5.0, 5.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_contained_box_intersects() {
        let outer = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let inner = BoundingBox::new(40.0, 40.0, 2.0, 2.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_negative_size_is_normalized() {
        let flipped = BoundingBox::new(10.0, 10.0, -10.0, -10.0);
        let (min, max) = flipped.min_max();
        assert_eq!(min, Vector2::new(0.0, 0.0));
        assert_eq!(max, Vector2::new(10.0, 10.0));
        assert!(flipped.intersects(&BoundingBox::new(5.0, 5.0, 1.0, 1.0)));
    }

    #[test]
    fn test_centered_probe() {
        let probe = BoundingBox::centered(Vector2::new(100.0, 50.0), 80.0);
        assert_eq!(probe, BoundingBox::new(60.0, 10.0, 80.0, 80.0));
        assert_eq!(probe.center(), Vector2::new(100.0, 50.0));
    }

    #[test]
    fn test_contains_point_includes_edges() {
        let b = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains_point(Vector2::new(0.0, 0.0)));
        assert!(b.contains_point(Vector2::new(10.0, 10.0)));
        assert!(!b.contains_point(Vector2::new(10.5, 5.0)));
    }
}
