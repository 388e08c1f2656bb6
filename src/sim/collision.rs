//! Axis-aligned collision primitives
//!
//! Every overlap test in the game is box against box. The ball takes part
//! through its enclosing square.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in arena coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box of the given size centered on `center`
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        let half = Vec2::new(width, height) / 2.0;
        Self::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    /// Closed-interval overlap: touching edges count as a hit
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right >= other.left
            && self.left <= other.right
            && self.bottom >= other.top
            && self.top <= other.bottom
    }
}

/// Anything that takes part in overlap tests
pub trait HasBounds {
    fn bounds(&self) -> Aabb;

    fn intersects<T: HasBounds + ?Sized>(&self, other: &T) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

impl HasBounds for Aabb {
    fn bounds(&self) -> Aabb {
        *self
    }
}

/// Direction component to negate on a bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Vertical walls
    X,
    /// Ceiling, paddle and bricks
    Y,
}

/// Negate one component of `direction`. Magnitude is unchanged.
#[inline]
pub fn reflect(direction: Vec2, axis: Axis) -> Vec2 {
    match axis {
        Axis::X => Vec2::new(-direction.x, direction.y),
        Axis::Y => Vec2::new(direction.x, -direction.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_disjoint() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(20.0, 0.0, 30.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        let below = Aabb::new(0.0, 10.5, 10.0, 20.0);
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_overlap_touching_edges_counts() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::new(10.0, 0.0, 20.0, 10.0);
        let below = Aabb::new(0.0, 10.0, 10.0, 20.0);
        let corner = Aabb::new(10.0, 10.0, 20.0, 20.0);
        assert!(a.overlaps(&right));
        assert!(a.overlaps(&below));
        assert!(a.overlaps(&corner));
    }

    #[test]
    fn test_overlap_containment() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(40.0, 40.0, 60.0, 60.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_from_center() {
        let b = Aabb::from_center(Vec2::new(250.0, 480.0), 100.0, 10.0);
        assert_eq!(b, Aabb::new(200.0, 475.0, 300.0, 485.0));
    }

    #[test]
    fn test_reflect() {
        let d = Vec2::new(5.0, -5.0);
        assert_eq!(reflect(d, Axis::X), Vec2::new(-5.0, -5.0));
        assert_eq!(reflect(d, Axis::Y), Vec2::new(5.0, 5.0));
        assert_eq!(reflect(d, Axis::Y).length(), d.length());
    }
}
