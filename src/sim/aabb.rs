//! Axis-aligned box geometry
//!
//! Screen-style coordinates: `pos` is the top-left corner and y grows
//! downward, so `bottom()` is the larger y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap test; boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Horizontal extents overlap (strict)
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Aabb {
        Aabb {
            pos: self.pos - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let b = Aabb::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(b.left(), 10.0);
        assert_eq!(b.right(), 40.0);
        assert_eq!(b.top(), 20.0);
        assert_eq!(b.bottom(), 60.0);
        assert_eq!(b.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Aabb::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges only
        assert!(!a.overlaps(&Aabb::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Aabb::new(50.0, 50.0, 1.0, 1.0)));
    }

    #[test]
    fn test_expanded() {
        let b = Aabb::new(0.0, 0.0, 10.0, 10.0).expanded(100.0);
        assert_eq!(b, Aabb::new(-100.0, -100.0, 210.0, 210.0));
        assert!(b.overlaps(&Aabb::new(105.0, 0.0, 1.0, 1.0)));
    }
}
