//! Collision detection for rotated rectangles
//!
//! Every fruit and bomb is hit-tested as an oriented box. Queries are
//! de-rotated into the box's local frame, where the box is axis-aligned and
//! the classic Cohen-Sutherland outcodes give a cheap accept/reject before
//! falling back to per-edge segment tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Segment2, rotate_about};

/// Outcode bits for a point relative to an axis-aligned box
const INSIDE: u8 = 0b0000;
const RIGHT: u8 = 0b0001;
const LEFT: u8 = 0b0010;
const BOTTOM: u8 = 0b0100;
const TOP: u8 = 0b1000;

/// A rectangle rotated about its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    /// Center
    pub pos: Vec2,
    /// Full width and height
    pub size: Vec2,
    /// Rotation about the center (radians)
    pub rotation: f32,
}

impl OrientedBox {
    pub fn new(pos: Vec2, size: Vec2, rotation: f32) -> Self {
        Self { pos, size, rotation }
    }

    /// Minimum corner in box-local space
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos - self.size / 2.0
    }

    /// Maximum corner in box-local space
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Outcode of a point already in box-local space
    fn outcode(&self, p: Vec2) -> u8 {
        let (min, max) = (self.min(), self.max());
        let mut code = INSIDE;
        if p.x < min.x {
            code |= LEFT;
        }
        if p.x > max.x {
            code |= RIGHT;
        }
        if p.y < min.y {
            code |= BOTTOM;
        }
        if p.y > max.y {
            code |= TOP;
        }
        code
    }

    /// Check whether a segment touches the box
    pub fn intersects(&self, segment: &Segment2) -> bool {
        let local = segment.rotate(-self.rotation, self.pos);

        let code1 = self.outcode(local.p1);
        let code2 = self.outcode(local.p2);

        // An endpoint inside the box
        if code1 == INSIDE || code2 == INSIDE {
            return true;
        }
        // Both endpoints beyond the same edge
        if code1 & code2 != 0 {
            return false;
        }

        let a = self.min();
        let c = self.max();
        let b = Vec2::new(c.x, a.y);
        let d = Vec2::new(a.x, c.y);

        [
            Segment2::new(a, b),
            Segment2::new(b, c),
            Segment2::new(c, d),
            Segment2::new(d, a),
        ]
        .iter()
        .any(|edge| local.intersects(edge))
    }

    /// Check whether a point lies inside the box (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        let local = rotate_about(point, -self.rotation, self.pos);
        let (min, max) = (self.min(), self.max());
        local.x >= min.x && local.x <= max.x && local.y >= min.y && local.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    fn unit_box() -> OrientedBox {
        OrientedBox::new(Vec2::ZERO, Vec2::new(10.0, 10.0), 0.0)
    }

    fn seg(x1: f32, y1: f32, x2: f32, y2: f32) -> Segment2 {
        Segment2::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    #[test]
    fn test_segment_through_box() {
        assert!(unit_box().intersects(&seg(-20.0, 0.0, 20.0, 0.0)));
    }

    #[test]
    fn test_segment_above_box() {
        assert!(!unit_box().intersects(&seg(-20.0, 20.0, 20.0, 20.0)));
    }

    #[test]
    fn test_segment_with_endpoint_inside() {
        assert!(unit_box().intersects(&seg(1.0, 1.0, 50.0, 70.0)));
    }

    #[test]
    fn test_diagonal_clips_corner() {
        // Passes through the top-right corner region
        assert!(unit_box().intersects(&seg(0.0, 8.0, 8.0, 0.0)));
        // Misses it entirely
        assert!(!unit_box().intersects(&seg(0.0, 12.0, 12.0, 0.0)));
    }

    #[test]
    fn test_rotation_changes_hits() {
        // Axis-aligned 20x2 bar misses a segment at y = 5
        let bar = OrientedBox::new(Vec2::ZERO, Vec2::new(20.0, 2.0), 0.0);
        let probe = seg(-1.0, 5.0, 1.0, 5.0);
        assert!(!bar.intersects(&probe));

        // Stood upright, it reaches y = 10
        let upright = OrientedBox::new(Vec2::ZERO, Vec2::new(20.0, 2.0), PI / 2.0);
        assert!(upright.intersects(&probe));
        assert!(upright.contains(Vec2::new(0.0, 9.0)));
        assert!(!upright.contains(Vec2::new(9.0, 0.0)));
    }

    #[test]
    fn test_contains_edges_inclusive() {
        let b = unit_box();
        assert!(b.contains(Vec2::new(5.0, 5.0)));
        assert!(b.contains(Vec2::new(-5.0, 0.0)));
        assert!(!b.contains(Vec2::new(5.1, 0.0)));
    }

    #[test]
    fn test_zero_length_segment_matches_contains() {
        let b = unit_box();
        let inside = Vec2::new(2.0, -3.0);
        let outside = Vec2::new(7.0, 0.0);
        assert!(b.intersects(&Segment2::new(inside, inside)));
        assert!(!b.intersects(&Segment2::new(outside, outside)));
    }

    proptest! {
        #[test]
        fn degenerate_segment_agrees_with_contains(
            px in -60.0f32..60.0,
            py in -60.0f32..60.0,
            bx in -20.0f32..20.0,
            by in -20.0f32..20.0,
            w in 1.0f32..60.0,
            h in 1.0f32..60.0,
            rotation in -PI..PI,
        ) {
            let b = OrientedBox::new(Vec2::new(bx, by), Vec2::new(w, h), rotation);
            let p = Vec2::new(px, py);
            prop_assert_eq!(b.contains(p), b.intersects(&Segment2::new(p, p)));
        }

        #[test]
        fn center_always_contained(
            bx in -500.0f32..500.0,
            by in -500.0f32..500.0,
            w in 0.5f32..100.0,
            h in 0.5f32..100.0,
            rotation in -PI..PI,
        ) {
            let b = OrientedBox::new(Vec2::new(bx, by), Vec2::new(w, h), rotation);
            prop_assert!(b.contains(b.pos));
        }
    }
}
