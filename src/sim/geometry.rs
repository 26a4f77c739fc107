//! Planar geometry primitives
//!
//! Points are plain `glam::Vec2`; segments are ordered point pairs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rotate `point` by `radians` about `pivot`
#[inline]
pub fn rotate_about(point: Vec2, radians: f32, pivot: Vec2) -> Vec2 {
    let local = point - pivot;
    let (sin, cos) = radians.sin_cos();
    Vec2::new(
        local.x * cos - local.y * sin + pivot.x,
        local.x * sin + local.y * cos + pivot.y,
    )
}

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment2 {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Segment2 {
    pub fn new(p1: Vec2, p2: Vec2) -> Self {
        Self { p1, p2 }
    }

    /// Rotate both endpoints about `pivot`
    pub fn rotate(&self, radians: f32, pivot: Vec2) -> Self {
        Self {
            p1: rotate_about(self.p1, radians, pivot),
            p2: rotate_about(self.p2, radians, pivot),
        }
    }

    /// Parametric segment-segment intersection test
    ///
    /// Solves `p1 + s*d1 == q1 + t*d2` and accepts when both parameters are in
    /// `[0, 1]`. Parallel, collinear and zero-length segments have a zero
    /// denominator; the resulting non-finite parameters fail the range check,
    /// so they never intersect.
    pub fn intersects(&self, other: &Segment2) -> bool {
        let d1 = self.p2 - self.p1;
        let d2 = other.p2 - other.p1;
        let offset = self.p1 - other.p1;

        let denom = -d2.x * d1.y + d1.x * d2.y;
        let s = (-d1.y * offset.x + d1.x * offset.y) / denom;
        let t = (d2.x * offset.y - d2.y * offset.x) / denom;

        (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t)
    }
}
