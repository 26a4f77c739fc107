//! Pointer trail and slice detection
//!
//! The trail keeps the last few pointer samples. An object counts as sliced
//! when one of the most recent trail segments crosses its hitbox.

use std::collections::VecDeque;

use glam::Vec2;

use super::collision::OrientedBox;
use super::geometry::Segment2;
use crate::consts::{SLICE_SEGMENTS, TRAIL_CAPACITY};

/// Fixed-capacity window of recent pointer positions (oldest first)
#[derive(Debug, Clone)]
pub struct PointerTrail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Default for PointerTrail {
    fn default() -> Self {
        Self::with_capacity(TRAIL_CAPACITY)
    }
}

impl PointerTrail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record a sample, evicting the oldest beyond capacity
    pub fn push(&mut self, pos: Vec2) {
        self.points.push_back(pos);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent sample
    pub fn last(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    /// Samples, oldest first
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    /// The most recent segments, newest first
    fn recent_segments(&self) -> impl Iterator<Item = Segment2> + '_ {
        let len = self.points.len();
        (0..SLICE_SEGMENTS)
            .map(move |i| Segment2::new(self.points[len - 1 - i], self.points[len - 2 - i]))
    }

    /// Check whether the recent path crossed `hitbox`
    ///
    /// Needs one more sample than there are segments to test; shorter trails
    /// never slice.
    pub fn crosses(&self, hitbox: &OrientedBox) -> bool {
        if self.points.len() <= SLICE_SEGMENTS {
            return false;
        }
        self.recent_segments().any(|segment| hitbox.intersects(&segment))
    }
}
