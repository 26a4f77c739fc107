//! Moving objects: fruits, bombs and their sliced halves

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::OrientedBox;

/// What an object is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Fruit,
    Bomb,
}

/// Whether an object is whole or one half of a sliced object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlicePhase {
    Full,
    Left,
    Right,
}

impl SlicePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlicePhase::Full => "full",
            SlicePhase::Left => "left",
            SlicePhase::Right => "right",
        }
    }
}

/// Gameplay tag carried by every object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Payload {
    pub kind: ObjectKind,
    pub phase: SlicePhase,
}

impl Payload {
    pub const fn new(kind: ObjectKind, phase: SlicePhase) -> Self {
        Self { kind, phase }
    }

    /// Only whole objects can be sliced
    pub fn is_sliceable(&self) -> bool {
        self.phase == SlicePhase::Full
    }

    /// A whole fruit falling off-screen costs a life
    pub fn costs_life_when_missed(&self) -> bool {
        matches!(
            self,
            Payload {
                kind: ObjectKind::Fruit,
                phase: SlicePhase::Full
            }
        )
    }

    /// Sprite name for this payload
    pub fn asset_tag(&self) -> String {
        let base = match self.kind {
            ObjectKind::Fruit => "apple_1",
            ObjectKind::Bomb => "strawberry",
        };
        format!("{}-{}", base, self.phase.as_str())
    }
}

/// A ballistic object in the play field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingObject {
    pub id: u32,
    pub hitbox: OrientedBox,
    /// Opaque sprite tag for the renderer
    pub asset: String,
    /// Linear velocity (pixels/s)
    pub vel: Vec2,
    /// Active force (pixels/s², unit mass)
    pub force: Vec2,
    /// Angular velocity (rad/s)
    pub angular_vel: f32,
    pub payload: Payload,
    /// Ignores applied forces (decorative start fruit)
    pub immobile: bool,
}

impl MovingObject {
    pub fn new(id: u32, pos: Vec2, size: Vec2, payload: Payload) -> Self {
        Self {
            id,
            hitbox: OrientedBox::new(pos, size, 0.0),
            asset: payload.asset_tag(),
            vel: Vec2::ZERO,
            force: Vec2::ZERO,
            angular_vel: 0.0,
            payload,
            immobile: false,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.hitbox.pos
    }

    /// Set the active force. Replaces, does not accumulate.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.immobile {
            return;
        }
        self.force = force;
    }

    /// Advance by `dt_ms` milliseconds (semi-implicit Euler)
    pub fn integrate(&mut self, dt_ms: f64) {
        let dt = (dt_ms / 1000.0) as f32;
        self.vel += self.force * dt;
        self.hitbox.pos += self.vel * dt;
        self.hitbox.rotation += self.angular_vel * dt;
    }
}
