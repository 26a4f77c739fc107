//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by object ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod object;
pub mod slice;
pub mod state;
pub mod tick;

pub use collision::OrientedBox;
pub use geometry::{Segment2, rotate_about};
pub use object::{MovingObject, ObjectKind, Payload, SlicePhase};
pub use slice::PointerTrail;
pub use state::{GameEvent, GameState, GameStatus, ObjectView, SessionState, Snapshot};
pub use tick::{TickInput, tick};
