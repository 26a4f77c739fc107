//! Pommes Ninja - A fruit-slicing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, slicing, game state)
//! - `renderer`: Backend-agnostic draw list built from simulation snapshots
//! - `settings`: Data-driven configuration

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{GameState, Snapshot, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Default play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// World units (metres) to pixels
    pub const PIXELS_PER_METER: f32 = 120.0;
    /// Gravity in m/s² (scaled by PIXELS_PER_METER before use)
    pub const GRAVITY: f32 = 9.81;

    /// Frames longer than this are treated as a stall (backgrounded tab)
    pub const MAX_FRAME_GAP_MS: f64 = 500.0;

    /// Pointer samples kept for slicing and trail rendering
    pub const TRAIL_CAPACITY: usize = 10;
    /// Most recent trail segments tested per object
    pub const SLICE_SEGMENTS: usize = 3;

    pub const STARTING_LIVES: u8 = 3;

    /// Fruit/bomb sprite and hitbox size (pixels)
    pub const OBJECT_SIZE: f32 = 66.0;
    /// Decorative start fruit offset from field center
    pub const START_FRUIT_OFFSET: (f32, f32) = (200.0, 100.0);

    /// Spawn point below the bottom edge
    pub const SPAWN_DEPTH: f32 = 50.0;
    /// Objects below height + this (and still falling) are gone
    pub const DESPAWN_MARGIN: f32 = 100.0;

    /// Per-tick chance of a spawn wave while objects are live
    pub const SPAWN_CHANCE: f64 = 0.05;
    /// Chance a spawn wave includes a bomb
    pub const BOMB_CHANCE: f64 = 0.05;
    /// Spawn waves only happen below this fraction of the crowd limit
    pub const CROWD_FACTOR: f32 = 0.7;

    /// Launch speed ranges (m/s)
    pub const LAUNCH_SPEED_X: (f32, f32) = (1.0, 3.0);
    pub const LAUNCH_SPEED_Y: (f32, f32) = (7.0, 9.5);
    /// Spin range (rad/s)
    pub const LAUNCH_SPIN: (f32, f32) = (2.0, 8.0);
    /// Horizontal speed of each half after a slice (m/s)
    pub const SPLIT_SPEED: f32 = 1.2;
}

/// Maximum concurrent fruits for a given score
#[inline]
pub fn max_fruits(score: u64) -> usize {
    2 + ((score as f64).sqrt() / 3.0).floor() as usize
}
