//! Game state and session types
//!
//! `GameState` exclusively owns everything the simulation mutates: the live
//! object set, the session record, the pointer trail and the RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::object::{MovingObject, ObjectKind, Payload, SlicePhase};
use super::slice::PointerTrail;
use crate::consts::*;
use crate::settings::Settings;

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Title screen, waiting for the first slice
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a slice to restart
    GameOver,
}

impl GameStatus {
    /// Idle states show the start fruit and don't simulate physics
    pub fn is_idle(&self) -> bool {
        matches!(self, GameStatus::Menu | GameStatus::GameOver)
    }
}

/// Score, lives and status for the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    /// Highest score this process has seen (never decreases)
    pub best_score: u64,
    pub lives: u8,
    pub status: GameStatus,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            score: 0,
            best_score: 0,
            lives: STARTING_LIVES,
            status: GameStatus::Menu,
        }
    }
}

impl SessionState {
    /// Enter `Playing` with a fresh score and full lives
    pub fn begin(&mut self) {
        self.status = GameStatus::Playing;
        self.score = 0;
        self.lives = STARTING_LIVES;
    }

    /// Enter `GameOver`, folding the score into the best score
    pub fn end(&mut self) {
        self.status = GameStatus::GameOver;
        self.best_score = self.best_score.max(self.score);
    }

    /// Lose `count` lives, saturating at zero
    pub fn lose_lives(&mut self, count: u8) {
        self.lives = self.lives.saturating_sub(count);
    }
}

/// Notable things that happened during a tick (for audio/effects/logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    FruitSliced { id: u32 },
    BombDetonated { id: u32 },
    FruitMissed { id: u32 },
    GameOver { score: u64, best_score: u64 },
}

/// Render-facing view of one object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub asset: String,
}

impl From<&MovingObject> for ObjectView {
    fn from(obj: &MovingObject) -> Self {
        Self {
            id: obj.id,
            pos: obj.hitbox.pos,
            size: obj.hitbox.size,
            rotation: obj.hitbox.rotation,
            asset: obj.asset.clone(),
        }
    }
}

/// Immutable copy of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub session: SessionState,
    pub objects: Vec<ObjectView>,
    /// Pointer samples, oldest first
    pub trail: Vec<Vec2>,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Play field size (pixels)
    pub width: f32,
    pub height: f32,
    /// Run seed for reproducibility
    pub seed: u64,
    pub session: SessionState,
    /// Live objects (sorted by id for determinism)
    pub objects: Vec<MovingObject>,
    /// Recent pointer samples
    pub trail: PointerTrail,
    /// Frames longer than this skip simulation
    pub max_frame_gap_ms: f64,
    pub(crate) rng: Pcg32,
    pub(crate) last_time: Option<f64>,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game in the menu with the given field size and seed
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not a positive finite number.
    /// [`Settings::from_json`] rejects such fields up front.
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        assert!(
            width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0,
            "play field must be positive, got {}x{}",
            width,
            height
        );

        let mut state = Self {
            width,
            height,
            seed,
            session: SessionState::default(),
            objects: Vec::new(),
            trail: PointerTrail::default(),
            max_frame_gap_ms: MAX_FRAME_GAP_MS,
            rng: Pcg32::seed_from_u64(seed),
            last_time: None,
            events: Vec::new(),
            next_id: 1,
        };

        state.spawn_start_fruit();

        state
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut state = Self::new(settings.field_width, settings.field_height, settings.seed);
        state.max_frame_gap_ms = settings.max_frame_gap_ms;
        state
    }

    /// Allocate a new object ID
    pub fn next_object_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Timestamp of the last simulated (or skipped) frame
    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }

    /// Record a pointer sample
    pub fn on_pointer_move(&mut self, pos: Vec2) {
        self.trail.push(pos);
    }

    /// Add the immobile fruit that starts a run when sliced
    pub fn spawn_start_fruit(&mut self) {
        let id = self.next_object_id();
        let pos = Vec2::new(
            self.width / 2.0 + START_FRUIT_OFFSET.0,
            self.height / 2.0 + START_FRUIT_OFFSET.1,
        );
        let mut fruit = MovingObject::new(
            id,
            pos,
            Vec2::splat(OBJECT_SIZE),
            Payload::new(ObjectKind::Fruit, SlicePhase::Full),
        );
        fruit.immobile = true;
        self.objects.push(fruit);
    }

    /// Begin a run. Objects and best score are left alone.
    pub fn start_game(&mut self) {
        log::info!("Game started (best score {})", self.session.best_score);
        self.session.begin();
        self.events.push(GameEvent::GameStarted);
    }

    /// End the run, clear the field and put the start fruit back
    pub fn game_over(&mut self) {
        self.session.end();
        log::info!(
            "Game over: score {}, best {}",
            self.session.score,
            self.session.best_score
        );
        self.events.push(GameEvent::GameOver {
            score: self.session.score,
            best_score: self.session.best_score,
        });
        self.objects.clear();
        self.spawn_start_fruit();
    }

    /// Find a live object by ID
    pub fn object(&self, id: u32) -> Option<&MovingObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Capture the render-facing state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            session: self.session,
            objects: self.objects.iter().map(ObjectView::from).collect(),
            trail: self.trail.points().collect(),
        }
    }

    /// Ensure objects are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.objects.sort_by_key(|o| o.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_in_menu() {
        let state = GameState::new(800.0, 600.0, 1);
        assert_eq!(state.session.status, GameStatus::Menu);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.best_score, 0);
        assert_eq!(state.session.lives, 3);
        assert_eq!(state.objects.len(), 1);

        let fruit = &state.objects[0];
        assert!(fruit.immobile);
        assert_eq!(fruit.pos(), Vec2::new(600.0, 400.0));
        assert_eq!(fruit.payload, Payload::new(ObjectKind::Fruit, SlicePhase::Full));
    }

    #[test]
    #[should_panic(expected = "play field must be positive")]
    fn test_new_rejects_empty_field() {
        GameState::new(0.0, 600.0, 1);
    }

    #[test]
    fn test_from_settings_applies_frame_gap() {
        let settings = Settings {
            max_frame_gap_ms: 250.0,
            ..Settings::default()
        };
        let state = GameState::from_settings(&settings);
        assert_eq!(state.max_frame_gap_ms, 250.0);
        assert_eq!(state.width, settings.field_width);
    }

    #[test]
    fn test_start_game_resets_run_only() {
        let mut state = GameState::new(800.0, 600.0, 1);
        state.session.score = 12;
        state.session.best_score = 40;
        state.session.lives = 1;
        state.start_game();

        assert_eq!(state.session.status, GameStatus::Playing);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.lives, 3);
        assert_eq!(state.session.best_score, 40);
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn test_game_over_keeps_best_monotonic() {
        let mut state = GameState::new(800.0, 600.0, 1);
        state.start_game();
        state.session.score = 7;
        state.game_over();
        assert_eq!(state.session.best_score, 7);

        state.start_game();
        state.session.score = 3;
        state.game_over();
        assert_eq!(state.session.best_score, 7);
        assert_eq!(state.session.status, GameStatus::GameOver);
    }

    #[test]
    fn test_game_over_resets_field() {
        let mut state = GameState::new(800.0, 600.0, 1);
        state.start_game();
        for _ in 0..4 {
            let id = state.next_object_id();
            state.objects.push(MovingObject::new(
                id,
                Vec2::ZERO,
                Vec2::splat(OBJECT_SIZE),
                Payload::new(ObjectKind::Fruit, SlicePhase::Left),
            ));
        }
        state.game_over();

        assert_eq!(state.objects.len(), 1);
        assert!(state.objects[0].immobile);
    }

    #[test]
    fn test_lives_saturate() {
        let mut session = SessionState::default();
        session.lose_lives(5);
        assert_eq!(session.lives, 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = GameState::new(800.0, 600.0, 1);
        let a = state.next_object_id();
        let b = state.next_object_id();
        assert_ne!(a, b);
        assert!(state.objects.iter().all(|o| o.id != a && o.id != b));
    }

    #[test]
    fn test_events_drain() {
        let mut state = GameState::new(800.0, 600.0, 1);
        state.start_game();
        state.game_over();
        let events = state.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], GameEvent::GameStarted);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(800.0, 600.0, 1);
        state.on_pointer_move(Vec2::new(1.0, 2.0));
        let snapshot = state.snapshot();
        assert_eq!(snapshot.trail, vec![Vec2::new(1.0, 2.0)]);
        assert_eq!(snapshot.objects[0].asset, "apple_1-full");

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
