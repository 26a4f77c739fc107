//! Pommes Ninja entry point
//!
//! Runs the simulation headless with a scripted pointer and logs how the
//! runs went. Pass a settings JSON path as the first argument to override
//! defaults.

use std::path::PathBuf;

use glam::Vec2;

use pommes_ninja::renderer::{AssetManifest, build_draw_list};
use pommes_ninja::sim::{GameEvent, GameState, TickInput, tick};
use pommes_ninja::Settings;

/// Frame length of the scripted run (60 Hz)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Length of the scripted run
const FRAMES: u32 = 60 * 60;

/// Pointer position for the scripted swipe at time `t` (ms)
///
/// While idle the pointer saws back and forth over the start fruit; during a
/// run it traces a figure-eight over the field.
fn scripted_pointer(state: &GameState, t: f64) -> Vec2 {
    let phase = (t / 1000.0) as f32;

    if state.session.status.is_idle() {
        if let Some(start) = state.objects.iter().find(|o| o.immobile) {
            return start.pos() + Vec2::new((phase * 10.0).sin() * 80.0, 0.0);
        }
    }

    let center = Vec2::new(state.width / 2.0, state.height / 2.0);
    let reach = Vec2::new(state.width * 0.45, state.height * 0.3);
    center + Vec2::new((phase * 2.5).sin(), (phase * 5.0).sin()) * reach
}

fn main() {
    env_logger::init();
    log::info!("Pommes Ninja (headless) starting...");

    let settings = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load_from(&path),
        None => Settings::default(),
    };

    let assets = match AssetManifest::builtin() {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("Built-in asset manifest is broken: {}", e);
            std::process::exit(1);
        }
    };

    let mut state = GameState::from_settings(&settings);
    let mut sliced = 0u32;
    let mut runs = 0u32;

    for frame in 0..FRAMES {
        let t = frame as f64 * FRAME_MS;
        let input = TickInput::with_pointer(t, scripted_pointer(&state, t));
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::GameStarted => runs += 1,
                GameEvent::FruitSliced { .. } => sliced += 1,
                GameEvent::GameOver { score, best_score } => {
                    log::info!("Run {} over: {} (best {})", runs, score, best_score);
                }
                _ => {}
            }
        }

        if let Err(e) = build_draw_list(&state.snapshot(), &settings, &assets) {
            log::error!("Frame {} could not be drawn: {}", frame, e);
            std::process::exit(1);
        }
    }

    println!("Runs started: {}", runs);
    println!("Fruit sliced: {}", sliced);
    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
