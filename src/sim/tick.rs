//! Per-frame simulation tick
//!
//! Advances the game by the wall-clock time since the previous frame:
//! spawn, slice, cull, then integrate. Structural changes to the object set
//! are decided against the current set first and applied afterwards.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::object::{MovingObject, ObjectKind, Payload, SlicePhase};
use super::state::{GameEvent, GameState, GameStatus};
use crate::consts::*;
use crate::max_fruits;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Monotonic frame timestamp (milliseconds)
    pub now_ms: f64,
    /// Pointer position sampled this frame
    pub pointer: Option<Vec2>,
}

impl TickInput {
    pub fn at(now_ms: f64) -> Self {
        Self {
            now_ms,
            pointer: None,
        }
    }

    pub fn with_pointer(now_ms: f64, pointer: Vec2) -> Self {
        Self {
            now_ms,
            pointer: Some(pointer),
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    // A frame without a sample means the pointer stayed put. The trail is
    // fixed for the rest of the tick.
    if let Some(pointer) = input.pointer.or_else(|| state.trail.last()) {
        state.on_pointer_move(pointer);
    }

    let now = input.now_ms;
    let Some(last) = state.last_time else {
        state.last_time = Some(now);
        return;
    };

    let elapsed = now - last;
    if !(0.0..=state.max_frame_gap_ms).contains(&elapsed) {
        log::debug!("Skipping stalled frame ({:.0} ms)", elapsed);
        state.last_time = Some(now);
        return;
    }

    if state.session.status == GameStatus::Playing {
        spawn_wave(state);
    }

    resolve_slices(state);

    if state.session.status.is_idle() {
        state.last_time = Some(now);
        return;
    }

    remove_fallen(state);

    if state.session.lives == 0 {
        state.game_over();
    }

    let gravity = Vec2::new(0.0, GRAVITY * PIXELS_PER_METER);
    for obj in &mut state.objects {
        obj.apply_force(gravity);
        obj.integrate(elapsed);
    }

    state.normalize_order();
    state.last_time = Some(now);
}

/// Maybe launch a group of fruits (and possibly a bomb)
fn spawn_wave(state: &mut GameState) {
    let max = max_fruits(state.session.score);
    let live = state.objects.len();

    let wants_more = live == 0
        || (state.rng.random_bool(SPAWN_CHANCE) && (live as f32) < max as f32 * CROWD_FACTOR);
    if !wants_more {
        return;
    }

    let count = state.rng.random_range(0..max);
    for _ in 0..count {
        spawn_object(state, ObjectKind::Fruit);
    }
    if state.rng.random_bool(BOMB_CHANCE) {
        spawn_object(state, ObjectKind::Bomb);
    }
}

/// Launch one object from below the field toward the opposite half
pub fn spawn_object(state: &mut GameState, kind: ObjectKind) -> u32 {
    let to_right = state.rng.random_bool(0.5);
    let half = state.width / 2.0;
    let x = if to_right {
        state.rng.random_range(0.0..half)
    } else {
        state.rng.random_range(half..state.width)
    };
    let direction = if to_right { 1.0 } else { -1.0 };

    let vx = direction * state.rng.random_range(LAUNCH_SPEED_X.0..LAUNCH_SPEED_X.1);
    let vy = -state.rng.random_range(LAUNCH_SPEED_Y.0..LAUNCH_SPEED_Y.1);
    let spin = state.rng.random_range(LAUNCH_SPIN.0..LAUNCH_SPIN.1) * random_sign(&mut state.rng);

    let id = state.next_object_id();
    let mut obj = MovingObject::new(
        id,
        Vec2::new(x, state.height + SPAWN_DEPTH),
        Vec2::splat(OBJECT_SIZE),
        Payload::new(kind, SlicePhase::Full),
    );
    obj.vel = Vec2::new(vx, vy) * PIXELS_PER_METER;
    obj.angular_vel = spin;

    log::debug!("Spawned {:?} #{} at x={:.0}", kind, id, x);
    state.objects.push(obj);
    id
}

/// Replace a whole object with its left and right halves
///
/// Returns the IDs of the halves, or `None` if `id` isn't a live whole object.
pub fn slice_fruit(state: &mut GameState, id: u32) -> Option<(u32, u32)> {
    let index = state
        .objects
        .iter()
        .position(|o| o.id == id && o.payload.is_sliceable())?;
    let original = state.objects.remove(index);

    let sign = random_sign(&mut state.rng);
    let mut ids = [0; 2];
    for (slot, (phase, direction)) in [(SlicePhase::Left, sign), (SlicePhase::Right, -sign)]
        .into_iter()
        .enumerate()
    {
        let half_id = state.next_object_id();
        let mut half = MovingObject::new(
            half_id,
            original.hitbox.pos,
            original.hitbox.size,
            Payload::new(original.payload.kind, phase),
        );
        half.vel = Vec2::new(direction * SPLIT_SPEED * PIXELS_PER_METER, 0.0);
        half.angular_vel = original.angular_vel * random_sign(&mut state.rng);
        state.objects.push(half);
        ids[slot] = half_id;
    }

    log::debug!("Sliced #{} into #{} and #{}", id, ids[0], ids[1]);
    Some((ids[0], ids[1]))
}

/// Collision pass: slice every whole object the pointer crossed
///
/// A bomb ends the run on the spot; objects after it in the set are not
/// checked this tick.
fn resolve_slices(state: &mut GameState) {
    let mut hits = Vec::new();
    for obj in state.objects.iter().filter(|o| o.payload.is_sliceable()) {
        if state.trail.crosses(&obj.hitbox) {
            hits.push((obj.id, obj.payload.kind));
            if obj.payload.kind == ObjectKind::Bomb {
                break;
            }
        }
    }

    for (id, kind) in hits {
        match kind {
            ObjectKind::Bomb => {
                log::info!("Bomb #{} sliced", id);
                state.events.push(GameEvent::BombDetonated { id });
                state.session.lives = 0;
                state.game_over();
            }
            ObjectKind::Fruit => {
                slice_fruit(state, id);
                if state.session.status.is_idle() {
                    state.start_game();
                }
                state.session.score = state.session.score.saturating_add(1);
                state.events.push(GameEvent::FruitSliced { id });
            }
        }
    }
}

/// Out-of-bounds pass: drop objects that fell below the field
fn remove_fallen(state: &mut GameState) {
    let limit = state.height + DESPAWN_MARGIN;
    let fallen: Vec<(u32, Payload)> = state
        .objects
        .iter()
        .filter(|o| o.pos().y > limit && o.vel.y > 0.0)
        .map(|o| (o.id, o.payload))
        .collect();
    if fallen.is_empty() {
        return;
    }

    state
        .objects
        .retain(|o| !fallen.iter().any(|(id, _)| *id == o.id));

    let mut missed = 0u8;
    for (id, payload) in &fallen {
        if payload.costs_life_when_missed() {
            missed = missed.saturating_add(1);
            state.events.push(GameEvent::FruitMissed { id: *id });
        }
    }
    if missed > 0 {
        log::debug!("Missed {} fruit", missed);
        state.session.lose_lives(missed);
    }
}

#[inline]
fn random_sign(rng: &mut Pcg32) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}
