//! Per-frame simulation tick
//!
//! The host calls `tick` once per display refresh with its measured frame
//! delta; everything else (drops, taps, state transitions) arrives through
//! the command methods on `GameSession`. Order within a tick matches the
//! update pipeline: drop line, food, particles, crow, power-up, end checks,
//! difficulty, crow spawn.

use crate::consts::*;

use super::collision::resolve_food_collision;
use super::state::{FoodItem, GameEvent, GamePhase, GameSession, Outcome};
use super::{particles, spawn};

/// Advance the session by one frame.
///
/// `dt` is clamped to `MAX_DT` before any integration, so a tab suspend or
/// long pause cannot teleport entities. No-op outside the `Playing` phase.
pub fn tick(session: &mut GameSession, dt: f32) {
    if session.phase != GamePhase::Playing {
        return;
    }

    let dt = dt.clamp(0.0, MAX_DT);
    session.elapsed += dt;

    session.drop_line.advance(dt);
    update_food(session, dt);
    particles::update(&mut session.particles, dt);
    update_tower_shake(session, dt);
    update_crow(session, dt);
    update_power_up(session, dt);
    check_game_end(session);

    // Score may have just changed; retune before the crow roll so the spawn
    // chance always reflects the current ramp
    session.difficulty.retune(session.score);
    session.drop_line.speed = session.difficulty.line_speed;
    spawn::maybe_spawn_crow(session);
}

/// Gravity integration plus landing/loss resolution for every in-flight item
fn update_food(session: &mut GameSession, dt: f32) {
    let mut idx = 0;
    while idx < session.food_items.len() {
        let rapid_fire = session.power_up.active;

        let landing = {
            let (items, tower) = (&mut session.food_items, &session.tower);
            let food = &mut items[idx];
            food.pos.y += food.fall_speed * dt;
            food.wobble_phase += dt * 3.0;
            resolve_food_collision(food, tower, rapid_fire)
        };

        if landing.is_some() {
            let food = session.food_items.remove(idx);
            land_food(session, food);
            continue;
        }

        if session.food_items[idx].pos.y > PLAY_HEIGHT + FALL_OFF_MARGIN {
            let food = session.food_items.remove(idx);
            log::debug!("{} fell off screen at x:{:.0}", food.kind.name(), food.pos.x);
            session.push_event(GameEvent::FoodLost { kind: food.kind });
            session.lose_health();
            continue;
        }

        idx += 1;
    }
}

/// A resolved landing: power-ups activate rapid fire, everything else grows
/// the tower
fn land_food(session: &mut GameSession, food: FoodItem) {
    if food.kind.is_power_up() {
        log::info!("Power-up collected, rapid fire active");
        session.power_up.activate();
        particles::emit_power_up(session, food.pos);
        session.score += POWER_UP_POINTS;
        session.push_event(GameEvent::PowerUpCollected);
    } else {
        session.add_to_tower(&food);
        particles::emit_success(session, food.pos, food.kind.color());
        session.score += LANDING_POINTS;
        session.push_event(GameEvent::FoodLanded {
            kind: food.kind,
            pos: food.pos,
        });
    }
}

fn update_tower_shake(session: &mut GameSession, dt: f32) {
    for piece in &mut session.tower {
        piece.decay_shake(dt);
    }
}

/// Crow flight, countdown, and the escape penalty
fn update_crow(session: &mut GameSession, dt: f32) {
    let mut escaped = false;
    let mut left_area = false;

    if let Some(crow) = session.crow.as_mut() {
        crow.pos += crow.vel * dt;
        crow.flap_phase += dt * 8.0;
        crow.timer -= dt;

        if crow.timer <= 0.0 {
            escaped = true;
        } else if crow.pos.x < -CROW_EXIT_MARGIN || crow.pos.x > PLAY_WIDTH + CROW_EXIT_MARGIN {
            left_area = true;
        }
    }

    if escaped {
        log::info!("Crow escaped, tower shaken");
        session.crow = None;
        session.shake_tower();
        session.push_event(GameEvent::CrowEscaped);
        session.lose_health();
    } else if left_area {
        // Flew out before the timer ran down; no penalty
        session.crow = None;
    }
}

fn update_power_up(session: &mut GameSession, dt: f32) {
    if session.power_up.active {
        session.power_up.remaining -= dt;
        if session.power_up.remaining <= 0.0 {
            log::info!("Rapid fire expired");
            session.power_up.deactivate();
            session.push_event(GameEvent::PowerUpExpired);
        }
    }
}

/// Win check: any tower piece whose top edge reaches the win line.
/// (The loss check lives in `lose_health`, in the same tick as the loss.)
fn check_game_end(session: &mut GameSession) {
    if session.phase != GamePhase::Playing {
        return;
    }
    if session.tower.iter().any(|piece| piece.top() <= WIN_LINE_Y) {
        session.end_session(Outcome::Win);
    }
}
