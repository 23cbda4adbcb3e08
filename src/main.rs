//! Snack Stack entry points
//!
//! The real game runs in the browser: the JS/DOM host owns the canvas,
//! input events, and audio elements, and drives `GameSession` through its
//! command methods. The native binary runs a short scripted headless
//! session, handy for balance checks and profiling.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Snack Stack core loaded");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use snack_stack::presenter::cue_for;
    use snack_stack::sim::{tick, GamePhase, GameSession};
    use snack_stack::HighScore;

    env_logger::init();
    log::info!("Snack Stack (native) starting headless session...");

    let mut high_score = HighScore::load();
    let mut session = GameSession::new(7);
    session.set_high_score(high_score.best);
    session.start();

    // Two simulated minutes at 60 Hz, tapping as fast as the gates allow
    let dt = 1.0 / 60.0;
    let mut cues = 0usize;
    for _ in 0..(120 * 60) {
        session.request_drop();
        tick(&mut session, dt);
        cues += session
            .drain_events()
            .iter()
            .filter(|e| cue_for(e).is_some())
            .count();
        if session.phase == GamePhase::GameOver {
            break;
        }
    }

    if high_score.record(session.score) {
        high_score.save();
    }

    println!(
        "score={} tower={} health={} outcome={:?} cues={}",
        session.score,
        session.tower.len(),
        session.health,
        session.outcome,
        cues
    );
    match serde_json::to_string(&session) {
        Ok(json) => log::debug!("final session: {json}"),
        Err(e) => log::warn!("could not serialize session: {e}"),
    }
}
