//! Host-facing render/audio seam
//!
//! The simulation never touches a canvas, the DOM, or an audio element.
//! The host implements `Presenter` and, once per frame, receives the drained
//! sound cues followed by a borrow-only `FrameSnapshot` - enough to render
//! without any simulation logic of its own.

use crate::sim::{
    Crow, DropLine, FoodItem, GameEvent, GamePhase, GameSession, Particle, PowerUp, TowerPiece,
};

/// Discrete sound cues, mapped from game events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// An item left the drop line
    Drop,
    /// Landing, or a successful crow swat
    Success,
    /// Rapid-fire pickup
    PowerUp,
    /// Crow escaped with its countdown intact
    Crow,
}

/// Read-only view of everything the renderer needs for one frame
#[derive(Debug)]
pub struct FrameSnapshot<'a> {
    pub phase: GamePhase,
    pub score: u32,
    pub health: u8,
    pub max_health: u8,
    pub high_score: u32,
    pub food_items: &'a [FoodItem],
    pub tower: &'a [TowerPiece],
    pub crow: Option<&'a Crow>,
    pub particles: &'a [Particle],
    pub drop_line: &'a DropLine,
    pub power_up: &'a PowerUp,
    pub drop_cooldown_remaining: f32,
}

impl<'a> FrameSnapshot<'a> {
    pub fn capture(session: &'a GameSession) -> Self {
        Self {
            phase: session.phase,
            score: session.score,
            health: session.health,
            max_health: crate::consts::MAX_HEALTH,
            high_score: session.high_score,
            food_items: &session.food_items,
            tower: &session.tower,
            crow: session.crow.as_ref(),
            particles: &session.particles,
            drop_line: &session.drop_line,
            power_up: &session.power_up,
            drop_cooldown_remaining: session.drop_cooldown_remaining(),
        }
    }
}

/// The capability the UI host implements; failures on its side (audio play
/// rejected, canvas lost) must be swallowed there and never reach the tick
pub trait Presenter {
    fn render(&mut self, frame: &FrameSnapshot<'_>);
    fn play_cue(&mut self, cue: SoundCue);
}

/// Which cue, if any, an event should trigger
pub fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::FoodDropped { .. } => Some(SoundCue::Drop),
        GameEvent::FoodLanded { .. } => Some(SoundCue::Success),
        GameEvent::CrowHit => Some(SoundCue::Success),
        GameEvent::PowerUpCollected => Some(SoundCue::PowerUp),
        GameEvent::CrowEscaped => Some(SoundCue::Crow),
        _ => None,
    }
}

/// Drain the frame's events into cues, then hand the presenter a snapshot
pub fn present_frame(session: &mut GameSession, presenter: &mut impl Presenter) {
    for event in session.drain_events() {
        if let Some(cue) = cue_for(&event) {
            presenter.play_cue(cue);
        }
    }
    presenter.render(&FrameSnapshot::capture(session));
}
