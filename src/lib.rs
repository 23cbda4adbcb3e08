//! Snack Stack - a food-tower stacking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, game state)
//! - `presenter`: Narrow render/audio capability the host implements
//! - `highscores`: Single-integer high score persistence
//! - `settings`: Audio/visual preferences

pub mod highscores;
pub mod presenter;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use presenter::{FrameSnapshot, Presenter, SoundCue};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical play area - the host scales device coordinates into this space
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Delta-time ceiling (bounds integration error after a pause or tab suspend)
    pub const MAX_DT: f32 = 1.0 / 30.0;

    /// Ground platform - a fixed span the first item must hit
    pub const PLATFORM_Y: f32 = PLAY_HEIGHT - 30.0;
    pub const PLATFORM_HALF_WIDTH: f32 = 60.0;

    /// Oscillating drop line
    pub const DROP_LINE_Y: f32 = 50.0;
    pub const DROP_LINE_WIDTH: f32 = 80.0;
    /// New items appear this far below the line
    pub const DROP_SPAWN_OFFSET: f32 = 20.0;

    /// Input gating (seconds)
    pub const TAP_DEBOUNCE: f32 = 0.3;
    pub const DROP_COOLDOWN: f32 = 1.5;

    /// Scoring
    pub const LANDING_POINTS: u32 = 10;
    pub const POWER_UP_POINTS: u32 = 50;
    /// A tower piece whose top edge reaches this line wins the run
    pub const WIN_LINE_Y: f32 = 50.0;

    /// Health
    pub const MAX_HEALTH: u8 = 3;

    /// Rapid-fire power-up
    pub const POWER_UP_CHANCE: f32 = 0.2;
    pub const POWER_UP_DURATION: f32 = 5.0;

    /// Crow threat
    pub const CROW_RADIUS: f32 = 30.0;
    pub const CROW_TIMER: f32 = 3.0;
    pub const CROW_SPEED: f32 = 100.0;
    /// Crows past this margin have left the play area
    pub const CROW_EXIT_MARGIN: f32 = 100.0;

    /// Items falling this far past the bottom edge are lost
    pub const FALL_OFF_MARGIN: f32 = 50.0;

    /// Stacking: minimum horizontal overlap as a fraction of the smaller width
    pub const STACK_MIN_OVERLAP: f32 = 0.5;
    pub const STACK_MIN_OVERLAP_RAPID: f32 = 0.3;
    /// Band below a piece's top edge that still counts as landing on it
    pub const STACK_TOLERANCE: f32 = 5.0;
}

/// Horizontal overlap in pixels between two center/width spans (negative = gap)
#[inline]
pub fn span_overlap(ax: f32, aw: f32, bx: f32, bw: f32) -> f32 {
    let a_left = ax - aw / 2.0;
    let a_right = ax + aw / 2.0;
    let b_left = bx - bw / 2.0;
    let b_right = bx + bw / 2.0;
    a_right.min(b_right) - a_left.max(b_left)
}
