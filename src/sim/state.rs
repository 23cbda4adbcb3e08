//! Game state and core simulation types
//!
//! All state for a run lives on `GameSession`: one explicitly owned,
//! explicitly reset instance - no module-level singletons. The host drives
//! it through the command methods and reads it back through snapshots.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Main menu, no simulation running
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen, awaiting resume
    Paused,
    /// Run ended (see `GameSession::outcome`)
    GameOver,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Tower reached the win line
    Win,
    /// Health hit zero
    Loss,
}

/// Catalogue of droppable items: six foods plus the rapid-fire power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    Burger,
    Pizza,
    Taco,
    Hotdog,
    Donut,
    Cupcake,
    RapidFire,
}

impl FoodKind {
    /// The six regular foods, in catalogue order
    pub const FOODS: [FoodKind; 6] = [
        FoodKind::Burger,
        FoodKind::Pizza,
        FoodKind::Taco,
        FoodKind::Hotdog,
        FoodKind::Donut,
        FoodKind::Cupcake,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FoodKind::Burger => "burger",
            FoodKind::Pizza => "pizza",
            FoodKind::Taco => "taco",
            FoodKind::Hotdog => "hotdog",
            FoodKind::Donut => "donut",
            FoodKind::Cupcake => "cupcake",
            FoodKind::RapidFire => "rapidFire",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            FoodKind::Burger => "\u{1F354}",
            FoodKind::Pizza => "\u{1F355}",
            FoodKind::Taco => "\u{1F32E}",
            FoodKind::Hotdog => "\u{1F32D}",
            FoodKind::Donut => "\u{1F369}",
            FoodKind::Cupcake => "\u{1F9C1}",
            FoodKind::RapidFire => "\u{26A1}",
        }
    }

    /// Packed RGB for particle bursts and fallback rendering
    pub fn color(&self) -> u32 {
        match self {
            FoodKind::Burger => 0xD2691E,
            FoodKind::Pizza => 0xFF6347,
            FoodKind::Taco => 0xDEB887,
            FoodKind::Hotdog => 0xCD853F,
            FoodKind::Donut => 0xFFB6C1,
            FoodKind::Cupcake => 0xFFC0CB,
            FoodKind::RapidFire => 0xFFD700,
        }
    }

    pub fn width(&self) -> f32 {
        match self {
            FoodKind::Burger => 40.0,
            FoodKind::Pizza => 35.0,
            FoodKind::Taco => 30.0,
            FoodKind::Hotdog => 45.0,
            FoodKind::Donut => 25.0,
            FoodKind::Cupcake => 30.0,
            FoodKind::RapidFire => 35.0,
        }
    }

    pub fn height(&self) -> f32 {
        match self {
            FoodKind::Burger => 25.0,
            FoodKind::Pizza => 20.0,
            FoodKind::Taco => 22.0,
            FoodKind::Hotdog => 18.0,
            FoodKind::Donut => 25.0,
            FoodKind::Cupcake => 28.0,
            FoodKind::RapidFire => 20.0,
        }
    }

    /// Wobble amplitude while falling
    pub fn wobble(&self) -> f32 {
        match self {
            FoodKind::Burger => 0.5,
            FoodKind::Pizza => 0.3,
            FoodKind::Taco => 0.4,
            FoodKind::Hotdog => 0.2,
            FoodKind::Donut => 0.6,
            FoodKind::Cupcake => 0.7,
            FoodKind::RapidFire => 0.3,
        }
    }

    pub fn is_power_up(&self) -> bool {
        matches!(self, FoodKind::RapidFire)
    }
}

/// A falling item, alive from drop until it lands or leaves the play area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub pos: Vec2,
    pub kind: FoodKind,
    /// Captured from difficulty at drop time
    pub fall_speed: f32,
    /// Advanced each tick, drives the side-to-side wobble animation
    pub wobble_phase: f32,
}

impl FoodItem {
    pub fn width(&self) -> f32 {
        self.kind.width()
    }

    pub fn height(&self) -> f32 {
        self.kind.height()
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.height() / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height() / 2.0
    }
}

/// A landed item, part of the permanent tower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerPiece {
    pub pos: Vec2,
    pub kind: FoodKind,
    /// Idle wobble, randomized per piece so the tower doesn't sway in unison
    pub wobble_offset: f32,
    pub wobble_speed: f32,
    /// Transient shake from a crow escape (seconds remaining)
    #[serde(default)]
    pub shake_time: f32,
    #[serde(default)]
    pub shake_intensity: f32,
}

impl TowerPiece {
    pub fn width(&self) -> f32 {
        self.kind.width()
    }

    pub fn height(&self) -> f32 {
        self.kind.height()
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.height() / 2.0
    }

    /// Trigger the crow-escape shake
    pub fn shake(&mut self) {
        self.shake_time = 0.5;
        self.shake_intensity = 5.0;
    }

    pub fn decay_shake(&mut self, dt: f32) {
        if self.shake_time > 0.0 {
            self.shake_time = (self.shake_time - dt).max(0.0);
        }
    }
}

/// The transient crow threat; at most one alive at a time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crow {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Seconds left to tap it before it shakes the tower
    pub timer: f32,
    /// Wing-flap animation phase
    pub flap_phase: f32,
}

impl Crow {
    /// Whether a tap at the given point hits this crow
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius
    }
}

/// Visual style of a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Plain circle (landing bursts)
    Plain,
    /// Four-point star (power-up bursts)
    Sparkle,
}

/// A short-lived cosmetic particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Packed RGB
    pub color: u32,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
    pub gravity: f32,
    pub kind: ParticleKind,
}

/// Maximum live particles
pub const MAX_PARTICLES: usize = 256;

/// Rapid-fire power-up state (singleton on the session)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUp {
    pub active: bool,
    /// Seconds remaining
    pub remaining: f32,
}

impl PowerUp {
    pub fn activate(&mut self) {
        self.active = true;
        self.remaining = POWER_UP_DURATION;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.remaining = 0.0;
    }
}

/// Difficulty knobs, rederived from score every tick
///
/// Progress is score / 200 (roughly twenty landings to the win line).
/// Intentionally unclamped: late-game speed growth is the escalation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Difficulty {
    /// Drop-line oscillation speed (px/s)
    pub line_speed: f32,
    /// Fall speed given to newly dropped items (px/s)
    pub drop_speed: f32,
    /// Per-tick crow spawn probability
    pub crow_chance: f32,
}

impl Difficulty {
    pub fn for_score(score: u32) -> Self {
        let progress = score as f32 / 200.0;
        Self {
            line_speed: 100.0 + progress * 100.0,
            drop_speed: 200.0 + progress * 50.0,
            crow_chance: 0.002 + progress * 0.003,
        }
    }

    pub fn retune(&mut self, score: u32) {
        *self = Self::for_score(score);
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::for_score(0)
    }
}

/// The oscillating horizontal bar items drop from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropLine {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// +1 rightward, -1 leftward
    pub direction: f32,
    pub speed: f32,
}

impl DropLine {
    pub fn new(speed: f32) -> Self {
        Self {
            x: PLAY_WIDTH / 2.0,
            y: DROP_LINE_Y,
            width: DROP_LINE_WIDTH,
            direction: 1.0,
            speed,
        }
    }

    /// Move the line, flipping direction exactly at the play-area edges
    pub fn advance(&mut self, dt: f32) {
        self.x += self.direction * self.speed * dt;

        let half = self.width / 2.0;
        if self.x - half <= 0.0 {
            self.x = half;
            self.direction = 1.0;
        } else if self.x + half >= PLAY_WIDTH {
            self.x = PLAY_WIDTH - half;
            self.direction = -1.0;
        }
    }
}

/// Discrete notifications for the host (sound cues, HUD flashes)
///
/// Drained once per frame via `GameSession::drain_events`.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    FoodDropped { kind: FoodKind },
    FoodLanded { kind: FoodKind, pos: Vec2 },
    FoodLost { kind: FoodKind },
    PowerUpCollected,
    PowerUpExpired,
    CrowSpawned,
    CrowHit,
    CrowEscaped,
    NewHighScore { score: u32 },
    GameEnded { outcome: Outcome },
}

fn session_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete session state - owns every live collection exclusively
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Set when `phase` is `GameOver`
    pub outcome: Option<Outcome>,
    pub score: u32,
    pub health: u8,
    pub high_score: u32,
    /// Session clock (seconds of simulated time)
    pub elapsed: f32,
    /// Clock value of the last accepted tap
    pub last_tap: f32,
    /// Clock value of the last accepted drop
    pub last_drop: f32,
    pub drop_line: DropLine,
    pub food_items: Vec<FoodItem>,
    pub tower: Vec<TowerPiece>,
    pub crow: Option<Crow>,
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub power_up: PowerUp,
    pub difficulty: Difficulty,
    #[serde(skip)]
    events: Vec<GameEvent>,
    #[serde(skip, default = "session_rng")]
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// Create a session sitting at the menu
    pub fn new(seed: u64) -> Self {
        let difficulty = Difficulty::default();
        Self {
            seed,
            phase: GamePhase::Menu,
            outcome: None,
            score: 0,
            health: MAX_HEALTH,
            high_score: 0,
            elapsed: 0.0,
            last_tap: -TAP_DEBOUNCE,
            last_drop: -DROP_COOLDOWN,
            drop_line: DropLine::new(difficulty.line_speed),
            food_items: Vec::new(),
            tower: Vec::new(),
            crow: None,
            particles: Vec::new(),
            power_up: PowerUp::default(),
            difficulty,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed the session's high score from the persistence collaborator
    pub fn set_high_score(&mut self, best: u32) {
        self.high_score = best;
    }

    // --- State machine commands ---

    /// Begin a fresh run: reset score, health, difficulty, and all collections
    pub fn start(&mut self) {
        log::info!("Starting new game (seed {})", self.seed);

        self.phase = GamePhase::Playing;
        self.outcome = None;
        self.score = 0;
        self.health = MAX_HEALTH;
        self.elapsed = 0.0;
        self.last_tap = -TAP_DEBOUNCE;
        self.last_drop = -DROP_COOLDOWN;
        self.difficulty = Difficulty::default();
        self.drop_line = DropLine::new(self.difficulty.line_speed);
        self.food_items.clear();
        self.tower.clear();
        self.crow = None;
        self.particles.clear();
        self.power_up.deactivate();
        self.events.clear();
    }

    /// Freeze the simulation; the host re-baselines its frame clock on resume
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            log::info!("Game resumed");
        }
    }

    /// Restart from pause or game over
    pub fn restart(&mut self) {
        self.start();
    }

    /// Back to the menu, discarding the run
    pub fn quit(&mut self) {
        self.phase = GamePhase::Menu;
        log::info!("Returned to main menu");
    }

    // --- Input commands ---

    /// Normalized tap at play-area coordinates: swats the crow if hit,
    /// otherwise falls through to a drop attempt
    pub fn tap_at(&mut self, x: f32, y: f32) {
        if self.phase != GamePhase::Playing || !self.accept_tap() {
            return;
        }

        let hit_crow = self
            .crow
            .as_ref()
            .is_some_and(|crow| crow.contains(Vec2::new(x, y)));
        if hit_crow {
            self.crow = None;
            self.gain_health();
            self.push_event(GameEvent::CrowHit);
            log::info!("Crow hit, health now {}", self.health);
            return;
        }

        self.try_drop();
    }

    /// Drop request from a source with no useful position (space bar)
    pub fn request_drop(&mut self) {
        if self.phase != GamePhase::Playing || !self.accept_tap() {
            return;
        }
        self.try_drop();
    }

    /// Debounce rapid taps; waived under rapid fire (spam-clicking is the
    /// whole point of the power-up)
    fn accept_tap(&mut self) -> bool {
        if !self.power_up.active && self.elapsed - self.last_tap < TAP_DEBOUNCE {
            return false;
        }
        self.last_tap = self.elapsed;
        true
    }

    /// Gate-checked drop: honors the cooldown and the single-item-in-flight
    /// rule, both waived while rapid fire is active
    fn try_drop(&mut self) {
        if !self.power_up.active {
            if self.elapsed - self.last_drop < DROP_COOLDOWN {
                log::debug!(
                    "Drop on cooldown ({:.1}s remaining)",
                    self.drop_cooldown_remaining()
                );
                return;
            }
            if !self.food_items.is_empty() {
                log::debug!("Drop blocked, {} items still falling", self.food_items.len());
                return;
            }
            self.last_drop = self.elapsed;
        }

        let food = super::spawn::spawn_food(self);
        log::debug!("Dropped {} at x:{:.0}", food.kind.name(), food.pos.x);
        self.push_event(GameEvent::FoodDropped { kind: food.kind });
        self.food_items.push(food);
    }

    /// Seconds until the next non-rapid-fire drop is allowed
    pub fn drop_cooldown_remaining(&self) -> f32 {
        if self.power_up.active {
            return 0.0;
        }
        (DROP_COOLDOWN - (self.elapsed - self.last_drop)).max(0.0)
    }

    // --- Health and scoring ---

    pub fn lose_health(&mut self) {
        self.health = self.health.saturating_sub(1);
        log::info!("Health lost, remaining: {}", self.health);

        if self.health == 0 {
            self.end_session(Outcome::Loss);
        }
    }

    pub fn gain_health(&mut self) {
        if self.health < MAX_HEALTH {
            self.health += 1;
        }
    }

    /// Convert a landed item into a permanent tower piece
    pub fn add_to_tower(&mut self, food: &FoodItem) {
        let wobble_offset = self.rng.random::<f32>() * std::f32::consts::TAU;
        let wobble_speed = 0.5 + self.rng.random::<f32>() * 0.5;
        self.tower.push(TowerPiece {
            pos: food.pos,
            kind: food.kind,
            wobble_offset,
            wobble_speed,
            shake_time: 0.0,
            shake_intensity: 0.0,
        });
    }

    /// Crow escaped: rattle every standing piece
    pub fn shake_tower(&mut self) {
        for piece in &mut self.tower {
            piece.shake();
        }
    }

    /// End the run, recording the outcome and any new high score
    pub fn end_session(&mut self, outcome: Outcome) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        log::info!(
            "Game over - {} (score {})",
            if outcome == Outcome::Win { "win" } else { "loss" },
            self.score
        );

        self.phase = GamePhase::GameOver;
        self.outcome = Some(outcome);

        if self.score > self.high_score {
            self.high_score = self.score;
            self.push_event(GameEvent::NewHighScore { score: self.score });
        }
        self.push_event(GameEvent::GameEnded { outcome });
    }

    // --- Events ---

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this frame's discrete events (sound cues, HUD flashes)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
