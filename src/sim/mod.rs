//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped variable timestep, driven by the host's frame clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Landing, resolve_food_collision};
pub use spawn::{maybe_spawn_crow, spawn_food};
pub use state::{
    Crow, Difficulty, DropLine, FoodItem, FoodKind, GameEvent, GamePhase, GameSession, Outcome,
    Particle, ParticleKind, PowerUp, TowerPiece, MAX_PARTICLES,
};
pub use tick::tick;
