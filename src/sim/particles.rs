//! Cosmetic particle bursts
//!
//! Purely visual: no feedback into scoring or collision. Each burst is a
//! radial fan with jittered angle, speed, and lifespan; particles then fly
//! independent ballistic arcs until their life runs out.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{GameSession, Particle, ParticleKind, MAX_PARTICLES};

/// Palette for power-up sparkles
const SPARKLE_COLORS: [u32; 5] = [0xFFD700, 0xFFA500, 0xFF6B6B, 0x4ECDC4, 0x45B7D1];

/// Burst for a successful landing: 8-13 plain particles in the item's color
pub fn emit_success(session: &mut GameSession, origin: Vec2, color: u32) {
    let count = 8 + session.rng.random_range(0..6);

    for i in 0..count {
        if session.particles.len() >= MAX_PARTICLES {
            break;
        }
        let angle = TAU * i as f32 / count as f32 + (session.rng.random::<f32>() - 0.5) * 0.5;
        let speed = 100.0 + session.rng.random::<f32>() * 100.0;

        session.particles.push(Particle {
            pos: origin,
            // Slight upward bias so the burst reads as a bounce
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 50.0),
            color,
            size: 3.0 + session.rng.random::<f32>() * 4.0,
            life: 1.0,
            max_life: 1.0,
            gravity: 300.0,
            kind: ParticleKind::Plain,
        });
    }
}

/// Burst for a power-up pickup: 12-19 sparkles from the gold/teal palette
pub fn emit_power_up(session: &mut GameSession, origin: Vec2) {
    let count = 12 + session.rng.random_range(0..8);

    for i in 0..count {
        if session.particles.len() >= MAX_PARTICLES {
            break;
        }
        let angle = TAU * i as f32 / count as f32 + (session.rng.random::<f32>() - 0.5) * 0.3;
        let speed = 120.0 + session.rng.random::<f32>() * 80.0;

        session.particles.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 80.0),
            color: SPARKLE_COLORS[session.rng.random_range(0..SPARKLE_COLORS.len())],
            size: 4.0 + session.rng.random::<f32>() * 5.0,
            life: 1.5,
            max_life: 1.5,
            gravity: 200.0,
            kind: ParticleKind::Sparkle,
        });
    }
}

/// Ballistic integration; dead particles are pruned in place
pub fn update(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel.y += particle.gravity * dt;
        particle.life -= dt;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_burst_count_in_range() {
        let mut session = GameSession::new(21);
        session.start();

        for _ in 0..50 {
            session.particles.clear();
            emit_success(&mut session, Vec2::new(400.0, 500.0), 0xD2691E);
            let n = session.particles.len();
            assert!((8..=13).contains(&n), "got {n}");
            assert!(session
                .particles
                .iter()
                .all(|p| p.kind == ParticleKind::Plain));
        }
    }

    #[test]
    fn test_power_up_burst_count_in_range() {
        let mut session = GameSession::new(22);
        session.start();

        for _ in 0..50 {
            session.particles.clear();
            emit_power_up(&mut session, Vec2::new(400.0, 500.0));
            let n = session.particles.len();
            assert!((12..=19).contains(&n), "got {n}");
            assert!(session
                .particles
                .iter()
                .all(|p| p.kind == ParticleKind::Sparkle));
        }
    }

    #[test]
    fn test_particles_pruned_within_max_life() {
        let mut session = GameSession::new(23);
        session.start();
        emit_success(&mut session, Vec2::new(400.0, 500.0), 0xFF6347);
        emit_power_up(&mut session, Vec2::new(400.0, 500.0));

        // Longest lifespan is 1.5s; step just past it
        let steps = (1.6 / (1.0 / 60.0)) as usize;
        for _ in 0..steps {
            update(&mut session.particles, 1.0 / 60.0);
        }
        assert!(session.particles.is_empty());
    }

    #[test]
    fn test_gravity_pulls_particles_down() {
        let mut particles = vec![Particle {
            pos: Vec2::new(0.0, 0.0),
            vel: Vec2::new(0.0, -100.0),
            color: 0xFFFFFF,
            size: 4.0,
            life: 1.0,
            max_life: 1.0,
            gravity: 300.0,
            kind: ParticleKind::Plain,
        }];

        update(&mut particles, 0.1);
        // Velocity gained 30 px/s downward
        assert!((particles[0].vel.y - (-70.0)).abs() < 0.001);
    }

    #[test]
    fn test_burst_capped_at_max_particles() {
        let mut session = GameSession::new(24);
        session.start();

        for _ in 0..40 {
            emit_power_up(&mut session, Vec2::new(400.0, 500.0));
        }
        assert!(session.particles.len() <= MAX_PARTICLES);
    }
}
