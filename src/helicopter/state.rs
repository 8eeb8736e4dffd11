//! Helicopter game state and entity types
//!
//! Positions are centers; every hitbox is built with `Aabb::centered`.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{HELI_HEIGHT, HELI_WIDTH};
use crate::renderer::Color;
use crate::settings::Settings;
use crate::sim::{Aabb, Particle, ParticleKind, Particles, default_rng, jitter, seeded_rng};
use crate::tuning::HelicopterTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostileKind {
    Fighter,
    Bomber,
    Scout,
}

impl HostileKind {
    pub const ALL: [HostileKind; 3] = [HostileKind::Fighter, HostileKind::Bomber, HostileKind::Scout];

    pub fn color(self) -> Color {
        match self {
            HostileKind::Fighter => Color::hex(0xff4444),
            HostileKind::Bomber => Color::hex(0xff8800),
            HostileKind::Scout => Color::hex(0x44ff44),
        }
    }
}

/// The player's aircraft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Helicopter {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: f32,
    /// Visual tilt (radians), follows horizontal speed
    pub angle: f32,
    /// Rotor animation phase, only ever grows
    pub rotor_angle: f32,
}

impl Helicopter {
    pub fn new(tuning: &HelicopterTuning) -> Self {
        Self {
            pos: tuning.start_pos,
            vel: Vec2::ZERO,
            size: tuning.size,
            health: tuning.max_health,
            angle: 0.0,
            rotor_angle: 0.0,
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::centered(self.pos, self.size)
    }
}

/// Enemy aircraft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    pub kind: HostileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: f32,
    /// Soft-delete marker; cleared entries are reaped within the same tick
    pub active: bool,
    /// Sine phase accumulator (seconds)
    pub pattern: f32,
}

impl Hostile {
    pub fn hitbox(&self) -> Aabb {
        Aabb::centered(self.pos, self.size)
    }
}

/// Player shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fireball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub damage: f32,
    pub active: bool,
    /// Recent positions, oldest first
    pub trail: Vec<Vec2>,
}

impl Fireball {
    pub fn hitbox(&self) -> Aabb {
        Aabb::centered(self.pos, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeliParticleKind {
    Explosion,
    Smoke,
    Fire,
    Coin,
}

impl ParticleKind for HeliParticleKind {
    fn gravity(self) -> f32 {
        match self {
            HeliParticleKind::Explosion | HeliParticleKind::Coin => 200.0,
            HeliParticleKind::Smoke | HeliParticleKind::Fire => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeliMode {
    Playing,
    GameOver,
}

/// Aggregate root for one helicopter engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelicopterState {
    pub helicopter: Helicopter,
    pub hostiles: Vec<Hostile>,
    pub fireballs: Vec<Fireball>,
    pub particles: Particles<HeliParticleKind>,
    pub mode: HeliMode,
    pub score: u64,
    pub coins: u64,
    pub enemies_destroyed: u32,
    pub level: u32,
    pub spawn_timer_ms: f32,
    pub level_timer_ms: f32,
    /// Simulation milliseconds since the run began
    pub clock_ms: f64,
    pub last_fire_ms: Option<f64>,
    pub tuning: HelicopterTuning,
    pub seed: u64,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    next_id: u32,
}

impl HelicopterState {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let tuning = settings.helicopter.clone();
        log::info!("Helicopter run (seed {})", seed);

        Self {
            helicopter: Helicopter::new(&tuning),
            hostiles: Vec::new(),
            fireballs: Vec::new(),
            particles: Particles::with_cap(settings.max_particles()),
            mode: HeliMode::Playing,
            score: 0,
            coins: 0,
            enemies_destroyed: 0,
            level: 1,
            spawn_timer_ms: 0.0,
            level_timer_ms: 0.0,
            clock_ms: 0.0,
            last_fire_ms: None,
            tuning,
            seed,
            rng: seeded_rng(seed),
            next_id: 1,
        }
    }

    /// Fresh run; the RNG stream carries on
    pub fn reset(&mut self) {
        self.helicopter = Helicopter::new(&self.tuning);
        self.hostiles.clear();
        self.fireballs.clear();
        self.particles.clear();
        self.mode = HeliMode::Playing;
        self.score = 0;
        self.coins = 0;
        self.enemies_destroyed = 0;
        self.level = 1;
        self.spawn_timer_ms = 0.0;
        self.level_timer_ms = 0.0;
        self.clock_ms = 0.0;
        self.last_fire_ms = None;
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Launch a hostile of `kind` just off the right edge
    pub fn spawn_hostile(&mut self, kind: HostileKind) {
        let profile = *self.tuning.profile(kind);
        let y = 50.0 + self.rng.random::<f32>() * (HELI_HEIGHT - 100.0);
        let pattern = self.rng.random::<f32>() * TAU;
        let id = self.next_entity_id();

        self.hostiles.push(Hostile {
            id,
            kind,
            pos: Vec2::new(HELI_WIDTH + 50.0, y),
            vel: Vec2::ZERO,
            size: profile.size,
            health: profile.health,
            active: true,
            pattern,
        });
    }

    // === Effects ===

    /// Muzzle flash
    pub fn fire_burst(&mut self, at: Vec2) {
        for _ in 0..5 {
            let vel = Vec2::new(jitter(&mut self.rng, 100.0), jitter(&mut self.rng, 100.0));
            let size = self.rng.random::<f32>() * 4.0 + 2.0;
            self.emit(at, vel, 0.3, Color::hex(0xff6600), size, HeliParticleKind::Fire);
        }
    }

    /// Small impact burst
    pub fn explosion(&mut self, at: Vec2) {
        for i in 0..10 {
            let vel = Vec2::new(jitter(&mut self.rng, 400.0), jitter(&mut self.rng, 400.0));
            let color = if i % 2 == 0 {
                Color::hex(0xff4400)
            } else {
                Color::hex(0xffaa00)
            };
            let size = self.rng.random::<f32>() * 8.0 + 4.0;
            self.emit(at, vel, 0.8, color, size, HeliParticleKind::Explosion);
        }
    }

    /// Wreck of a destroyed hostile
    pub fn big_explosion(&mut self, at: Vec2) {
        const SHADES: [u32; 4] = [0xff0000, 0xff6600, 0xffaa00, 0xffffff];
        for _ in 0..20 {
            let vel = Vec2::new(jitter(&mut self.rng, 600.0), jitter(&mut self.rng, 600.0));
            let color = Color::hex(SHADES[self.rng.random_range(0..SHADES.len())]);
            let size = self.rng.random::<f32>() * 15.0 + 8.0;
            self.emit(at, vel, 1.2, color, size, HeliParticleKind::Explosion);
        }
    }

    pub fn coin_burst(&mut self, at: Vec2) {
        for _ in 0..8 {
            let vel = Vec2::new(jitter(&mut self.rng, 200.0), -self.rng.random::<f32>() * 200.0 - 100.0);
            let size = self.rng.random::<f32>() * 6.0 + 4.0;
            self.emit(at, vel, 1.5, Color::hex(0xffd700), size, HeliParticleKind::Coin);
        }
    }

    /// Slow dark puffs from a damaged helicopter
    pub fn smoke(&mut self, at: Vec2) {
        for _ in 0..4 {
            let vel = Vec2::new(jitter(&mut self.rng, 60.0) - 40.0, -self.rng.random::<f32>() * 40.0 - 10.0);
            let size = self.rng.random::<f32>() * 8.0 + 8.0;
            self.emit(at, vel, 1.0, Color::rgba(60, 60, 60, 0.7), size, HeliParticleKind::Smoke);
        }
    }

    fn emit(&mut self, pos: Vec2, vel: Vec2, life: f32, color: Color, size: f32, kind: HeliParticleKind) {
        self.particles.emit(Particle {
            pos,
            vel,
            life,
            max_life: life,
            color,
            size,
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run() {
        let state = HelicopterState::new(1, &Settings::default());
        assert_eq!(state.helicopter.pos, Vec2::new(100.0, 300.0));
        assert_eq!(state.helicopter.health, 100.0);
        assert_eq!(state.level, 1);
        assert_eq!(state.mode, HeliMode::Playing);
        assert!(state.hostiles.is_empty());
    }

    #[test]
    fn test_spawn_uses_profile() {
        let mut state = HelicopterState::new(1, &Settings::default());
        state.spawn_hostile(HostileKind::Bomber);
        let h = &state.hostiles[0];
        assert_eq!(h.size, Vec2::new(70.0, 35.0));
        assert_eq!(h.health, 50.0);
        assert_eq!(h.pos.x, 1250.0);
        assert!((50.0..=550.0).contains(&h.pos.y));
        assert!((0.0..TAU).contains(&h.pattern));
    }

    #[test]
    fn test_hitbox_is_centered() {
        let state = HelicopterState::new(1, &Settings::default());
        let hb = state.helicopter.hitbox();
        assert_eq!(hb.min, Vec2::new(60.0, 280.0));
        assert_eq!(hb.size, Vec2::new(80.0, 40.0));
    }
}
