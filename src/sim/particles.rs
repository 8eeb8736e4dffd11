//! Cosmetic particles shared by both engines
//!
//! Particles never feed back into gameplay. Each engine supplies its own
//! kind enum, which decides whether gravity pulls on a particle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::Color;

/// Per-kind behaviour
pub trait ParticleKind: Copy {
    /// Downward acceleration in px/s²
    fn gravity(self) -> f32;
}

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle<K> {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
    pub max_life: f32,
    pub color: Color,
    pub size: f32,
    pub kind: K,
}

impl<K> Particle<K> {
    /// Remaining life in 0..=1, used as draw alpha
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Bounded particle collection; the oldest particle makes room for new ones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particles<K> {
    items: Vec<Particle<K>>,
    cap: usize,
}

impl<K: ParticleKind> Particles<K> {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn emit(&mut self, particle: Particle<K>) {
        if self.cap == 0 {
            return;
        }
        if self.items.len() >= self.cap {
            // Remove oldest particles to make room
            self.items.remove(0);
        }
        self.items.push(particle);
    }

    /// Integrate, age, and reap expired particles
    pub fn update(&mut self, dt: f32) {
        for p in self.items.iter_mut() {
            p.pos += p.vel * dt;
            p.life -= dt;
            p.vel.y += p.kind.gravity() * dt;
        }
        self.items.retain(|p| p.life > 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle<K>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Dust {
        Floating,
        Falling,
    }

    impl ParticleKind for Dust {
        fn gravity(self) -> f32 {
            match self {
                Dust::Floating => 0.0,
                Dust::Falling => 100.0,
            }
        }
    }

    fn dust(kind: Dust, life: f32) -> Particle<Dust> {
        Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(10.0, 0.0),
            life,
            max_life: life,
            color: Color::WHITE,
            size: 2.0,
            kind,
        }
    }

    #[test]
    fn test_gravity_only_for_falling_kinds() {
        let mut pool = Particles::with_cap(8);
        pool.emit(dust(Dust::Floating, 1.0));
        pool.emit(dust(Dust::Falling, 1.0));
        pool.update(0.5);

        let v: Vec<_> = pool.iter().map(|p| p.vel.y).collect();
        assert_eq!(v[0], 0.0);
        assert!((v[1] - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_expired_particles_are_reaped() {
        let mut pool = Particles::with_cap(8);
        pool.emit(dust(Dust::Floating, 0.1));
        pool.emit(dust(Dust::Floating, 1.0));
        pool.update(0.2);
        assert_eq!(pool.len(), 1);
        assert!(pool.iter().all(|p| p.life > 0.0));
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut pool = Particles::with_cap(2);
        pool.emit(dust(Dust::Floating, 1.0));
        pool.emit(dust(Dust::Floating, 2.0));
        pool.emit(dust(Dust::Floating, 3.0));
        assert_eq!(pool.len(), 2);
        let lives: Vec<_> = pool.iter().map(|p| p.life).collect();
        assert_eq!(lives, vec![2.0, 3.0]);
    }

    #[test]
    fn test_zero_cap_disables_particles() {
        let mut pool = Particles::with_cap(0);
        pool.emit(dust(Dust::Floating, 1.0));
        assert!(pool.is_empty());
    }
}
