//! Shared simulation building blocks
//!
//! Everything here is platform-free:
//! - Input latch sampled once per tick
//! - AABB collision
//! - Cosmetic particle pool
//! - Seeded RNG helpers

pub mod collision;
pub mod input;
pub mod particles;

pub use collision::Aabb;
pub use input::{InputLatch, InputSource, KeyTransition, NoInput, SharedLatch};
pub use particles::{Particle, ParticleKind, Particles};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Build the engine RNG from a run seed
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Placeholder RNG for deserialized states (the real stream is not persisted)
pub fn default_rng() -> Pcg32 {
    seeded_rng(0)
}

/// Uniform sample in [-0.5, 0.5) scaled by `spread`
#[inline]
pub fn jitter(rng: &mut Pcg32, spread: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * spread
}
