//! Data-driven game balance
//!
//! Keep this separate from runtime configuration (seeds, quality, effects).

pub mod boxing;
pub mod helicopter;

pub use boxing::{AiTuning, AttackProfile, BoxingTuning};
pub use helicopter::{HelicopterTuning, HostileProfile};
