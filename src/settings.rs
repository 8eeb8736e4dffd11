//! Host configuration
//!
//! The host page may hand a JSON object to an engine constructor; every
//! field is optional and falls back to its default.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::tuning::{AiTuning, BoxingTuning, HelicopterTuning};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle effects (hits, explosions, coins)
    pub particles: bool,
    /// Ring shake on heavy impacts
    pub screen_shake: bool,
    /// Reduced motion (no shake)
    pub reduced_motion: bool,

    // === Simulation ===
    /// Fixed run seed; the host picks one from the clock when absent
    pub seed: Option<u64>,
    pub boxing: BoxingTuning,
    pub ai: AiTuning,
    pub helicopter: HelicopterTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            screen_shake: true,
            reduced_motion: false,
            seed: None,
            boxing: BoxingTuning::default(),
            ai: AiTuning::default(),
            helicopter: HelicopterTuning::default(),
        }
    }
}

impl Settings {
    /// Parse host-supplied JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings: Settings = serde_json::from_str(json)?;
        log::info!(
            "Loaded settings (quality {}, seed {:?})",
            settings.quality.as_str(),
            settings.seed
        );
        Ok(settings)
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }
}
