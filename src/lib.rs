//! Arcade Legends - canvas boxing and helicopter-combat engines
//!
//! Core modules:
//! - `sim`: Shared simulation pieces (input latch, AABB collision, particles)
//! - `boxing`: Fight-night boxing engine (state machine + meter economy)
//! - `helicopter`: Side-scrolling helicopter shooter (physics + spawner)
//! - `renderer`: Backend-free draw lists and the Canvas 2D backend
//! - `engine`: Lifecycle facade shared by both engines
//! - `tuning`: Data-driven game balance
//! - `settings`: Host configuration

pub mod boxing;
pub mod engine;
pub mod error;
pub mod helicopter;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::{Engine, Simulation};
pub use error::EngineError;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, attack frames are counted in these ticks)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the loop will accept (tab switches, breakpoints)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Boxing viewport
    pub const BOXING_WIDTH: f32 = 1200.0;
    pub const BOXING_HEIGHT: f32 = 700.0;

    /// Helicopter viewport
    pub const HELI_WIDTH: f32 = 1200.0;
    pub const HELI_HEIGHT: f32 = 600.0;
}
