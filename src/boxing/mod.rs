//! Fight-night boxing engine
//!
//! Player versus a computer opponent, best of five rounds:
//! - `state`: boxers, special projectiles, particles, round bookkeeping
//! - `tick`: per-boxer state machine, combo/meter economy, rounds
//! - `ai`: stochastic opponent controller
//! - `pose`: stick-figure animation derived at render time
//! - `render`: frame builder

pub mod ai;
pub mod pose;
pub mod render;
pub mod roster;
pub mod state;
pub mod tick;

pub use roster::{Fighter, SpecialKind};
pub use state::{AttackKind, Boxer, BoxerState, BoxingState, Facing, GameMode, Side, Stance};
pub use tick::{RoundOutcome, tick};

use serde::{Deserialize, Serialize};

use crate::engine::{Engine, Simulation};
use crate::renderer::Frame;
use crate::sim::InputLatch;

/// Facade type the host drives
pub type BoxingEngine = Engine<BoxingState>;

/// Snapshot for the host UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxingStats {
    pub round: u32,
    /// Whole seconds left in the round
    pub timer: u32,
    pub player_health: f32,
    pub opponent_health: f32,
    pub round_wins: [u32; 2],
    pub coins: u32,
    pub trophies: u32,
    pub mode: GameMode,
}

impl Simulation for BoxingState {
    type Stats = BoxingStats;

    fn tick(&mut self, input: &InputLatch, dt: f32) {
        tick::tick(self, input, dt);
    }

    fn render(&self, time: f32) -> Frame {
        render::render(self, time)
    }

    fn reset(&mut self) {
        BoxingState::reset(self);
    }

    fn is_terminal(&self) -> bool {
        self.is_over()
    }

    fn stats(&self) -> BoxingStats {
        let player = self.player();
        BoxingStats {
            round: self.round,
            timer: self.timer.ceil() as u32,
            player_health: player.health,
            opponent_health: self.opponent().health,
            round_wins: self.round_wins,
            coins: player.coins,
            trophies: player.trophies,
            mode: self.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::NoInput;

    #[test]
    fn test_engine_runs_boxing() {
        let state = BoxingState::new(Fighter::MikeTyson, 9, &Settings::default());
        let mut engine: BoxingEngine = Engine::new(state, Box::new(NoInput)).unwrap();
        engine.start();
        engine.frame(0.0);
        for i in 1..=90 {
            engine.frame(i as f64 * 1000.0 / 60.0);
        }
        let stats = engine.stats();
        assert_eq!(stats.round, 1);
        assert_eq!(stats.timer, 179);
        assert_eq!(stats.mode, GameMode::Fighting);
        assert!(!engine.is_terminal());
    }

    #[test]
    fn test_stats_serialize_for_host() {
        let state = BoxingState::new(Fighter::MikeTyson, 9, &Settings::default());
        let json = serde_json::to_string(&state.stats()).unwrap();
        assert!(json.contains("\"round\":1"));
        assert!(json.contains("\"mode\":\"Fighting\""));
    }
}
