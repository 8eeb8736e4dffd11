//! Side-scrolling helicopter shooter
//!
//! The player flies a momentum-driven helicopter, fires rate-limited
//! fireballs, and survives waves of hostiles that speed up with the level.

pub mod render;
pub mod state;
pub mod tick;

pub use state::{Fireball, HeliMode, Helicopter, HelicopterState, Hostile, HostileKind};
pub use tick::{tick, try_fire};

use serde::{Deserialize, Serialize};

use crate::engine::{Engine, Simulation};
use crate::renderer::Frame;
use crate::sim::InputLatch;

pub type HelicopterEngine = Engine<HelicopterState>;

/// Snapshot pushed to the host after every tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeliStats {
    pub score: u64,
    pub coins: u64,
    pub enemies_destroyed: u32,
    pub level: u32,
}

impl Simulation for HelicopterState {
    type Stats = HeliStats;

    fn tick(&mut self, input: &InputLatch, dt: f32) {
        tick::tick(self, input, dt);
    }

    fn render(&self, time: f32) -> Frame {
        render::render(self, time)
    }

    fn reset(&mut self) {
        HelicopterState::reset(self);
    }

    fn is_terminal(&self) -> bool {
        self.mode == HeliMode::GameOver
    }

    fn stats(&self) -> HeliStats {
        HeliStats {
            score: self.score,
            coins: self.coins,
            enemies_destroyed: self.enemies_destroyed,
            level: self.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::NoInput;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_stats_hook_fires_per_tick() {
        let state = HelicopterState::new(2, &Settings::default());
        let mut engine: HelicopterEngine = Engine::new(state, Box::new(NoInput)).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.on_stats(move |stats| sink.borrow_mut().push(stats));

        engine.start();
        engine.frame(0.0);
        let ticks = engine.frame(60.0);
        assert_eq!(seen.borrow().len(), ticks);
        assert_eq!(seen.borrow()[0].level, 1);
    }

    #[test]
    fn test_stats_json_keys() {
        let state = HelicopterState::new(2, &Settings::default());
        let json = serde_json::to_string(&state.stats()).unwrap();
        assert_eq!(json, r#"{"score":0,"coins":0,"enemiesDestroyed":0,"level":1}"#);
    }
}
