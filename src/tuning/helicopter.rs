//! Gameplay tuning for the helicopter engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::helicopter::HostileKind;

/// Fixed profile of one hostile aircraft type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostileProfile {
    pub size: Vec2,
    pub health: f32,

    /// Leftward speed at level 0, px/s.
    pub base_speed: f32,
    /// Extra leftward speed per level, px/s.
    pub speed_per_level: f32,

    /// Multiplier on the sine phase.
    pub wave_freq: f32,
    /// Vertical speed amplitude, px/s.
    pub wave_amp: f32,

    pub score: u64,
    pub coins: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelicopterTuning {
    pub start_pos: Vec2,
    pub size: Vec2,
    pub max_health: f32,

    /// Velocity added per tick per held movement key, px/s.
    pub thrust: f32,
    /// Velocity multiplier applied every tick.
    pub drag: f32,
    /// Radians of tilt per px/s of horizontal velocity.
    pub tilt_factor: f32,
    /// Rotor phase advance per tick.
    pub rotor_step: f32,
    /// Distance the helicopter keeps from every canvas edge.
    pub edge_margin: f32,

    /// Minimum simulation milliseconds between two shots.
    pub fire_interval_ms: f64,
    pub fireball_speed: f32,
    pub fireball_size: Vec2,
    pub fireball_damage: f32,
    pub trail_len: usize,
    /// Projectiles further than this outside the canvas are reaped.
    pub projectile_margin: f32,

    pub spawn_base_ms: f32,
    pub spawn_step_ms: f32,
    pub spawn_floor_ms: f32,
    pub level_interval_ms: f32,

    /// Player damage from ramming a hostile.
    pub contact_damage: f32,
    /// Hostiles are kept this far from the top and bottom edges.
    pub hostile_margin_y: f32,
    /// Hostiles left of this x are reaped.
    pub despawn_x: f32,

    pub fighter: HostileProfile,
    pub bomber: HostileProfile,
    pub scout: HostileProfile,
}

impl Default for HelicopterTuning {
    fn default() -> Self {
        Self {
            start_pos: Vec2::new(100.0, 300.0),
            size: Vec2::new(80.0, 40.0),
            max_health: 100.0,
            thrust: 300.0 * 0.02,
            drag: 0.95,
            tilt_factor: 0.01,
            rotor_step: 0.5,
            edge_margin: 40.0,
            fire_interval_ms: 200.0,
            fireball_speed: 600.0,
            fireball_size: Vec2::new(20.0, 10.0),
            fireball_damage: 25.0,
            trail_len: 8,
            projectile_margin: 50.0,
            spawn_base_ms: 1000.0,
            spawn_step_ms: 100.0,
            spawn_floor_ms: 300.0,
            level_interval_ms: 30_000.0,
            contact_damage: 20.0,
            hostile_margin_y: 20.0,
            despawn_x: -100.0,
            fighter: HostileProfile {
                size: Vec2::new(50.0, 25.0),
                health: 25.0,
                base_speed: 200.0,
                speed_per_level: 20.0,
                wave_freq: 1.0,
                wave_amp: 50.0,
                score: 100,
                coins: 10,
            },
            bomber: HostileProfile {
                size: Vec2::new(70.0, 35.0),
                health: 50.0,
                base_speed: 150.0,
                speed_per_level: 15.0,
                wave_freq: 0.5,
                wave_amp: 30.0,
                score: 200,
                coins: 15,
            },
            scout: HostileProfile {
                size: Vec2::new(50.0, 25.0),
                health: 25.0,
                base_speed: 300.0,
                speed_per_level: 30.0,
                wave_freq: 2.0,
                wave_amp: 80.0,
                score: 50,
                coins: 5,
            },
        }
    }
}

impl HelicopterTuning {
    pub fn profile(&self, kind: HostileKind) -> &HostileProfile {
        match kind {
            HostileKind::Fighter => &self.fighter,
            HostileKind::Bomber => &self.bomber,
            HostileKind::Scout => &self.scout,
        }
    }

    /// Milliseconds between spawns at `level`, never below the floor
    pub fn spawn_interval(&self, level: u32) -> f32 {
        (self.spawn_base_ms - level as f32 * self.spawn_step_ms).max(self.spawn_floor_ms)
    }
}
