//! Gameplay tuning for the boxing engine.
//!
//! Defaults are the shipped balance numbers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Cost, duration, reach, and damage of one melee punch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackProfile {
    /// Stamina consumed when the punch is thrown.
    pub stamina_cost: f32,

    /// Simulation ticks the punch occupies.
    pub frames: u32,

    /// Maximum horizontal distance between fighters for the punch to land.
    pub range: f32,

    /// Damage before blocking and combo scaling.
    pub damage: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxingTuning {
    pub max_health: f32,
    pub max_stamina: f32,
    pub max_special_meter: f32,

    /// Stamina regained per second (not while knocked down).
    pub stamina_regen: f32,

    /// Player walk speed in pixels per second.
    pub walk_speed: f32,

    /// Horizontal velocity multiplier applied every tick.
    pub friction: f32,

    pub ring_min_x: f32,
    pub ring_max_x: f32,
    pub floor_y: f32,
    pub body_size: Vec2,
    pub player_start_x: f32,
    pub opponent_start_x: f32,

    pub jab: AttackProfile,
    pub hook: AttackProfile,
    pub uppercut: AttackProfile,

    /// Meter required (and consumed) by a special.
    pub special_cost: f32,
    /// Seconds before another special may be thrown.
    pub special_cooldown: f32,
    pub special_frames: u32,
    pub special_damage: f32,
    pub special_speed: f32,
    pub special_size: Vec2,
    /// Seconds a special projectile lives.
    pub special_life: f32,

    /// Damage multiplier while blocking.
    pub block_damage_factor: f32,
    /// Push applied to a blocking defender, px/s.
    pub block_push: f32,
    /// Knockback applied to an unblocked defender, px/s.
    pub knockback: f32,

    /// Invulnerability ticks after an unblocked hit.
    pub hit_invulnerability: u32,
    /// Invulnerability ticks after getting up from a knockdown.
    pub getup_invulnerability: u32,

    /// Seconds between landed hits that still continue a combo.
    pub combo_window: f32,
    /// Extra damage per combo step.
    pub combo_damage_step: f32,
    pub meter_gain_combo: f32,
    pub meter_gain_open: f32,

    /// Health fraction at or below which a knockdown may happen.
    pub knockdown_threshold: f32,
    pub knockdown_chance: f32,
    pub knockdown_secs: f32,

    pub round_secs: f32,
    pub max_rounds: u32,

    pub projectile_hit_coins: u32,
    pub round_win_coins: u32,
    pub match_win_coins: u32,
}

impl Default for BoxingTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_stamina: 100.0,
            max_special_meter: 100.0,
            stamina_regen: 15.0,
            walk_speed: 200.0,
            friction: 0.85,
            ring_min_x: 50.0,
            ring_max_x: 1070.0,
            floor_y: 500.0,
            body_size: Vec2::new(80.0, 160.0),
            player_start_x: 200.0,
            opponent_start_x: 920.0,
            jab: AttackProfile {
                stamina_cost: 10.0,
                frames: 15,
                range: 100.0,
                damage: 12.0,
            },
            hook: AttackProfile {
                stamina_cost: 20.0,
                frames: 25,
                range: 120.0,
                damage: 18.0,
            },
            uppercut: AttackProfile {
                stamina_cost: 30.0,
                frames: 30,
                range: 90.0,
                damage: 25.0,
            },
            special_cost: 50.0,
            special_cooldown: 3.0,
            special_frames: 60,
            special_damage: 35.0,
            special_speed: 600.0,
            special_size: Vec2::new(40.0, 20.0),
            special_life: 2.0,
            block_damage_factor: 0.4,
            block_push: 150.0,
            knockback: 300.0,
            hit_invulnerability: 20,
            getup_invulnerability: 60,
            combo_window: 2.0,
            combo_damage_step: 0.15,
            meter_gain_combo: 15.0,
            meter_gain_open: 8.0,
            knockdown_threshold: 0.2,
            knockdown_chance: 0.3,
            knockdown_secs: 4.0,
            round_secs: 180.0,
            max_rounds: 5,
            projectile_hit_coins: 25,
            round_win_coins: 50,
            match_win_coins: 200,
        }
    }
}

impl BoxingTuning {
    /// Round wins needed to take the match
    pub fn wins_needed(&self) -> u32 {
        self.max_rounds.div_ceil(2)
    }
}

/// Behaviour of the computer-controlled opponent.
///
/// All probabilities are rolled once per simulation tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Chance per tick that the opponent considers acting at all.
    pub act_chance: f32,
    /// Farther than this, the opponent walks in.
    pub approach_distance: f32,
    /// Closer than this, the opponent punches.
    pub attack_distance: f32,
    pub approach_speed: f32,
    /// Chance an attack is a jab.
    pub jab_chance: f32,
    /// Chance a non-jab attack is a hook (otherwise uppercut).
    pub hook_chance: f32,
    pub block_chance: f32,
    /// Ticks a raised guard is held.
    pub block_ticks: u32,
    pub special_min_meter: f32,
    pub special_chance: f32,
    pub special_range: f32,
    /// An AI walk settles back to idle below this speed.
    pub walk_settle_speed: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            act_chance: 0.003,
            approach_distance: 150.0,
            attack_distance: 100.0,
            approach_speed: 100.0,
            jab_chance: 0.4,
            hook_chance: 0.7,
            block_chance: 0.2,
            block_ticks: 45,
            special_min_meter: 80.0,
            special_chance: 0.001,
            special_range: 200.0,
            walk_settle_speed: 5.0,
        }
    }
}

impl AiTuning {
    /// An opponent that never acts on its own (scripted tests, demos)
    pub fn passive() -> Self {
        Self {
            act_chance: 0.0,
            special_chance: 0.0,
            ..Self::default()
        }
    }
}
