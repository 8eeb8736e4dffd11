//! Stick-figure animation
//!
//! Joint offsets are recomputed from the boxer's discrete state at render
//! time. Nothing here is stored in the simulation.

use std::f32::consts::PI;

use glam::Vec2;

use super::state::{BoxerState, Stance};

/// Joint anchors relative to the feet position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skeleton {
    pub head: Vec2,
    pub torso: Vec2,
    pub left_arm: Vec2,
    pub right_arm: Vec2,
    pub left_leg: Vec2,
    pub right_leg: Vec2,
}

impl Skeleton {
    /// Guard position with no motion
    pub const NEUTRAL: Skeleton = Skeleton {
        head: Vec2::new(0.0, -140.0),
        torso: Vec2::new(0.0, -80.0),
        left_arm: Vec2::new(-30.0, -100.0),
        right_arm: Vec2::new(30.0, -100.0),
        left_leg: Vec2::new(-20.0, -40.0),
        right_leg: Vec2::new(20.0, -40.0),
    };
}

/// Pose for a boxer in `state`.
///
/// `phase` is animation time in seconds; `punch` is attack progress in 0..=1
/// (0 on the first frame of a punch, 1 when it is spent).
pub fn pose(state: BoxerState, stance: Stance, phase: f32, punch: f32) -> Skeleton {
    let t = phase;
    let punch_arc = (punch.clamp(0.0, 1.0) * PI).sin();
    let mut s = Skeleton::NEUTRAL;

    match state {
        BoxerState::Walking => {
            let swing = t * 9.0;
            s.head.y = -140.0 + (t * 8.0).sin() * 3.0;
            s.torso.y = -80.0 + (t * 8.0).sin() * 2.0;
            s.left_arm = Vec2::new(-30.0 + (swing + 0.5).sin() * 15.0, -100.0 + (swing + 0.5).sin() * 8.0);
            s.right_arm = Vec2::new(30.0 + swing.sin() * 15.0, -100.0 + swing.sin() * 8.0);
        }
        BoxerState::Jabbing => {
            let reach = punch_arc * 40.0;
            match stance {
                Stance::Orthodox => {
                    s.left_arm = Vec2::new(-30.0 - reach, -110.0);
                    s.right_arm = Vec2::new(25.0, -120.0);
                }
                Stance::Southpaw => {
                    s.right_arm = Vec2::new(30.0 + reach, -110.0);
                    s.left_arm = Vec2::new(-25.0, -120.0);
                }
            }
        }
        BoxerState::Hooking => {
            let swing = punch_arc * 50.0;
            s.left_arm = Vec2::new(-30.0 - swing, -90.0);
            s.right_arm = Vec2::new(30.0 + swing, -90.0);
            s.torso.x = punch_arc * 10.0;
        }
        BoxerState::Uppercut => {
            let lift = punch_arc * 30.0;
            s.right_arm.y = -120.0 - lift;
            s.torso.y = -70.0 + lift * 0.3;
            s.left_arm = Vec2::new(-40.0, -130.0);
        }
        BoxerState::Blocking => {
            let sway = (t * 6.0).sin() * 3.0;
            s.left_arm = Vec2::new(-25.0 + sway, -130.0);
            s.right_arm = Vec2::new(25.0 - sway, -130.0);
        }
        BoxerState::Hit => {
            s.head.x = (t * 20.0).sin() * 8.0;
            s.torso.x = (t * 15.0).sin() * 6.0;
            s.left_arm.x = -30.0 + (t * 25.0).sin() * 20.0;
            s.right_arm.x = 30.0 + (t * 22.0).sin() * 20.0;
        }
        BoxerState::Special => {
            let power = (t * 10.0).sin() * 15.0;
            s.left_arm = Vec2::new(-50.0 + power, -120.0);
            s.right_arm = Vec2::new(50.0 - power, -120.0);
            s.torso.y = -85.0 + (t * 8.0).sin() * 5.0;
        }
        BoxerState::KnockedDown => {
            s.head.y = -60.0 + (t * 2.0).sin() * 3.0;
            s.torso.y = -30.0;
            s.left_arm = Vec2::new(-40.0 + (t * 3.0).sin() * 5.0, -40.0);
            s.right_arm = Vec2::new(40.0 + (t * 3.5).sin() * 5.0, -40.0);
        }
        BoxerState::Idle => {
            let sway = (t * 4.0).sin() * 2.0;
            s.head.x = sway;
            s.torso.x = sway * 0.5;
            s.left_arm = Vec2::new(-30.0 + sway, -100.0 + (t * 3.0).sin() * 2.0);
            s.right_arm = Vec2::new(30.0 - sway, -100.0 + (t * 3.5).sin() * 2.0);
        }
    }

    s
}
