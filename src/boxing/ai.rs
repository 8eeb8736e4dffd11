//! Computer opponent
//!
//! A stochastic reactive controller: every tick it rolls small fixed
//! probabilities to walk in, punch, or cover up. No look-ahead and no
//! pattern, so it never reacts frame-perfectly. All actions go through the
//! same gates as the player's.

use rand::Rng;

use super::state::{AttackKind, BoxerState, BoxingState, Facing, Side};
use super::tick::perform_attack;

/// Run the opponent's controller for one tick
pub fn think(state: &mut BoxingState) {
    let ai = state.ai.clone();
    let player_x = state.player().pos.x;

    let me = state.boxer_mut(Side::Opponent);
    if me.state == BoxerState::KnockedDown {
        return;
    }

    // A raised guard is held for a fixed number of ticks
    if me.ai_block_ticks > 0 {
        me.ai_block_ticks -= 1;
        if me.ai_block_ticks == 0 {
            me.block_active = false;
            if me.state == BoxerState::Blocking {
                me.state = BoxerState::Idle;
            }
        }
    }

    if me.state == BoxerState::Walking && me.vel.x.abs() < ai.walk_settle_speed {
        me.state = BoxerState::Idle;
    }

    let distance = (me.pos.x - player_x).abs();

    if state.rng.random::<f32>() < ai.act_chance {
        if distance > ai.approach_distance {
            let me = state.boxer_mut(Side::Opponent);
            let facing = if player_x > me.pos.x {
                Facing::Right
            } else {
                Facing::Left
            };
            me.vel.x = facing.sign() * ai.approach_speed;
            me.facing = facing;
            if matches!(me.state, BoxerState::Idle | BoxerState::Walking | BoxerState::Blocking) {
                me.state = BoxerState::Walking;
                me.block_active = false;
                me.ai_block_ticks = 0;
            }
        } else if distance < ai.attack_distance && state.opponent().attack_frame == 0 {
            let kind = if state.rng.random::<f32>() < ai.jab_chance {
                AttackKind::Jab
            } else if state.rng.random::<f32>() < ai.hook_chance {
                AttackKind::Hook
            } else {
                AttackKind::Uppercut
            };
            perform_attack(state, Side::Opponent, kind);
        } else if state.rng.random::<f32>() < ai.block_chance {
            let me = state.boxer_mut(Side::Opponent);
            if me.attack_frame == 0 {
                me.block_active = true;
                me.state = BoxerState::Blocking;
                me.ai_block_ticks = ai.block_ticks;
            }
        }
    }

    if state.opponent().special_meter >= ai.special_min_meter
        && state.rng.random::<f32>() < ai.special_chance
        && distance < ai.special_range
    {
        perform_attack(state, Side::Opponent, AttackKind::Special);
    }
}
