//! Fixed timestep boxing simulation
//!
//! Per tick: round timer, then each boxer's kinematics followed by its
//! controller (keyboard for the player, `ai` for the opponent), then special
//! projectiles and their collisions, then cosmetics.

use glam::Vec2;
use rand::Rng;

use super::ai;
use super::state::{AttackKind, BoxerState, BoxingParticleKind, BoxingState, Facing, GameMode, Side, SpecialProjectile};
use crate::sim::InputLatch;
use crate::sim::input::boxing_keys;

/// What a tick did to the round structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Continues,
    /// Round over; `None` when nobody earned it (double knockout)
    RoundEnded { winner: Option<Side> },
    /// Match over; also reported by every tick while the match stays over
    MatchEnded { winner: Side },
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut BoxingState, input: &InputLatch, dt: f32) -> RoundOutcome {
    if state.mode != GameMode::Fighting {
        return match state.winner {
            Some(winner) => RoundOutcome::MatchEnded { winner },
            None => RoundOutcome::Continues,
        };
    }

    let outcome = advance_fight(state, input, dt);

    state.particles.update(dt);
    state.ring_shake = (state.ring_shake - dt).max(0.0);
    state.crowd_noise = (state.crowd_noise - dt).max(0.0);

    outcome
}

fn advance_fight(state: &mut BoxingState, input: &InputLatch, dt: f32) -> RoundOutcome {
    state.clock += dt as f64;

    state.timer -= dt;
    if state.timer <= 0.0 {
        state.timer = 0.0;
        let winner = decision_on_time(state);
        return end_round(state, winner);
    }

    for side in Side::BOTH {
        update_boxer(state, side, dt);
        match side {
            Side::Player => handle_player_input(state, input),
            Side::Opponent => ai::think(state),
        }
        if let Some(outcome) = settle_knockout(state) {
            return outcome;
        }
    }

    update_projectiles(state, dt);
    resolve_projectile_hits(state);

    settle_knockout(state).unwrap_or(RoundOutcome::Continues)
}

/// Kinematics and timers for one boxer
fn update_boxer(state: &mut BoxingState, side: Side, dt: f32) {
    let t = &state.tuning;
    let b = &mut state.boxers[side.index()];

    b.pos.x += b.vel.x * dt;
    b.pos.y = t.floor_y;
    b.pos.x = b.pos.x.clamp(t.ring_min_x, t.ring_max_x);

    if b.attack_frame > 0 {
        b.attack_frame -= 1;
        if b.attack_frame == 0 {
            if b.state.is_attacking() {
                b.state = BoxerState::Idle;
            }
            b.attack_kind = None;
        }
    }

    if b.invulnerable > 0 {
        b.invulnerable -= 1;
        if b.invulnerable == 0 && b.state == BoxerState::Hit {
            b.state = BoxerState::Idle;
        }
    }

    b.special_cooldown = (b.special_cooldown - dt).max(0.0);

    if b.knockdown_timer > 0.0 {
        b.knockdown_timer -= dt;
        if b.knockdown_timer <= 0.0 {
            b.knockdown_timer = 0.0;
            b.state = BoxerState::Idle;
            b.invulnerable = t.getup_invulnerability;
            log::debug!("{:?} beats the count", side);
        }
    }

    if b.state != BoxerState::KnockedDown {
        b.stamina = (b.stamina + t.stamina_regen * dt).min(t.max_stamina);
    }

    b.vel.x *= t.friction;
}

fn handle_player_input(state: &mut BoxingState, input: &InputLatch) {
    let walk_speed = state.tuning.walk_speed;
    let b = state.boxer_mut(Side::Player);
    if b.state == BoxerState::KnockedDown {
        return;
    }

    let heading = if input.is_down(boxing_keys::LEFT) {
        Some(Facing::Left)
    } else if input.is_down(boxing_keys::RIGHT) {
        Some(Facing::Right)
    } else {
        None
    };

    match heading {
        Some(facing) => {
            b.vel.x = facing.sign() * walk_speed;
            b.facing = facing;
            if matches!(b.state, BoxerState::Idle | BoxerState::Walking | BoxerState::Blocking) {
                b.state = BoxerState::Walking;
            }
        }
        None => {
            if b.state == BoxerState::Walking {
                b.state = BoxerState::Idle;
            }
        }
    }

    b.block_active = input.is_down(boxing_keys::BLOCK) && b.attack_frame == 0;
    if b.block_active {
        b.state = BoxerState::Blocking;
    } else if b.state == BoxerState::Blocking {
        b.state = BoxerState::Idle;
    }

    let requested = [
        (boxing_keys::JAB, AttackKind::Jab),
        (boxing_keys::HOOK, AttackKind::Hook),
        (boxing_keys::UPPERCUT, AttackKind::Uppercut),
        (boxing_keys::SPECIAL, AttackKind::Special),
    ];
    for (key, kind) in requested {
        if input.is_down(key) && perform_attack(state, Side::Player, kind) {
            break;
        }
    }
}

/// Can `side` throw `kind` right now?
pub fn can_attack(state: &BoxingState, side: Side, kind: AttackKind) -> bool {
    let t = &state.tuning;
    let b = state.boxer(side);
    if b.attack_frame != 0 || b.state == BoxerState::KnockedDown {
        return false;
    }
    match kind.profile(t) {
        Some(profile) => b.stamina >= profile.stamina_cost,
        None => b.special_meter >= t.special_cost && b.special_cooldown <= 0.0,
    }
}

/// Throw an attack if the gates allow it; returns whether it was thrown.
///
/// Melee range is checked once, on the frame the punch starts.
pub fn perform_attack(state: &mut BoxingState, side: Side, kind: AttackKind) -> bool {
    if !can_attack(state, side, kind) {
        return false;
    }
    let Some(profile) = kind.profile(&state.tuning) else {
        perform_special(state, side);
        return true;
    };

    let (me, them) = state.pair_mut(side);
    me.state = kind.state();
    me.attack_kind = Some(kind);
    me.attack_frame = profile.frames;
    me.stamina = (me.stamina - profile.stamina_cost).max(0.0);
    me.block_active = false;
    me.ai_block_ticks = 0;

    let in_range = (me.pos.x - them.pos.x).abs() <= profile.range;
    if in_range {
        hit_boxer(state, side.other(), Some(side), profile.damage);
    }
    true
}

fn perform_special(state: &mut BoxingState, side: Side) {
    let t = &state.tuning;
    let (cost, cooldown, frames) = (t.special_cost, t.special_cooldown, t.special_frames);
    let (speed, size, damage, life) = (t.special_speed, t.special_size, t.special_damage, t.special_life);

    let b = state.boxer_mut(side);
    b.state = BoxerState::Special;
    b.attack_kind = Some(AttackKind::Special);
    b.attack_frame = frames;
    b.special_meter = (b.special_meter - cost).max(0.0);
    b.special_cooldown = cooldown;
    b.block_active = false;
    b.ai_block_ticks = 0;

    // Leading edge flush with the thrower's front edge
    let kind = b.fighter.special();
    let half = b.size.x * 0.5;
    let min_x = match b.facing {
        Facing::Right => b.pos.x + half - size.x,
        Facing::Left => b.pos.x - half,
    };
    let pos = Vec2::new(min_x, b.pos.y - 60.0);
    let vel = Vec2::new(b.facing.sign() * speed, 0.0);

    let id = state.next_entity_id();
    state.projectiles.push(SpecialProjectile {
        id,
        owner: side,
        kind,
        pos,
        vel,
        size,
        damage,
        life,
        active: true,
    });
    state.special_burst(pos, kind);
    state.ring_shake = 0.5;
    log::debug!("{:?} throws {:?}", side, kind);
}

/// Apply `damage` to `target`. Melee hits name an attacker; projectiles do not.
pub fn hit_boxer(state: &mut BoxingState, target: Side, attacker: Option<Side>, damage: f32) {
    let t = state.tuning.clone();
    let now = state.clock;
    let mut damage = damage;

    {
        let tb = state.boxer(target);
        if tb.invulnerable > 0 || tb.state == BoxerState::KnockedDown {
            return;
        }
    }

    let (tb, ab) = state.pair_mut(target);
    let push = attacker.map(|_| ab.facing.sign()).unwrap_or(0.0);
    let blocked = tb.block_active && attacker.is_some();

    if blocked {
        damage *= t.block_damage_factor;
        tb.vel.x += push * t.block_push;
    } else {
        tb.state = BoxerState::Hit;
        tb.invulnerable = t.hit_invulnerability;
        tb.cancel_attack();
        tb.block_active = false;
        tb.ai_block_ticks = 0;

        if attacker.is_some() {
            match ab.last_hit {
                Some(prev) if now - prev < t.combo_window as f64 => {
                    ab.combo_count += 1;
                    damage *= 1.0 + ab.combo_count as f32 * t.combo_damage_step;
                    ab.special_meter += t.meter_gain_combo;
                }
                _ => {
                    ab.combo_count = 1;
                    ab.special_meter += t.meter_gain_open;
                }
            }
            ab.last_hit = Some(now);
            ab.special_meter = ab.special_meter.min(t.max_special_meter);
            tb.vel.x += push * t.knockback;
        }
    }

    tb.health = (tb.health - damage).max(0.0);
    let feet = tb.pos;
    let can_drop = tb.health <= t.max_health * t.knockdown_threshold && !tb.block_active;

    state.burst(BoxingParticleKind::Hit, feet);
    if !blocked {
        state.burst(BoxingParticleKind::Sweat, feet);
        state.crowd_noise = 1.0;
        state.ring_shake = 0.3;
    }

    if can_drop && state.rng.random::<f32>() < t.knockdown_chance {
        let tb = state.boxer_mut(target);
        tb.state = BoxerState::KnockedDown;
        tb.knockdown_timer = t.knockdown_secs;
        tb.cancel_attack();
        state.burst(BoxingParticleKind::Stars, feet);
        state.ring_shake = 1.0;
        log::debug!("{:?} is down", target);
    }
}

fn update_projectiles(state: &mut BoxingState, dt: f32) {
    for p in state.projectiles.iter_mut() {
        p.pos += p.vel * dt;
        p.life -= dt;
        if p.life <= 0.0 || p.pos.x < -100.0 || p.pos.x > 1300.0 {
            p.active = false;
        }
    }
    state.projectiles.retain(|p| p.active);
}

/// Specials against the boxer who did not throw them
fn resolve_projectile_hits(state: &mut BoxingState) {
    let coins = state.tuning.projectile_hit_coins;

    for i in 0..state.projectiles.len() {
        let p = &state.projectiles[i];
        let target = p.owner.other();
        if !p.active || !p.hitbox().overlaps(&state.boxer(target).hitbox()) {
            continue;
        }
        let (owner, pos, kind, damage) = (p.owner, p.pos, p.kind, p.damage);

        hit_boxer(state, target, None, damage);
        state.boxer_mut(owner).coins += coins;
        state.coin_burst(pos);

        state.projectiles[i].active = false;
        state.special_burst(pos, kind);
        state.ring_shake = 0.8;
    }

    state.projectiles.retain(|p| p.active);
}

/// End the round if anyone has been emptied
fn settle_knockout(state: &mut BoxingState) -> Option<RoundOutcome> {
    let down = Side::BOTH.map(|side| state.boxer(side).health <= 0.0);
    let winner = match down {
        [false, false] => return None,
        [true, false] => Some(Side::Opponent),
        [false, true] => Some(Side::Player),
        [true, true] => None,
    };
    Some(end_round(state, winner))
}

/// Time is up: a boxer still on the canvas loses, otherwise more health wins.
/// Ties go to the opponent.
fn decision_on_time(state: &BoxingState) -> Option<Side> {
    let (p, o) = (state.player(), state.opponent());
    let p_down = p.state == BoxerState::KnockedDown;
    let o_down = o.state == BoxerState::KnockedDown;
    if p_down != o_down {
        return Some(if p_down { Side::Opponent } else { Side::Player });
    }
    if p.health > o.health {
        Some(Side::Player)
    } else {
        Some(Side::Opponent)
    }
}

fn end_round(state: &mut BoxingState, winner: Option<Side>) -> RoundOutcome {
    let t = state.tuning.clone();

    if let Some(side) = winner {
        state.round_wins[side.index()] += 1;
        let b = state.boxer_mut(side);
        b.coins += t.round_win_coins;
        let feet = b.pos;
        state.coin_burst(feet);
        log::info!(
            "Round {} to {:?} ({}-{})",
            state.round,
            side,
            state.round_wins[0],
            state.round_wins[1]
        );
    } else {
        log::info!("Round {} ends without a winner", state.round);
    }

    if let Some(side) = winner.filter(|s| state.round_wins[s.index()] >= t.wins_needed()) {
        state.mode = match side {
            Side::Player => GameMode::Victory,
            Side::Opponent => GameMode::Knockout,
        };
        state.winner = Some(side);

        let b = state.boxer_mut(side);
        b.trophies += 1;
        b.coins += t.match_win_coins;
        let feet = b.pos;
        state.trophy_burst(feet);
        log::info!("{:?} wins the match", side);
        return RoundOutcome::MatchEnded { winner: side };
    }

    state.round += 1;
    state.timer = t.round_secs;
    state.projectiles.clear();
    for b in state.boxers.iter_mut() {
        b.reset_for_round(&t);
    }
    RoundOutcome::RoundEnded { winner }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxing::Fighter;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::tuning::AiTuning;
    use proptest::prelude::*;

    /// Match against an opponent that never moves on its own
    fn make_state(seed: u64) -> BoxingState {
        let settings = Settings {
            ai: AiTuning::passive(),
            ..Settings::default()
        };
        BoxingState::new(Fighter::MikeTyson, seed, &settings)
    }

    /// Place both boxers `gap` px apart, facing each other
    fn square_up(state: &mut BoxingState, gap: f32) {
        state.boxer_mut(Side::Player).pos.x = 500.0;
        state.boxer_mut(Side::Opponent).pos.x = 500.0 + gap;
    }

    fn idle_ticks(state: &mut BoxingState, n: usize) {
        let input = InputLatch::new();
        for _ in 0..n {
            tick(state, &input, SIM_DT);
        }
    }

    #[test]
    fn test_jab_gated_by_stamina() {
        let mut state = make_state(1);
        state.boxer_mut(Side::Player).stamina = 5.0;

        let mut input = InputLatch::new();
        input.press(boxing_keys::JAB);
        // Call the controller directly so regen does not sneak in
        handle_player_input(&mut state, &input);

        let p = state.player();
        assert_eq!(p.state, BoxerState::Idle);
        assert_eq!(p.attack_frame, 0);
        assert_eq!(p.stamina, 5.0);
    }

    #[test]
    fn test_jab_sets_state_and_cost() {
        let mut state = make_state(1);
        square_up(&mut state, 80.0);

        assert!(perform_attack(&mut state, Side::Player, AttackKind::Jab));
        let p = state.player();
        assert_eq!(p.state, BoxerState::Jabbing);
        assert_eq!(p.attack_kind, Some(AttackKind::Jab));
        assert_eq!(p.attack_frame, 15);
        assert_eq!(p.stamina, 90.0);
        assert_eq!(state.opponent().health, 88.0);

        // No attack is interruptible
        assert!(!perform_attack(&mut state, Side::Player, AttackKind::Hook));
    }

    #[test]
    fn test_attack_frame_returns_to_idle() {
        let mut state = make_state(1);
        square_up(&mut state, 400.0);
        perform_attack(&mut state, Side::Player, AttackKind::Hook);

        idle_ticks(&mut state, 24);
        assert_eq!(state.player().state, BoxerState::Hooking);
        idle_ticks(&mut state, 1);
        let p = state.player();
        assert_eq!(p.state, BoxerState::Idle);
        assert_eq!(p.attack_kind, None);
    }

    #[test]
    fn test_out_of_range_punch_misses() {
        let mut state = make_state(1);
        square_up(&mut state, 101.0);
        perform_attack(&mut state, Side::Player, AttackKind::Jab);
        assert_eq!(state.opponent().health, 100.0);
        assert_eq!(state.player().combo_count, 0);
    }

    #[test]
    fn test_special_gated_by_meter() {
        let mut state = make_state(1);
        state.boxer_mut(Side::Player).special_meter = 49.0;
        assert!(!perform_attack(&mut state, Side::Player, AttackKind::Special));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player().special_meter, 49.0);

        state.boxer_mut(Side::Player).special_meter = 50.0;
        assert!(perform_attack(&mut state, Side::Player, AttackKind::Special));
        assert_eq!(state.projectiles.len(), 1);
        let p = state.player();
        assert_eq!(p.special_meter, 0.0);
        assert_eq!(p.special_cooldown, 3.0);
        assert_eq!(p.state, BoxerState::Special);

        let proj = &state.projectiles[0];
        assert_eq!(proj.pos, Vec2::new(280.0, 440.0));
        assert_eq!(proj.vel, Vec2::new(600.0, 0.0));
    }

    #[test]
    fn test_special_gated_by_cooldown() {
        let mut state = make_state(1);
        let p = state.boxer_mut(Side::Player);
        p.special_meter = 100.0;
        p.special_cooldown = 0.5;
        assert!(!perform_attack(&mut state, Side::Player, AttackKind::Special));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_combo_scaling_and_reset() {
        let mut state = make_state(1);
        square_up(&mut state, 80.0);

        perform_attack(&mut state, Side::Player, AttackKind::Jab);
        assert_eq!(state.player().combo_count, 1);
        assert_eq!(state.player().special_meter, 8.0);
        let after_first = state.opponent().health;

        // 500ms later: 30 ticks
        idle_ticks(&mut state, 30);
        square_up(&mut state, 80.0);
        perform_attack(&mut state, Side::Player, AttackKind::Jab);
        let p = state.player();
        assert_eq!(p.combo_count, 2);
        assert_eq!(p.special_meter, 23.0);
        let second_hit = after_first - state.opponent().health;
        assert!((second_hit - 15.6).abs() < 1e-3, "second hit {}", second_hit);

        // 3 seconds later the streak is gone
        idle_ticks(&mut state, 180);
        square_up(&mut state, 80.0);
        perform_attack(&mut state, Side::Player, AttackKind::Jab);
        assert_eq!(state.player().combo_count, 1);
    }

    #[test]
    fn test_block_reduces_damage_and_pushes() {
        let mut state = make_state(1);
        square_up(&mut state, 80.0);
        let o = state.boxer_mut(Side::Opponent);
        o.block_active = true;
        o.state = BoxerState::Blocking;

        perform_attack(&mut state, Side::Player, AttackKind::Uppercut);
        let o = state.opponent();
        assert!((o.health - 90.0).abs() < 1e-4);
        assert_eq!(o.state, BoxerState::Blocking);
        assert_eq!(o.vel.x, 150.0);
        assert_eq!(o.invulnerable, 0);
        // A blocked punch builds no combo
        assert_eq!(state.player().combo_count, 0);
    }

    #[test]
    fn test_unblocked_hit_staggers() {
        let mut state = make_state(1);
        square_up(&mut state, 80.0);
        perform_attack(&mut state, Side::Player, AttackKind::Jab);

        let o = state.opponent();
        assert_eq!(o.state, BoxerState::Hit);
        assert_eq!(o.invulnerable, 20);
        assert_eq!(o.vel.x, 300.0);

        idle_ticks(&mut state, 20);
        assert_eq!(state.opponent().state, BoxerState::Idle);
    }

    #[test]
    fn test_knockout_ends_round_immediately() {
        let mut state = make_state(1);
        square_up(&mut state, 80.0);
        state.boxer_mut(Side::Opponent).health = 0.0;

        let outcome = tick(&mut state, &InputLatch::new(), SIM_DT);
        assert_eq!(
            outcome,
            RoundOutcome::RoundEnded {
                winner: Some(Side::Player)
            }
        );
        assert_eq!(state.round, 2);
        assert_eq!(state.round_wins, [1, 0]);
        assert_eq!(state.player().coins, 50);
        assert_eq!(state.timer, 180.0);
        assert_eq!(state.opponent().health, 100.0);
        assert_eq!(state.opponent().pos.x, 920.0);
    }

    #[test]
    fn test_timer_decision_by_health() {
        let mut state = make_state(1);
        state.timer = SIM_DT * 0.5;
        state.boxer_mut(Side::Player).health = 40.0;
        state.boxer_mut(Side::Opponent).health = 70.0;

        let outcome = tick(&mut state, &InputLatch::new(), SIM_DT);
        assert_eq!(
            outcome,
            RoundOutcome::RoundEnded {
                winner: Some(Side::Opponent)
            }
        );
        assert_eq!(state.round_wins, [0, 1]);
    }

    #[test]
    fn test_timer_decision_standing_beats_downed() {
        let mut state = make_state(1);
        state.timer = SIM_DT * 0.5;
        let p = state.boxer_mut(Side::Player);
        p.health = 90.0;
        p.state = BoxerState::KnockedDown;
        p.knockdown_timer = 2.0;
        state.boxer_mut(Side::Opponent).health = 15.0;

        tick(&mut state, &InputLatch::new(), SIM_DT);
        assert_eq!(state.round_wins, [0, 1]);
    }

    #[test]
    fn test_match_victory_payout() {
        let mut state = make_state(1);
        state.round_wins = [2, 1];
        state.boxer_mut(Side::Opponent).health = 0.0;

        let outcome = tick(&mut state, &InputLatch::new(), SIM_DT);
        assert_eq!(
            outcome,
            RoundOutcome::MatchEnded {
                winner: Side::Player
            }
        );
        assert_eq!(state.mode, GameMode::Victory);
        assert_eq!(state.winner, Some(Side::Player));
        let p = state.player();
        assert_eq!(p.trophies, 1);
        assert_eq!(p.coins, 50 + 200);

        // Terminal: nothing moves any more
        let timer = state.timer;
        let outcome = tick(&mut state, &InputLatch::new(), SIM_DT);
        assert_eq!(
            outcome,
            RoundOutcome::MatchEnded {
                winner: Side::Player
            }
        );
        assert_eq!(state.timer, timer);
    }

    #[test]
    fn test_opponent_match_is_knockout_mode() {
        let mut state = make_state(1);
        state.round_wins = [0, 2];
        state.boxer_mut(Side::Player).health = 0.0;
        tick(&mut state, &InputLatch::new(), SIM_DT);
        assert_eq!(state.mode, GameMode::Knockout);
        assert_eq!(state.opponent().trophies, 1);
    }

    #[test]
    fn test_knockdown_only_when_hurt() {
        // Healthy targets never go down, whatever the roll
        for seed in 0..50 {
            let mut state = make_state(seed);
            square_up(&mut state, 80.0);
            perform_attack(&mut state, Side::Player, AttackKind::Jab);
            assert_ne!(state.opponent().state, BoxerState::KnockedDown);
        }

        // Hurt targets go down on roughly 30% of seeds
        let mut downs = 0;
        for seed in 0..400 {
            let mut state = make_state(seed);
            square_up(&mut state, 80.0);
            state.boxer_mut(Side::Opponent).health = 30.0;
            perform_attack(&mut state, Side::Player, AttackKind::Jab);
            let o = state.opponent();
            if o.state == BoxerState::KnockedDown {
                assert_eq!(o.knockdown_timer, 4.0);
                downs += 1;
            }
        }
        assert!((60..=180).contains(&downs), "downs {}", downs);
    }

    #[test]
    fn test_knockdown_recovery() {
        let mut state = make_state(1);
        let o = state.boxer_mut(Side::Opponent);
        o.state = BoxerState::KnockedDown;
        o.knockdown_timer = 4.0;
        o.stamina = 10.0;

        idle_ticks(&mut state, 120);
        let o = state.opponent();
        assert_eq!(o.state, BoxerState::KnockedDown);
        // No stamina regen while down
        assert_eq!(o.stamina, 10.0);

        idle_ticks(&mut state, 121);
        let o = state.opponent();
        assert_eq!(o.state, BoxerState::Idle);
        assert!(o.invulnerable > 0 && o.invulnerable <= 60);
    }

    #[test]
    fn test_projectile_hit_pays_coins() {
        let mut state = make_state(1);
        square_up(&mut state, 300.0);
        state.boxer_mut(Side::Player).special_meter = 50.0;
        assert!(perform_attack(&mut state, Side::Player, AttackKind::Special));

        let mut landed = false;
        for _ in 0..60 {
            tick(&mut state, &InputLatch::new(), SIM_DT);
            if state.projectiles.is_empty() {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(state.player().coins, 25);
        assert!((state.opponent().health - 65.0).abs() < 1e-4);
    }

    #[test]
    fn test_point_blank_special_lands() {
        for gap in [0.0, 20.0, 40.0, 60.0] {
            let mut state = make_state(1);
            square_up(&mut state, gap);
            state.boxer_mut(Side::Player).special_meter = 50.0;
            assert!(perform_attack(&mut state, Side::Player, AttackKind::Special));

            let spawned = state.projectiles[0].hitbox();
            assert_eq!(spawned.max().x, state.player().hitbox().max().x);

            idle_ticks(&mut state, 130);
            assert!((state.opponent().health - 65.0).abs() < 1e-4, "gap {}", gap);
            assert_eq!(state.player().coins, 25, "gap {}", gap);
        }
    }

    #[test]
    fn test_left_facing_special_leaves_from_front_edge() {
        let mut state = make_state(1);
        square_up(&mut state, 0.0);
        let p = state.boxer_mut(Side::Player);
        p.special_meter = 50.0;
        p.facing = Facing::Left;
        assert!(perform_attack(&mut state, Side::Player, AttackKind::Special));
        assert_eq!(state.projectiles[0].pos.x, state.player().hitbox().min.x);
    }

    #[test]
    fn test_stray_projectile_expires() {
        let mut state = make_state(1);
        let p = state.boxer_mut(Side::Player);
        p.special_meter = 50.0;
        p.facing = Facing::Left;
        perform_attack(&mut state, Side::Player, AttackKind::Special);
        idle_ticks(&mut state, 121);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player().coins, 0);
    }

    #[test]
    fn test_player_walks_and_settles() {
        let mut state = make_state(1);
        let mut input = InputLatch::new();
        input.press(boxing_keys::RIGHT);
        for _ in 0..30 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.player().state, BoxerState::Walking);
        assert!(state.player().pos.x > 200.0);

        input.release(boxing_keys::RIGHT);
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.player().state, BoxerState::Idle);
    }

    #[test]
    fn test_walls_hold() {
        let mut state = make_state(1);
        let mut input = InputLatch::new();
        input.press(boxing_keys::LEFT);
        for _ in 0..300 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.player().pos.x, 50.0);
        assert_eq!(state.player().facing, Facing::Left);
    }

    #[test]
    fn test_block_key_raises_and_drops_guard() {
        let mut state = make_state(1);
        let mut input = InputLatch::new();
        input.press(boxing_keys::BLOCK);
        tick(&mut state, &input, SIM_DT);
        assert!(state.player().block_active);
        assert_eq!(state.player().state, BoxerState::Blocking);

        input.release(boxing_keys::BLOCK);
        tick(&mut state, &input, SIM_DT);
        assert!(!state.player().block_active);
        assert_eq!(state.player().state, BoxerState::Idle);
    }

    #[test]
    fn test_restart_resets_structure() {
        let mut state = make_state(3);
        square_up(&mut state, 80.0);
        state.boxer_mut(Side::Player).special_meter = 60.0;
        perform_attack(&mut state, Side::Player, AttackKind::Special);
        perform_attack(&mut state, Side::Opponent, AttackKind::Jab);
        state.round = 3;
        state.round_wins = [1, 1];
        state.mode = GameMode::Knockout;

        state.reset();
        assert_eq!(state.mode, GameMode::Fighting);
        assert_eq!(state.round, 1);
        assert_eq!(state.round_wins, [0, 0]);
        assert!(state.projectiles.is_empty());
        assert!(state.particles.is_empty());
        for b in &state.boxers {
            assert_eq!(b.health, state.tuning.max_health);
            assert_eq!(b.stamina, state.tuning.max_stamina);
            assert_eq!(b.special_meter, state.tuning.max_special_meter);
            assert_eq!(b.state, BoxerState::Idle);
            assert_eq!(b.attack_frame, 0);
            assert_eq!(b.special_cooldown, 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_fight() {
        let settings = Settings::default();
        let mut a = BoxingState::new(Fighter::MikeTyson, 77, &settings);
        let mut b = BoxingState::new(Fighter::MikeTyson, 77, &settings);
        let mut input = InputLatch::new();
        input.press(boxing_keys::RIGHT);
        for i in 0..3000 {
            if i == 600 {
                input.release(boxing_keys::RIGHT);
                input.press(boxing_keys::JAB);
            }
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }
        assert_eq!(a.player().health, b.player().health);
        assert_eq!(a.opponent().pos, b.opponent().pos);
        assert_eq!(a.round_wins, b.round_wins);
    }

    fn key_strategy() -> impl Strategy<Value = Vec<(bool, bool, u8)>> {
        prop::collection::vec((any::<bool>(), any::<bool>(), 0u8..6), 1..400)
    }

    proptest! {
        #[test]
        fn meters_stay_clamped(seed in any::<u64>(), script in key_strategy()) {
            let settings = Settings {
                ai: AiTuning { act_chance: 0.2, special_chance: 0.05, ..AiTuning::default() },
                ..Settings::default()
            };
            let mut state = BoxingState::new(Fighter::GeorgeForeman, seed, &settings);
            let keys = [
                boxing_keys::JAB,
                boxing_keys::HOOK,
                boxing_keys::UPPERCUT,
                boxing_keys::SPECIAL,
                boxing_keys::BLOCK,
                boxing_keys::LEFT,
            ];
            let mut input = InputLatch::new();

            for (right, hold, k) in script {
                input.clear();
                if right {
                    input.press(boxing_keys::RIGHT);
                }
                if hold {
                    input.press(keys[k as usize]);
                }
                tick(&mut state, &input, SIM_DT);

                let t = &state.tuning;
                for b in &state.boxers {
                    prop_assert!(b.health >= 0.0 && b.health <= t.max_health);
                    prop_assert!(b.stamina >= 0.0 && b.stamina <= t.max_stamina);
                    prop_assert!(b.special_meter >= 0.0 && b.special_meter <= t.max_special_meter);
                    prop_assert!(b.pos.x >= t.ring_min_x && b.pos.x <= t.ring_max_x);
                    if b.attack_frame > 0 {
                        prop_assert!(b.state.is_attacking());
                    }
                }
                for p in &state.projectiles {
                    prop_assert!(p.active);
                }
            }
        }
    }
}
