//! Fixed timestep helicopter simulation
//!
//! Per tick: helicopter physics, controls, hostiles, fireballs, particles,
//! spawner, collisions, then the level clock. Entities flagged inactive are
//! removed before the tick returns.

use glam::Vec2;
use rand::Rng;

use super::state::{Fireball, HeliMode, HelicopterState, HostileKind};
use crate::consts::{HELI_HEIGHT, HELI_WIDTH};
use crate::sim::InputLatch;
use crate::sim::input::heli_keys;

/// Advance the run by one fixed timestep
pub fn tick(state: &mut HelicopterState, input: &InputLatch, dt: f32) {
    if state.mode == HeliMode::GameOver {
        return;
    }

    state.clock_ms += dt as f64 * 1000.0;

    update_helicopter(state, dt);
    handle_input(state, input);
    update_hostiles(state, dt);
    update_fireballs(state, dt);
    state.particles.update(dt);
    update_spawner(state, dt);
    resolve_collisions(state);

    state.hostiles.retain(|h| h.active);
    state.fireballs.retain(|f| f.active);

    if state.mode == HeliMode::Playing {
        update_level(state, dt);
    }
}

/// Momentum integration: position moves first, drag bleeds velocity after
fn update_helicopter(state: &mut HelicopterState, dt: f32) {
    let t = &state.tuning;
    let heli = &mut state.helicopter;

    heli.rotor_angle += t.rotor_step;
    heli.pos += heli.vel * dt;

    let margin = t.edge_margin;
    heli.pos.x = heli.pos.x.clamp(margin, HELI_WIDTH - margin);
    heli.pos.y = heli.pos.y.clamp(margin, HELI_HEIGHT - margin);

    heli.vel *= t.drag;
    heli.angle = heli.vel.x * t.tilt_factor;
}

fn handle_input(state: &mut HelicopterState, input: &InputLatch) {
    let thrust = state.tuning.thrust;
    let vel = &mut state.helicopter.vel;

    if input.is_down(heli_keys::UP) {
        vel.y -= thrust;
    }
    if input.is_down(heli_keys::DOWN) {
        vel.y += thrust;
    }
    if input.is_down(heli_keys::LEFT) {
        vel.x -= thrust;
    }
    if input.is_down(heli_keys::RIGHT) {
        vel.x += thrust;
    }

    if input.is_down(heli_keys::FIRE) {
        try_fire(state);
    }
}

/// Fire unless the previous shot was too recent. Returns whether a shot left.
pub fn try_fire(state: &mut HelicopterState) -> bool {
    let now = state.clock_ms;
    let interval = state.tuning.fire_interval_ms;
    if state.last_fire_ms.is_some_and(|last| now - last <= interval) {
        return false;
    }
    state.last_fire_ms = Some(now);

    let id = state.next_entity_id();
    let t = &state.tuning;
    let muzzle = state.helicopter.pos + Vec2::new(state.helicopter.size.x, 0.0);
    state.fireballs.push(Fireball {
        id,
        pos: muzzle,
        vel: Vec2::new(t.fireball_speed, 0.0),
        size: t.fireball_size,
        damage: t.fireball_damage,
        active: true,
        trail: Vec::with_capacity(t.trail_len + 1),
    });
    state.fire_burst(muzzle);

    log::trace!("Fireball {} at {:.0} ms", id, now);
    true
}

fn update_hostiles(state: &mut HelicopterState, dt: f32) {
    let t = &state.tuning;
    let level = state.level as f32;
    let (min_y, max_y) = (t.hostile_margin_y, HELI_HEIGHT - t.hostile_margin_y);

    for hostile in &mut state.hostiles {
        let profile = t.profile(hostile.kind);
        hostile.vel.x = -(profile.base_speed + level * profile.speed_per_level);
        hostile.vel.y = (hostile.pattern * profile.wave_freq).sin() * profile.wave_amp;

        hostile.pos += hostile.vel * dt;
        hostile.pattern += dt;

        if hostile.pos.x < t.despawn_x {
            hostile.active = false;
        }
        hostile.pos.y = hostile.pos.y.clamp(min_y, max_y);
    }
}

fn update_fireballs(state: &mut HelicopterState, dt: f32) {
    let t = &state.tuning;
    let m = t.projectile_margin;

    for fireball in &mut state.fireballs {
        fireball.pos += fireball.vel * dt;

        fireball.trail.push(fireball.pos);
        if fireball.trail.len() > t.trail_len {
            fireball.trail.remove(0);
        }

        let p = fireball.pos;
        if p.x < -m || p.x > HELI_WIDTH + m || p.y < -m || p.y > HELI_HEIGHT + m {
            fireball.active = false;
        }
    }
}

fn update_spawner(state: &mut HelicopterState, dt: f32) {
    state.spawn_timer_ms += dt * 1000.0;
    if state.spawn_timer_ms > state.tuning.spawn_interval(state.level) {
        state.spawn_timer_ms = 0.0;
        let kind = HostileKind::ALL[state.rng.random_range(0..HostileKind::ALL.len())];
        state.spawn_hostile(kind);
    }
}

/// Fireballs against hostiles, then hostiles against the helicopter
fn resolve_collisions(state: &mut HelicopterState) {
    for fi in 0..state.fireballs.len() {
        if !state.fireballs[fi].active {
            continue;
        }
        let shot = state.fireballs[fi].hitbox();

        for hi in 0..state.hostiles.len() {
            if !state.hostiles[hi].active || !shot.overlaps(&state.hostiles[hi].hitbox()) {
                continue;
            }

            // A fireball is spent on the first aircraft it touches
            state.fireballs[fi].active = false;
            let hostile = &mut state.hostiles[hi];
            hostile.health -= state.fireballs[fi].damage;
            let at = hostile.pos;
            let kind = hostile.kind;
            let destroyed = hostile.health <= 0.0;
            if destroyed {
                hostile.active = false;
            }

            state.explosion(at);
            if destroyed {
                award_kill(state, kind, at);
            }
            break;
        }
    }

    let heli_box = state.helicopter.hitbox();
    for hi in 0..state.hostiles.len() {
        if !state.hostiles[hi].active || !heli_box.overlaps(&state.hostiles[hi].hitbox()) {
            continue;
        }

        state.hostiles[hi].active = false;
        let heli = &mut state.helicopter;
        heli.health = (heli.health - state.tuning.contact_damage).max(0.0);
        let at = heli.pos;
        let dead = heli.health <= 0.0;

        state.explosion(at);
        state.smoke(at);

        if dead {
            state.mode = HeliMode::GameOver;
            log::info!(
                "Mission failed: score {}, {} coins, {} kills",
                state.score,
                state.coins,
                state.enemies_destroyed
            );
            break;
        }
    }
}

fn award_kill(state: &mut HelicopterState, kind: HostileKind, at: Vec2) {
    let profile = state.tuning.profile(kind);
    state.score += profile.score;
    state.coins += profile.coins;
    state.enemies_destroyed += 1;

    state.coin_burst(at);
    state.big_explosion(at);
    log::debug!("{:?} down, score {}", kind, state.score);
}

fn update_level(state: &mut HelicopterState, dt: f32) {
    state.level_timer_ms += dt * 1000.0;
    if state.level_timer_ms > state.tuning.level_interval_ms {
        state.level_timer_ms = 0.0;
        state.level += 1;
        log::info!("Level {}", state.level);
    }
}
