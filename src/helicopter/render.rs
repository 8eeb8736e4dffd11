//! Helicopter frame builder: sky, aircraft, shots, HUD

use glam::Vec2;

use super::state::{Fireball, HeliMode, HeliParticleKind, Helicopter, HelicopterState, Hostile, HostileKind};
use crate::consts::{HELI_HEIGHT, HELI_WIDTH};
use crate::renderer::shapes::{health_color, meter};
use crate::renderer::{Color, Font, Frame, TextAlign};
use crate::sim::Particle;

/// Cloud drift, px per second of render time
const CLOUD_SPEED: f32 = 15.0;

pub fn render(state: &HelicopterState, time: f32) -> Frame {
    let mut frame = Frame::new(HELI_WIDTH, HELI_HEIGHT);

    frame.vertical_gradient(vec![(0.0, Color::hex(0x87ceeb)), (1.0, Color::hex(0x4682b4))]);
    draw_clouds(&mut frame, time);

    draw_helicopter(&mut frame, &state.helicopter, state.tuning.max_health);
    for hostile in &state.hostiles {
        draw_hostile(&mut frame, hostile);
    }
    for fireball in &state.fireballs {
        draw_fireball(&mut frame, fireball);
    }
    for particle in state.particles.iter() {
        draw_particle(&mut frame, particle);
    }

    draw_hud(&mut frame, state);

    if state.mode == HeliMode::GameOver {
        draw_game_over(&mut frame, state);
    }

    frame
}

fn draw_clouds(frame: &mut Frame, time: f32) {
    let cloud = Color::rgba(255, 255, 255, 0.6);
    let span = HELI_WIDTH + 100.0;
    for i in 0..8 {
        let x = (i as f32 * 200.0 + time * CLOUD_SPEED).rem_euclid(span) - 50.0;
        let y = 50.0 + (i as f32).sin() * 100.0;
        frame.fill_circle(Vec2::new(x, y), 30.0, cloud);
        frame.fill_circle(Vec2::new(x + 25.0, y), 35.0, cloud);
        frame.fill_circle(Vec2::new(x + 50.0, y), 30.0, cloud);
    }
}

fn draw_helicopter(frame: &mut Frame, heli: &Helicopter, max_health: f32) {
    frame.push(heli.pos, heli.angle, 1.0);

    frame.fill_rect(-40.0, -15.0, 80.0, 30.0, Color::hex(0x4a4a4a));
    frame.fill_rect(-35.0, -10.0, 50.0, 20.0, Color::hex(0x333333));

    // Main rotor: a blur disc plus the blade seen edge-on
    let blur = Color::rgba(0, 0, 0, 0.3);
    frame.stroke_circle(Vec2::new(0.0, -25.0), 60.0, blur, 3.0);
    let reach = heli.rotor_angle.cos() * 60.0;
    frame.polyline(vec![Vec2::new(-reach, -25.0), Vec2::new(reach, -25.0)], blur, 4.0);

    // Tail boom and tail rotor
    frame.fill_rect(40.0, -5.0, 60.0, 10.0, Color::hex(0x4a4a4a));
    frame.stroke_circle(Vec2::new(100.0, 0.0), 20.0, blur, 2.0);

    // Skids
    frame.fill_rect(-35.0, 15.0, 70.0, 3.0, Color::hex(0x666666));

    frame.pop();

    let fraction = heli.health / max_health;
    let fill = health_color(
        fraction,
        Color::hex(0x00ff00),
        Color::hex(0xffff00),
        Color::hex(0xff0000),
    );
    meter(
        frame,
        heli.pos + Vec2::new(-40.0, -50.0),
        Vec2::new(80.0, 6.0),
        fraction,
        fill,
        Color::rgba(255, 0, 0, 0.3),
        Color::WHITE,
        1.0,
    );
}

fn draw_hostile(frame: &mut Frame, hostile: &Hostile) {
    let color = hostile.kind.color();
    frame.push(hostile.pos, 0.0, 1.0);

    match hostile.kind {
        HostileKind::Fighter => {
            frame.fill_rect(-25.0, -8.0, 50.0, 16.0, color);
            frame.fill_polygon(
                vec![Vec2::new(-25.0, 0.0), Vec2::new(-35.0, -5.0), Vec2::new(-35.0, 5.0)],
                color,
            );
            // Wings
            frame.fill_rect(-10.0, -15.0, 20.0, 30.0, color);
        }
        HostileKind::Bomber => {
            frame.fill_rect(-35.0, -12.0, 70.0, 24.0, color);
            frame.fill_rect(-20.0, -20.0, 40.0, 40.0, color);
            let engine = Color::hex(0x666666);
            frame.fill_rect(-40.0, -14.0, 10.0, 10.0, engine);
            frame.fill_rect(-40.0, 4.0, 10.0, 10.0, engine);
        }
        HostileKind::Scout => {
            frame.fill_polygon(
                vec![
                    Vec2::new(-25.0, 0.0),
                    Vec2::new(15.0, -10.0),
                    Vec2::new(25.0, 0.0),
                    Vec2::new(15.0, 10.0),
                ],
                color,
            );
        }
    }

    frame.pop();
}

fn draw_fireball(frame: &mut Frame, fireball: &Fireball) {
    if fireball.trail.len() > 1 {
        frame.polyline(fireball.trail.clone(), Color::hex(0xff4400), 6.0);
    }
    frame.push(Vec2::ZERO, 0.0, 1.0);
    frame.glow(Color::hex(0xff6600), 10.0);
    frame.fill_circle(fireball.pos, fireball.size.y, Color::hex(0xff6600));
    frame.pop();
}

fn draw_particle(frame: &mut Frame, p: &Particle<HeliParticleKind>) {
    frame.fill_circle(p.pos, p.size, p.color.with_alpha(p.color.a * p.fade()));
}

fn draw_hud(frame: &mut Frame, state: &HelicopterState) {
    let font = Font::bold(24.0);
    let lines = [
        format!("Score: {}", state.score),
        format!("Coins: 🪙 {}", state.coins),
        format!("Enemies: {}", state.enemies_destroyed),
        format!("Level: {}", state.level),
    ];
    for (i, line) in lines.into_iter().enumerate() {
        frame.text(
            Vec2::new(20.0, 40.0 + i as f32 * 30.0),
            line,
            font,
            TextAlign::Left,
            Color::WHITE,
        );
    }

    frame.text(
        Vec2::new(HELI_WIDTH - 20.0, 30.0),
        "WASD: Move • SPACE: Fire",
        Font::regular(14.0),
        TextAlign::Right,
        Color::WHITE,
    );
}

fn draw_game_over(frame: &mut Frame, state: &HelicopterState) {
    frame.overlay(Color::rgba(0, 0, 0, 0.7));

    let cx = HELI_WIDTH / 2.0;
    let cy = HELI_HEIGHT / 2.0;
    frame.text(
        Vec2::new(cx, cy - 50.0),
        "MISSION FAILED",
        Font::bold(64.0),
        TextAlign::Center,
        Color::hex(0xff4444),
    );

    let summary = [
        format!("Final Score: {}", state.score),
        format!("Coins Earned: 🪙 {}", state.coins),
        format!("Enemies Destroyed: {}", state.enemies_destroyed),
    ];
    for (i, line) in summary.into_iter().enumerate() {
        frame.text(
            Vec2::new(cx, cy + 20.0 + i as f32 * 40.0),
            line,
            Font::regular(32.0),
            TextAlign::Center,
            Color::WHITE,
        );
    }

    frame.text(
        Vec2::new(cx, cy + 150.0),
        "Restart to fly again",
        Font::regular(24.0),
        TextAlign::Center,
        Color::hex(0xcccccc),
    );
}
