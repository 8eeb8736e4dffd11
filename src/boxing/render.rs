//! Boxing frame builder: ring, fighters, effects, HUD

use glam::Vec2;

use super::pose::pose;
use super::state::{Boxer, BoxerState, BoxingParticleKind, BoxingState, GameMode, Side, SpecialProjectile};
use crate::consts::{BOXING_HEIGHT, BOXING_WIDTH};
use crate::renderer::shapes::{hash01, health_color, meter, shake_offset, star_points};
use crate::renderer::{Color, Font, Frame, TextAlign};
use crate::sim::Particle;

const BAR_WIDTH: f32 = 400.0;
const HUD_X: [f32; 2] = [50.0, 750.0];

/// Build the whole frame. `time` only drives idle animation and shake wobble.
pub fn render(state: &BoxingState, time: f32) -> Frame {
    let mut frame = Frame::new(BOXING_WIDTH, BOXING_HEIGHT);

    let shake = if state.screen_shake {
        shake_offset(state.ring_shake, time)
    } else {
        Vec2::ZERO
    };
    frame.push(shake, 0.0, 1.0);

    frame.fill_rect(0.0, 0.0, BOXING_WIDTH, BOXING_HEIGHT, Color::hex(0x0f0f23));
    draw_ring(&mut frame);

    for boxer in &state.boxers {
        draw_boxer(&mut frame, boxer, state, time);
    }
    for projectile in &state.projectiles {
        draw_projectile(&mut frame, projectile);
    }
    for particle in state.particles.iter() {
        draw_particle(&mut frame, particle);
    }

    draw_hud(&mut frame, state);

    if state.mode != GameMode::Fighting {
        draw_result(&mut frame, state);
    }

    frame.pop();
    frame
}

fn draw_ring(frame: &mut Frame) {
    frame.vertical_gradient(vec![
        (0.0, Color::hex(0x2a1810)),
        (0.7, Color::hex(0x1a1a2e)),
        (1.0, Color::hex(0x0f0f23)),
    ]);

    // Crowd silhouettes; stable between frames
    let crowd = Color::rgba(0, 0, 0, 0.3);
    for i in 0..100 {
        let x = hash01(i, 1) * BOXING_WIDTH;
        let y = 200.0 + hash01(i, 2) * 200.0;
        let size = 20.0 + hash01(i, 3) * 20.0;
        frame.fill_rect(x, y, size, size * 1.5, crowd);
    }

    // Canvas
    frame.fill_rect(50.0, 500.0, 1100.0, 150.0, Color::hex(0x8b4513));

    // Ropes
    for i in 0..3 {
        let y = 450.0 + i as f32 * 50.0;
        frame.polyline(vec![Vec2::new(50.0, y), Vec2::new(1150.0, y)], Color::WHITE, 3.0);
    }

    // Corner posts
    let post = Color::hex(0x444444);
    frame.fill_rect(45.0, 400.0, 10.0, 250.0, post);
    frame.fill_rect(1145.0, 400.0, 10.0, 250.0, post);
}

fn draw_boxer(frame: &mut Frame, boxer: &Boxer, state: &BoxingState, time: f32) {
    let flashing = boxer.invulnerable > 0 && (boxer.invulnerable / 3) % 2 == 1;
    let alpha = if flashing { 0.5 } else { 1.0 };

    let punch = match boxer.attack_kind {
        Some(kind) if boxer.attack_frame > 0 => {
            let frames = kind.frames(&state.tuning).max(1) as f32;
            1.0 - boxer.attack_frame as f32 / frames
        }
        _ => 0.0,
    };
    let s = pose(boxer.state, boxer.stance, time, punch);
    let body = boxer.fighter.color();

    frame.push(boxer.pos, 0.0, alpha);

    // Head and eyes
    frame.stroke_circle(s.head, 25.0, body, 8.0);
    frame.fill_rect(s.head.x - 8.0, s.head.y - 5.0, 4.0, 4.0, Color::WHITE);
    frame.fill_rect(s.head.x + 4.0, s.head.y - 5.0, 4.0, 4.0, Color::WHITE);

    // Torso
    frame.polyline(
        vec![s.torso + Vec2::new(0.0, -40.0), s.torso + Vec2::new(0.0, 40.0)],
        body,
        8.0,
    );

    // Arms and gloves
    let left_glove = s.left_arm + Vec2::new(-15.0, 20.0);
    let right_glove = s.right_arm + Vec2::new(15.0, 20.0);
    frame.polyline(vec![s.torso + Vec2::new(-10.0, -20.0), s.left_arm, left_glove], body, 8.0);
    frame.polyline(vec![s.torso + Vec2::new(10.0, -20.0), s.right_arm, right_glove], body, 8.0);
    let glove = Color::hex(0xff0000);
    frame.fill_circle(left_glove, 12.0, glove);
    frame.fill_circle(right_glove, 12.0, glove);

    // Legs and boots
    for (hip, leg) in [(-5.0, s.left_leg), (5.0, s.right_leg)] {
        frame.polyline(
            vec![s.torso + Vec2::new(hip, 40.0), leg, leg + Vec2::new(0.0, 80.0)],
            body,
            8.0,
        );
        frame.fill_rect(leg.x - 8.0, leg.y + 75.0, 16.0, 12.0, Color::hex(0x333333));
    }

    if boxer.state == BoxerState::Special {
        let radius = 60.0 + (time * 10.0).sin() * 10.0;
        frame.stroke_circle(Vec2::new(0.0, -80.0), radius, Color::hex(0xffff00), 3.0);
    }

    if boxer.state == BoxerState::KnockedDown {
        frame.fill_rect(-40.0, -160.0, 80.0, 160.0, Color::rgba(255, 0, 0, 0.5));
        frame.text(
            Vec2::new(0.0, -100.0),
            format!("{}", boxer.knockdown_timer.ceil() as u32),
            Font::bold(36.0),
            TextAlign::Center,
            Color::WHITE,
        );
    }

    frame.pop();
}

fn draw_projectile(frame: &mut Frame, p: &SpecialProjectile) {
    let color = p.kind.color();
    frame.fill_rect(p.pos.x, p.pos.y, p.size.x, p.size.y, color);

    frame.push(Vec2::ZERO, 0.0, 1.0);
    frame.glow(color, 15.0);
    frame.fill_rect(p.pos.x + 5.0, p.pos.y + 3.0, p.size.x - 10.0, p.size.y - 6.0, color);
    frame.pop();
}

fn draw_particle(frame: &mut Frame, p: &Particle<BoxingParticleKind>) {
    frame.push(p.pos, 0.0, p.fade());
    if p.kind == BoxingParticleKind::Stars {
        frame.fill_polygon(star_points(Vec2::ZERO, p.size), p.color);
    } else {
        frame.fill_circle(Vec2::ZERO, p.size, p.color);
    }
    frame.pop();
}

fn draw_hud(frame: &mut Frame, state: &BoxingState) {
    let t = &state.tuning;
    let white = Color::WHITE;
    let track = Color::hex(0x333333);

    for boxer in &state.boxers {
        let x = HUD_X[boxer.side.index()];

        let health = boxer.health / t.max_health;
        let fill = health_color(
            health,
            Color::hex(0x4caf50),
            Color::hex(0xff9800),
            Color::hex(0xf44336),
        );
        meter(frame, Vec2::new(x, 50.0), Vec2::new(BAR_WIDTH, 20.0), health, fill, track, white, 2.0);
        frame.text(
            Vec2::new(x, 45.0),
            boxer.fighter.name().to_uppercase(),
            Font::regular(14.0),
            TextAlign::Left,
            white,
        );

        let stamina = boxer.stamina / t.max_stamina;
        meter(
            frame,
            Vec2::new(x, 90.0),
            Vec2::new(BAR_WIDTH, 8.0),
            stamina,
            Color::hex(0x2196f3),
            track,
            white,
            1.0,
        );

        let special = boxer.special_meter / t.max_special_meter;
        let ready = boxer.special_meter >= t.special_cost;
        let fill = if ready {
            Color::hex(0xffff00)
        } else {
            Color::hex(0xff9800)
        };
        meter(frame, Vec2::new(x, 110.0), Vec2::new(BAR_WIDTH, 6.0), special, fill, track, white, 1.0);
        if ready && boxer.special_cooldown <= 0.0 {
            frame.text(
                Vec2::new(x + BAR_WIDTH + 10.0, 122.0),
                "SPECIAL READY!",
                Font::regular(12.0),
                TextAlign::Left,
                Color::hex(0xffff00),
            );
        }
    }

    // Clock and round
    let secs = state.timer.max(0.0) as u32;
    frame.text(
        Vec2::new(BOXING_WIDTH / 2.0, 40.0),
        format!("{}:{:02}", secs / 60, secs % 60),
        Font::bold(32.0),
        TextAlign::Center,
        white,
    );
    frame.text(
        Vec2::new(BOXING_WIDTH / 2.0, 65.0),
        format!("Round {}", state.round),
        Font::regular(18.0),
        TextAlign::Center,
        white,
    );

    for boxer in &state.boxers {
        let (x, align) = match boxer.side {
            Side::Player => (50.0, TextAlign::Left),
            Side::Opponent => (1150.0, TextAlign::Right),
        };

        if boxer.combo_count > 1 {
            frame.text(
                Vec2::new(x, 150.0),
                format!("{} HIT COMBO!", boxer.combo_count),
                Font::bold(24.0),
                align,
                Color::hex(0xffff00),
            );
        }

        let wins = state.round_wins[boxer.side.index()] as usize;
        if wins > 0 {
            frame.text(Vec2::new(x, 180.0), "★".repeat(wins), Font::regular(20.0), align, Color::hex(0xffd700));
        }
        frame.text(
            Vec2::new(x, 200.0),
            format!("🏆 {}", boxer.trophies),
            Font::regular(16.0),
            align,
            Color::hex(0xffd700),
        );
        frame.text(
            Vec2::new(x, 220.0),
            format!("🪙 {}", boxer.coins),
            Font::regular(16.0),
            align,
            Color::hex(0xffa500),
        );
    }
}

fn draw_result(frame: &mut Frame, state: &BoxingState) {
    let Some(winner) = state.winner else {
        return;
    };
    let center = Vec2::new(BOXING_WIDTH / 2.0, BOXING_HEIGHT / 2.0);

    frame.overlay(Color::rgba(0, 0, 0, 0.8));
    frame.text(
        center + Vec2::new(0.0, -50.0),
        format!("{} WINS!", state.boxer(winner).fighter.name().to_uppercase()),
        Font::bold(64.0),
        TextAlign::Center,
        Color::hex(0xffff00),
    );
    let verdict = match winner {
        Side::Player => "VICTORY!",
        Side::Opponent => "DEFEAT!",
    };
    frame.text(center + Vec2::new(0.0, 20.0), verdict, Font::regular(32.0), TextAlign::Center, Color::WHITE);
    frame.text(
        center + Vec2::new(0.0, 80.0),
        "Restart to fight again",
        Font::regular(24.0),
        TextAlign::Center,
        Color::hex(0xcccccc),
    );
}
