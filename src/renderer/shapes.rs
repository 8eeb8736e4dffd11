//! Shape helpers shared by both engines' renderers

use glam::Vec2;

use super::frame::{Color, Frame};

/// Five-point star traced at 144° steps (self-intersecting, filled nonzero)
pub fn star_points(center: Vec2, size: f32) -> Vec<Vec2> {
    (0..5)
        .map(|i| {
            let angle = (i as f32 * 144.0).to_radians();
            center + Vec2::new(angle.cos(), angle.sin()) * size
        })
        .collect()
}

/// Horizontal meter: background, proportional fill, border
#[allow(clippy::too_many_arguments)]
pub fn meter(
    frame: &mut Frame,
    min: Vec2,
    size: Vec2,
    fraction: f32,
    fill: Color,
    background: Color,
    border: Color,
    border_width: f32,
) {
    let fraction = fraction.clamp(0.0, 1.0);
    frame.fill_rect(min.x, min.y, size.x, size.y, background);
    frame.fill_rect(min.x, min.y, size.x * fraction, size.y, fill);
    frame.stroke_rect(min.x, min.y, size.x, size.y, border, border_width);
}

/// Traffic-light color for a health fraction (>60% high, >30% mid, else low)
pub fn health_color(fraction: f32, high: Color, mid: Color, low: Color) -> Color {
    if fraction > 0.6 {
        high
    } else if fraction > 0.3 {
        mid
    } else {
        low
    }
}

/// Screen-shake offset for a given intensity; wobbles with time instead of
/// drawing random numbers so rendering stays a pure function of state
pub fn shake_offset(intensity: f32, time: f32) -> Vec2 {
    if intensity <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((time * 71.0).sin(), (time * 53.0).cos()) * 0.5 * intensity * 20.0
}

/// Cheap integer hash mapped to 0..1, for stable pseudo-random decoration
pub fn hash01(i: u32, salt: u32) -> f32 {
    let h = i.wrapping_mul(2654435761).wrapping_add(salt.wrapping_mul(7919));
    let h = (h ^ (h >> 15)).wrapping_mul(2246822519);
    (h % 10_000) as f32 / 10_000.0
}
