//! Backend-free draw list
//!
//! Engines describe a whole frame as a list of 2D drawing commands. The
//! web backend replays it onto a canvas; tests inspect it directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::hex(0xffffff);
    pub const BLACK: Color = Color::hex(0x000000);

    /// Opaque color from 0xRRGGBB
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string understood by the canvas API
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub px: f32,
    pub bold: bool,
}

impl Font {
    pub const fn regular(px: f32) -> Self {
        Self { px, bold: false }
    }

    pub const fn bold(px: f32) -> Self {
        Self { px, bold: true }
    }

    pub fn to_css(&self) -> String {
        if self.bold {
            format!("bold {}px Arial", self.px)
        } else {
            format!("{}px Arial", self.px)
        }
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCmd {
    /// Vertical gradient over a rectangle; stops are (offset 0..1, color)
    Gradient {
        min: Vec2,
        size: Vec2,
        stops: Vec<(f32, Color)>,
    },
    FillRect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    StrokeRect {
        min: Vec2,
        size: Vec2,
        color: Color,
        width: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        width: f32,
    },
    /// Open stroked path with round caps
    Polyline {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        font: Font,
        align: TextAlign,
        color: Color,
    },
    /// Save state, then translate/rotate/fade everything until the matching `Pop`
    Push {
        translate: Vec2,
        rotate: f32,
        alpha: f32,
    },
    /// Soft glow around subsequent shapes until the enclosing `Pop`
    Glow {
        color: Color,
        blur: f32,
    },
    Pop,
}

/// A complete frame; the whole surface is repainted every time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub cmds: Vec<DrawCmd>,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            cmds: Vec::with_capacity(256),
        }
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.cmds.push(DrawCmd::FillRect {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color,
        });
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, width: f32) {
        self.cmds.push(DrawCmd::StrokeRect {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color,
            width,
        });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.cmds.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.cmds.push(DrawCmd::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, color: Color, width: f32) {
        if points.len() < 2 {
            return;
        }
        self.cmds.push(DrawCmd::Polyline {
            points,
            color,
            width,
        });
    }

    pub fn fill_polygon(&mut self, points: Vec<Vec2>, color: Color) {
        if points.len() < 3 {
            return;
        }
        self.cmds.push(DrawCmd::FillPolygon { points, color });
    }

    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, font: Font, align: TextAlign, color: Color) {
        self.cmds.push(DrawCmd::Text {
            pos,
            text: text.into(),
            font,
            align,
            color,
        });
    }

    pub fn vertical_gradient(&mut self, stops: Vec<(f32, Color)>) {
        self.cmds.push(DrawCmd::Gradient {
            min: Vec2::ZERO,
            size: Vec2::new(self.width, self.height),
            stops,
        });
    }

    pub fn push(&mut self, translate: Vec2, rotate: f32, alpha: f32) {
        self.cmds.push(DrawCmd::Push {
            translate,
            rotate,
            alpha,
        });
    }

    pub fn glow(&mut self, color: Color, blur: f32) {
        self.cmds.push(DrawCmd::Glow { color, blur });
    }

    pub fn pop(&mut self) {
        self.cmds.push(DrawCmd::Pop);
    }

    /// Darken the whole surface (terminal-mode overlays)
    pub fn overlay(&mut self, color: Color) {
        self.fill_rect(0.0, 0.0, self.width, self.height, color);
    }

    /// Every `Push` has a matching `Pop`
    pub fn is_balanced(&self) -> bool {
        let mut depth: i32 = 0;
        for cmd in &self.cmds {
            match cmd {
                DrawCmd::Push { .. } => depth += 1,
                DrawCmd::Pop => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }

    /// All text drawn this frame, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_css() {
        assert_eq!(Color::hex(0xff6600).to_css(), "#ff6600");
        assert_eq!(
            Color::rgba(0, 0, 0, 0.5).to_css(),
            "rgba(0, 0, 0, 0.5)"
        );
    }

    #[test]
    fn test_font_css() {
        assert_eq!(Font::bold(64.0).to_css(), "bold 64px Arial");
        assert_eq!(Font::regular(14.0).to_css(), "14px Arial");
    }

    #[test]
    fn test_balance() {
        let mut frame = Frame::new(100.0, 100.0);
        frame.push(Vec2::ZERO, 0.0, 1.0);
        frame.fill_rect(0.0, 0.0, 1.0, 1.0, Color::WHITE);
        assert!(!frame.is_balanced());
        frame.pop();
        assert!(frame.is_balanced());
        frame.pop();
        assert!(!frame.is_balanced());
    }

    #[test]
    fn test_degenerate_paths_are_skipped() {
        let mut frame = Frame::new(10.0, 10.0);
        frame.polyline(vec![Vec2::ZERO], Color::WHITE, 1.0);
        frame.fill_polygon(vec![Vec2::ZERO, Vec2::ONE], Color::WHITE);
        assert!(frame.cmds.is_empty());
    }
}
