//! Canvas 2D backend: replays a `Frame` onto a `CanvasRenderingContext2d`

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::frame::{DrawCmd, Frame};
use crate::error::EngineError;

/// Owns the drawing context for one engine
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Size the canvas to the engine's fixed resolution and grab its 2D context
    pub fn new(canvas: HtmlCanvasElement, width: f32, height: f32) -> Result<Self, EngineError> {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx = canvas
            .get_context("2d")
            .map_err(|_| EngineError::MissingContext)?
            .ok_or(EngineError::MissingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::MissingContext)?;

        Ok(Self { ctx })
    }

    /// Repaint the entire surface
    pub fn paint(&self, frame: &Frame) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.clear_rect(0.0, 0.0, frame.width as f64, frame.height as f64);

        for cmd in &frame.cmds {
            match cmd {
                DrawCmd::Gradient { min, size, stops } => {
                    let gradient = ctx.create_linear_gradient(
                        min.x as f64,
                        min.y as f64,
                        min.x as f64,
                        (min.y + size.y) as f64,
                    );
                    for (offset, color) in stops {
                        let _ = gradient.add_color_stop(*offset, &color.to_css());
                    }
                    ctx.set_fill_style_canvas_gradient(&gradient);
                    ctx.fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                }
                DrawCmd::FillRect { min, size, color } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                }
                DrawCmd::StrokeRect {
                    min,
                    size,
                    color,
                    width,
                } => {
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*width as f64);
                    ctx.stroke_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                }
                DrawCmd::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    ctx.fill();
                }
                DrawCmd::StrokeCircle {
                    center,
                    radius,
                    color,
                    width,
                } => {
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*width as f64);
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    ctx.stroke();
                }
                DrawCmd::Polyline {
                    points,
                    color,
                    width,
                } => {
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*width as f64);
                    ctx.set_line_cap("round");
                    trace(ctx, points);
                    ctx.stroke();
                }
                DrawCmd::FillPolygon { points, color } => {
                    ctx.set_fill_style_str(&color.to_css());
                    trace(ctx, points);
                    ctx.close_path();
                    ctx.fill();
                }
                DrawCmd::Text {
                    pos,
                    text,
                    font,
                    align,
                    color,
                } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.set_font(&font.to_css());
                    ctx.set_text_align(align.as_str());
                    let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
                DrawCmd::Push {
                    translate,
                    rotate,
                    alpha,
                } => {
                    ctx.save();
                    let _ = ctx.translate(translate.x as f64, translate.y as f64);
                    if *rotate != 0.0 {
                        let _ = ctx.rotate(*rotate as f64);
                    }
                    ctx.set_global_alpha(ctx.global_alpha() * *alpha as f64);
                }
                DrawCmd::Glow { color, blur } => {
                    ctx.set_shadow_color(&color.to_css());
                    ctx.set_shadow_blur(*blur as f64);
                }
                DrawCmd::Pop => ctx.restore(),
            }
        }

        ctx.restore();
    }
}

fn trace(ctx: &CanvasRenderingContext2d, points: &[Vec2]) {
    ctx.begin_path();
    if let Some(first) = points.first() {
        ctx.move_to(first.x as f64, first.y as f64);
    }
    for p in points.iter().skip(1) {
        ctx.line_to(p.x as f64, p.y as f64);
    }
}
