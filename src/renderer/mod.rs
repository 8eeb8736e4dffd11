//! 2D rendering
//!
//! Engines build a `Frame` (pure function of state); the Canvas 2D backend
//! replays it on the page.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod frame;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use frame::{Color, DrawCmd, Font, Frame, TextAlign};
