//! Core types for the pagefx widgets.
//!
//! Shared by the favicon renderer and the particle field: CSS-style colors,
//! small 2D geometry helpers and the drawing surface trait hosts implement.

mod canvas;
mod color;
mod geometry;

pub use canvas::Canvas2d;
pub use color::{Color, ParseColorError};
pub use geometry::{Size, Vec2};
