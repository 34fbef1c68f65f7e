//! The drawing surface a host hands to a widget.

use crate::{Color, Size, Vec2};

/// A 2D drawing context, in surface pixels with the origin at the top left.
pub trait Canvas2d {
    /// Current pixel size of the surface.
    fn size(&self) -> Size;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Stroke a quadratic Bézier curve from `from` to `to` bent toward `control`.
    fn stroke_quadratic(&mut self, from: Vec2, control: Vec2, to: Vec2, width: f32, color: Color);
}
