//! Draw surface boundary.
//!
//! The host supplies a 2D immediate-mode surface; the core only ever asks
//! for filled rounded rectangles, flat or vertically gradient-filled, with
//! an optional blur filter.

use crate::geometry::{Color, Rect};

/// Host-implemented 2D drawing surface.
pub trait DrawSurface {
    /// Fill a rounded rectangle with a flat color.
    ///
    /// `blur` is a filter sigma; 0 means no blur.
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, blur: f32);

    /// Fill a rounded rectangle with a vertical linear gradient from `top`
    /// to `bottom`.
    fn fill_gradient_rect(&mut self, rect: Rect, radius: f32, top: Color, bottom: Color, blur: f32);
}
