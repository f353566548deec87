//! Geometry primitives shared by the scene graph and widgets.

pub use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    /// Build a rect from its top-left corner and size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Width of the rect
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rect
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Size as a vector
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Midpoint of the rect
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Grow the rect outward by `margin` on every edge
    pub fn inflate(self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Whether a point lies inside the rect (edges inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// RGBA color with components in `[0, 1]` and straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component
    pub a: f32,
}

impl Color {
    /// Fully transparent black
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    /// Opaque white
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    /// Opaque black
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    /// Build a color from all four components
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Componentwise linear interpolation toward `other`
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Same color with the alpha replaced
    pub fn with_alpha(self, a: f32) -> Color {
        Color { a, ..self }
    }

    /// Same color with the alpha multiplied by `factor`
    pub fn faded(self, factor: f32) -> Color {
        Color {
            a: self.a * factor,
            ..self
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_and_inflate() {
        let r = Rect::from_pos_size(Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0));
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(30.0, 20.0)));
        assert!(!r.contains(Vec2::new(30.1, 20.0)));
        assert!(r.inflate(5.0).contains(Vec2::new(34.0, 24.0)));
    }

    #[test]
    fn color_lerp_endpoints() {
        let a = Color::rgba(0.0, 0.2, 0.4, 1.0);
        let b = Color::rgba(1.0, 0.8, 0.6, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.a - 0.5).abs() < 1e-6);
    }

    #[test]
    fn color_alpha_override() {
        let c = Color::rgb(0.5, 0.5, 0.5);
        assert_eq!(c.with_alpha(0.25).a, 0.25);
        assert_eq!(c.with_alpha(0.5).faded(0.5).a, 0.25);
    }
}
