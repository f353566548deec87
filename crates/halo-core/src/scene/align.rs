//! Frame-relative alignment and position resolution.
//!
//! Both the per-frame self-resolution in the scene traversal and the
//! arbitrary-placement query in [`crate::Scene::resolve_at`] go through
//! [`resolve`]; the two paths must stay numerically identical.

use crate::geometry::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Alignment category selecting an origin within a reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Align {
    /// Frame top-left corner
    TopLeft,
    /// Horizontal midpoint, frame top edge
    TopCenter,
    /// Frame top-right corner
    TopRight,
    /// Frame left edge, vertical midpoint
    CenterLeft,
    /// Frame midpoint on both axes
    Center,
    /// Frame right edge, vertical midpoint
    CenterRight,
    /// Frame bottom-left corner
    BottomLeft,
    /// Horizontal midpoint, frame bottom edge
    BottomCenter,
    /// Frame bottom-right corner
    BottomRight,
    /// No alignment of its own; the frame origin is used directly
    #[default]
    Inherit,
}

impl Align {
    /// Origin point this category selects within `frame`
    pub fn origin_in(self, frame: Rect) -> Vec2 {
        let c = frame.center();
        match self {
            Align::TopLeft => frame.min,
            Align::TopCenter => Vec2::new(c.x, frame.min.y),
            Align::TopRight => Vec2::new(frame.max.x, frame.min.y),
            Align::CenterLeft => Vec2::new(frame.min.x, c.y),
            Align::Center => c,
            Align::CenterRight => Vec2::new(frame.max.x, c.y),
            Align::BottomLeft => Vec2::new(frame.min.x, frame.max.y),
            Align::BottomCenter => Vec2::new(c.x, frame.max.y),
            Align::BottomRight => frame.max,
            Align::Inherit => frame.min,
        }
    }

    /// All nine concrete categories (excludes [`Align::Inherit`])
    pub fn all() -> &'static [Align] {
        &[
            Align::TopLeft,
            Align::TopCenter,
            Align::TopRight,
            Align::CenterLeft,
            Align::Center,
            Align::CenterRight,
            Align::BottomLeft,
            Align::BottomCenter,
            Align::BottomRight,
        ]
    }
}

/// Resolve the top-left screen position of a box placed in `frame`.
///
/// The alignment category selects an origin within the frame, `offset` is
/// added, and `anchor * size` is subtracted so the anchor fraction of the
/// box's own footprint lands on the origin.
pub fn resolve(frame: Rect, align: Align, offset: Vec2, anchor: Vec2, size: Vec2) -> Vec2 {
    align.origin_in(frame) + offset - anchor * size
}
