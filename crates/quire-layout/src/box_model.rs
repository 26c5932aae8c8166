//! Rectangles shared by text extents and paint positions.

use serde::Serialize;

/// An axis-aligned rectangle in CSS pixels.
///
/// Text extents use the line's baseline origin as `(0, 0)` with `y` growing
/// downward, so the part of a glyph above the baseline has negative `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Construct a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the rectangle encloses no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The smallest rectangle containing both. Empty rectangles do not
    /// contribute.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Snap to whole pixels the way logical extents are reported: every
    /// edge to the nearest pixel.
    #[must_use]
    pub fn round_nearest(&self) -> Self {
        let x = self.x.round();
        let y = self.y.round();
        Self::new(x, y, self.right().round() - x, self.bottom().round() - y)
    }

    /// Snap to whole pixels the way ink extents are reported: grow outward
    /// so every touched pixel is included.
    #[must_use]
    pub fn round_outward(&self) -> Self {
        let x = self.x.floor();
        let y = self.y.floor();
        Self::new(x, y, self.right().ceil() - x, self.bottom().ceil() - y)
    }
}
