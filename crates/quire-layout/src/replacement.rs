//! Replaced content.
//!
//! [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
//!
//! "A replaced element is an element whose content is outside the scope of
//! the CSS formatting model, such as an image, embedded document, or applet."
//!
//! Replaced content is rendered externally and behaves as an atomic opaque
//! box. It may or may not have intrinsic dimensions.

use std::sync::Arc;

use quire_common::image::ImageSurface;

use crate::paint::PaintTarget;

/// Intrinsic dimensions of replaced content.
///
/// [§ 5.1 Intrinsic Sizes](https://www.w3.org/TR/css-images-3/#intrinsic-dimensions)
pub trait Replacement {
    /// Intrinsic width in pixels, if the content has one.
    fn intrinsic_width(&self) -> Option<f32>;

    /// Intrinsic height in pixels, if the content has one.
    fn intrinsic_height(&self) -> Option<f32>;

    /// Width divided by height. Undefined (not an error) when either
    /// dimension is missing or the height is zero.
    fn intrinsic_ratio(&self) -> Option<f32> {
        match (self.intrinsic_width(), self.intrinsic_height()) {
            (Some(width), Some(height)) if height != 0.0 => Some(width / height),
            _ => None,
        }
    }
}

/// Content of an `<img>` element: a decoded surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReplacement {
    surface: Arc<ImageSurface>,
}

impl ImageReplacement {
    /// Wrap a decoded surface.
    #[must_use]
    pub const fn new(surface: Arc<ImageSurface>) -> Self {
        Self { surface }
    }

    /// The decoded surface.
    #[must_use]
    pub const fn surface(&self) -> &Arc<ImageSurface> {
        &self.surface
    }

    /// Paint the surface with its top-left corner at `(x, y)`.
    pub fn draw(&self, target: &mut dyn PaintTarget, x: f32, y: f32) {
        target.draw_image(&self.surface, x, y);
    }
}

impl Replacement for ImageReplacement {
    #[allow(clippy::cast_precision_loss)]
    fn intrinsic_width(&self) -> Option<f32> {
        Some(self.surface.width() as f32)
    }

    #[allow(clippy::cast_precision_loss)]
    fn intrinsic_height(&self) -> Option<f32> {
        Some(self.surface.height() as f32)
    }
}

/// Every kind of replaced content a box can own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacedContent {
    /// A raster or rasterized vector image.
    Image(ImageReplacement),
}

impl ReplacedContent {
    /// Paint the content with its top-left corner at `(x, y)`.
    pub fn draw(&self, target: &mut dyn PaintTarget, x: f32, y: f32) {
        match self {
            Self::Image(image) => image.draw(target, x, y),
        }
    }
}

impl Replacement for ReplacedContent {
    fn intrinsic_width(&self) -> Option<f32> {
        match self {
            Self::Image(image) => image.intrinsic_width(),
        }
    }

    fn intrinsic_height(&self) -> Option<f32> {
        match self {
            Self::Image(image) => image.intrinsic_height(),
        }
    }
}
