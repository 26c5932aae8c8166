//! Software rasterizer for a [`DisplayList`].
//!
//! ```text
//! Box generation → Text layout → Paint → Raster
//!                                  ↓        ↓
//!                            DisplayList → Pixels
//! ```
//!
//! The canvas knows nothing about elements or styles. It executes drawing
//! commands, using fontdue for glyph coverage.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use image::{Rgba, RgbaImage};
use quire_common::image::ImageSurface;
use quire_layout::text::place_glyphs;
use quire_layout::{ColorValue, DisplayCommand, DisplayList, PaintTarget, TextRun};

use crate::font_metrics::{FontSet, FontdueFontMetrics};

/// An RGBA pixel buffer that implements [`PaintTarget`].
pub struct Canvas<'f> {
    buffer: RgbaImage,
    fonts: &'f FontSet,
}

impl std::fmt::Debug for Canvas<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.buffer.width())
            .field("height", &self.buffer.height())
            .finish_non_exhaustive()
    }
}

impl<'f> Canvas<'f> {
    /// A `width` x `height` canvas filled with `background`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: ColorValue, fonts: &'f FontSet) -> Self {
        let fill = Rgba([background.r, background.g, background.b, background.a]);
        Self {
            buffer: RgbaImage::from_pixel(width, height, fill),
            fonts,
        }
    }

    /// Execute every command of `display_list` in order.
    pub fn render(&mut self, display_list: &DisplayList) {
        for command in display_list.commands() {
            match command {
                DisplayCommand::DrawImage { x, y, surface } => self.draw_image(surface, *x, *y),
                DisplayCommand::DrawText(run) => self.draw_text(run),
            }
        }
    }

    /// The pixel at `(x, y)`, or `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.buffer.get_pixel_checked(x, y).map(|px| px.0)
    }

    /// Save the canvas to a file; the format follows the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be saved to the given path.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.buffer
            .save(path)
            .map_err(|e| anyhow::anyhow!("failed to save canvas to '{}': {e}", path.display()))?;
        Ok(())
    }

    /// Consume the canvas and return its pixels.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.buffer
    }

    /// Blend `color` at `coverage` onto the pixel at `(px, py)`.
    #[allow(clippy::cast_sign_loss)]
    fn blend_pixel(&mut self, px: i64, py: i64, color: Rgba<u8>, coverage: u8) {
        if px < 0
            || py < 0
            || px >= i64::from(self.buffer.width())
            || py >= i64::from(self.buffer.height())
        {
            return;
        }
        let (px, py) = (px as u32, py as u32);
        let bg = *self.buffer.get_pixel(px, py);
        self.buffer
            .put_pixel(px, py, alpha_blend(color, bg, coverage));
    }
}

impl PaintTarget for Canvas<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn draw_image(&mut self, surface: &Arc<ImageSurface>, x: f32, y: f32) {
        let dest_x = x.round() as i64;
        let dest_y = y.round() as i64;
        for sy in 0..surface.height() {
            for sx in 0..surface.width() {
                let Some([r, g, b, a]) = surface.pixel(sx, sy) else {
                    continue;
                };
                if a == 0 {
                    continue;
                }
                self.blend_pixel(
                    dest_x + i64::from(sx),
                    dest_y + i64::from(sy),
                    Rgba([r, g, b, 255]),
                    a,
                );
            }
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    fn draw_text(&mut self, run: &TextRun) {
        let Some(face) = self.fonts.select(&run.font) else {
            return;
        };
        let metrics = FontdueFontMetrics::new(self.fonts);
        let color = Rgba([run.color.r, run.color.g, run.color.b, 255]);

        for glyph in place_glyphs(&run.text, &run.font, &metrics) {
            let (glyph_metrics, bitmap) = face.rasterize(glyph.ch, glyph.size);
            let glyph_x = (run.x + glyph.x).round() as i64 + i64::from(glyph_metrics.xmin);
            // fontdue's ymin is the bottom edge relative to the baseline
            let glyph_y = run.baseline.round() as i64
                - i64::from(glyph_metrics.ymin)
                - glyph_metrics.height as i64;

            for gy in 0..glyph_metrics.height {
                for gx in 0..glyph_metrics.width {
                    let coverage = bitmap[gy * glyph_metrics.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    let alpha = (u16::from(coverage) * u16::from(run.color.a) / 255) as u8;
                    self.blend_pixel(glyph_x + gx as i64, glyph_y + gy as i64, color, alpha);
                }
            }
        }
    }
}

/// Alpha blend a foreground color onto a background color.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_blend(fg: Rgba<u8>, bg: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = f32::from(alpha) / 255.0;
    let inv_a = 1.0 - a;

    Rgba([
        f32::from(fg[0]).mul_add(a, f32::from(bg[0]) * inv_a) as u8,
        f32::from(fg[1]).mul_add(a, f32::from(bg[1]) * inv_a) as u8,
        f32::from(fg[2]).mul_add(a, f32::from(bg[2]) * inv_a) as u8,
        255,
    ])
}
