//! Paint targets and the display list.
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! Text fragments and replaced content paint through [`PaintTarget`] so they
//! never depend on a particular rasterizer. [`DisplayList`] records the calls
//! in painting order for a renderer (or a test) to replay.

use std::sync::Arc;

use quire_common::image::ImageSurface;

use crate::style::ColorValue;
use crate::text::FontDescription;

/// A positioned run of text on a single baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// The characters to draw.
    pub text: String,
    /// X coordinate of the pen at the start of the run.
    pub x: f32,
    /// Y coordinate of the baseline, rise already applied.
    pub baseline: f32,
    /// Face, size, variant and letter spacing.
    pub font: FontDescription,
    /// Text color.
    pub color: ColorValue,
}

/// Something that can be painted on.
pub trait PaintTarget {
    /// Draw `surface` at its intrinsic size with its top-left corner at
    /// `(x, y)`.
    fn draw_image(&mut self, surface: &Arc<ImageSurface>, x: f32, y: f32);

    /// Draw a text run.
    fn draw_text(&mut self, run: &TextRun);
}

/// One recorded paint call.
///
/// [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// Replaced content at its intrinsic size.
    ///
    /// Step 5: "the replaced content of replaced inline-level elements"
    DrawImage {
        /// X coordinate of the image's top-left corner.
        x: f32,
        /// Y coordinate of the image's top-left corner.
        y: f32,
        /// The decoded pixels, shared with the replacement.
        surface: Arc<ImageSurface>,
    },

    /// A positioned text run.
    ///
    /// Step 7: "the element's text"
    DrawText(TextRun),
}

/// Paint calls recorded in the order they were made.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// A list with no commands.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append `command`; later commands paint over earlier ones.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Recorded commands, back to front.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// The text runs only, in order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|command| match command {
            DisplayCommand::DrawText(run) => Some(run),
            DisplayCommand::DrawImage { .. } => None,
        })
    }

    /// How many commands were recorded.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl PaintTarget for DisplayList {
    fn draw_image(&mut self, surface: &Arc<ImageSurface>, x: f32, y: f32) {
        self.push(DisplayCommand::DrawImage {
            x,
            y,
            surface: Arc::clone(surface),
        });
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.push(DisplayCommand::DrawText(run.clone()));
    }
}
