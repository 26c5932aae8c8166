//! The first line of a text run, and the loop that splits a run into lines.
//!
//! Inline layout places text one line box at a time: it asks how much of
//! the remaining text fits in the space left on the current line, places
//! that, and continues with the rest on the next line, whose available
//! width may differ (floats, indentation).

use std::ops::{Deref, DerefMut};

use serde::Serialize;

use crate::LayoutError;
use crate::box_model::Rect;
use crate::boxes::LayoutBox;

use super::fragment::{LayoutLine, TextFragment};
use super::metrics::FontMetrics;

/// A text fragment that reports on its first line only.
///
/// All of [`TextFragment`]'s mutators are reachable through `Deref`.
/// Nothing is cached: every query reflects the current configuration.
#[derive(Debug, Clone)]
pub struct TextLineFragment<'m> {
    fragment: TextFragment<'m>,
}

impl<'m> Deref for TextLineFragment<'m> {
    type Target = TextFragment<'m>;

    fn deref(&self) -> &Self::Target {
        &self.fragment
    }
}

impl DerefMut for TextLineFragment<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.fragment
    }
}

impl<'m> TextLineFragment<'m> {
    /// A line fragment measured with `metrics`, with the default font.
    #[must_use]
    pub fn new(text: &str, width: Option<f32>, metrics: &'m dyn FontMetrics) -> Self {
        Self::from_fragment(TextFragment::new(text, width, metrics))
    }

    /// A line fragment configured from a text box.
    ///
    /// # Errors
    ///
    /// See [`TextFragment::from_textbox`].
    pub fn from_textbox(
        text_box: &LayoutBox,
        metrics: &'m dyn FontMetrics,
    ) -> Result<Self, LayoutError> {
        TextFragment::from_textbox(text_box, metrics).map(Self::from_fragment)
    }

    /// Wrap an already configured fragment.
    #[must_use]
    pub const fn from_fragment(fragment: TextFragment<'m>) -> Self {
        Self { fragment }
    }

    /// The whole source text, not only the first line.
    #[must_use]
    pub fn source_text(&self) -> &str {
        self.fragment.text()
    }

    fn first_line(&self) -> LayoutLine {
        let mut layout = self.fragment.lay_out(Some(1));
        // break_lines always yields at least one line
        layout.lines.swap_remove(0)
    }

    /// The text that fits on the first line, without the whitespace or
    /// newline it broke at.
    #[must_use]
    pub fn text(&self) -> String {
        self.first_line().text
    }

    /// The text that did not fit on the first line, or `None` if it all
    /// fits.
    ///
    /// This starts where the second line starts, so a preserved newline
    /// ending the first line is in neither part.
    #[must_use]
    pub fn remaining_text(&self) -> Option<String> {
        let layout = self.fragment.lay_out(Some(2));
        layout
            .lines
            .get(1)
            .map(|second| self.fragment.text()[second.start..].to_string())
    }

    /// Width and height in pixels of the first line laid out on its own.
    #[must_use]
    pub fn size(&self) -> (f32, f32) {
        let mut alone = self.fragment.clone();
        alone.set_text(&self.text());
        alone.size()
    }

    /// Logical extents of the first line, relative to its baseline origin.
    #[must_use]
    pub fn logical_extents(&self) -> Rect {
        self.first_line().logical
    }

    /// Ink extents of the first line, relative to its baseline origin.
    #[must_use]
    pub fn ink_extents(&self) -> Rect {
        self.first_line().ink
    }

    /// Distance from the top of the first line to its baseline.
    #[must_use]
    pub fn baseline(&self) -> f32 {
        let descent = self.logical_extents().bottom();
        self.size().1 - descent
    }

    /// Everything known about the first line, in one pass.
    #[must_use]
    pub fn line_metrics(&self) -> LineMetrics {
        let line = self.first_line();
        let (width, height) = self.size();
        LineMetrics {
            baseline: height - line.logical.bottom(),
            text: line.text,
            width,
            height,
            logical: line.logical,
            ink: line.ink,
        }
    }
}

/// Measurements of one line, as produced by [`LineSplitter`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineMetrics {
    /// The text on the line.
    pub text: String,
    /// Pixel width of the line.
    pub width: f32,
    /// Pixel height of the line.
    pub height: f32,
    /// Distance from the top of the line to its baseline.
    pub baseline: f32,
    /// Logical extents relative to the baseline origin.
    pub logical: Rect,
    /// Ink extents relative to the baseline origin.
    pub ink: Rect,
}

/// Splits a run into lines by repeatedly taking the first line and
/// continuing with the remainder.
///
/// The wrap width can be changed between lines through
/// [`LineSplitter::fragment_mut`].
///
/// ```
/// use quire_layout::{LineSplitter, TextLineFragment, ApproximateFontMetrics};
///
/// let metrics = ApproximateFontMetrics;
/// let fragment = TextLineFragment::new("The quick brown fox", Some(90.0), &metrics);
/// let lines: Vec<String> = LineSplitter::new(fragment).map(|line| line.text).collect();
/// assert_eq!(lines, ["The quick", "brown fox"]);
/// ```
#[derive(Debug)]
pub struct LineSplitter<'m> {
    fragment: TextLineFragment<'m>,
    finished: bool,
}

impl<'m> LineSplitter<'m> {
    /// Start splitting the fragment's text.
    #[must_use]
    pub const fn new(fragment: TextLineFragment<'m>) -> Self {
        Self {
            fragment,
            finished: false,
        }
    }

    /// The fragment holding the text still to be split.
    pub const fn fragment_mut(&mut self) -> &mut TextLineFragment<'m> {
        &mut self.fragment
    }
}

impl Iterator for LineSplitter<'_> {
    type Item = LineMetrics;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let line = self.fragment.line_metrics();
        match self.fragment.remaining_text() {
            Some(rest) if !rest.is_empty() => self.fragment.set_text(&rest),
            _ => self.finished = true,
        }
        Some(line)
    }
}
