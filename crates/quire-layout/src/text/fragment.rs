//! Styled text runs wrapped into lines.
//!
//! A [`TextFragment`] holds a run of text plus everything that affects how it
//! is measured: the wrap width, the font, alignment and line spacing. Every
//! query lays the text out afresh from that state, so results never go stale
//! after a mutator is called.

use std::str::FromStr;

use crate::LayoutError;
use crate::box_model::Rect;
use crate::boxes::LayoutBox;
use crate::paint::{PaintTarget, TextRun};
use crate::style::{ColorValue, FontStyle, FontVariant, TextAlign};

use super::line_break::{LineSpan, break_lines};
use super::metrics::{
    ApproximateFontMetrics, FontDescription, FontMetrics, advance_width, place_glyphs,
};

static APPROXIMATE_METRICS: ApproximateFontMetrics = ApproximateFontMetrics;

/// One laid-out line.
///
/// Rectangles are relative to the line's baseline origin with `y` growing
/// downward.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    /// The visible content of the line.
    pub text: String,
    /// Byte offset of the line in the fragment's text.
    pub start: usize,
    /// End of the visible content.
    pub end: usize,
    /// Byte offset where the next line starts.
    pub next: usize,
    /// Whether the line ends its paragraph.
    pub hard_break: bool,
    /// Horizontal offset from alignment.
    pub x_offset: f32,
    /// Natural advance width of the content, letter spacing included.
    pub advance: f32,
    /// Extra space added to every inter-word gap by justification.
    pub justify_gap: f32,
    /// Logical extents, rounded to the nearest pixel.
    pub logical: Rect,
    /// Ink extents, rounded outward.
    pub ink: Rect,
}

/// The result of laying out a fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Lines in order.
    pub lines: Vec<LayoutLine>,
    /// Distance from the top of a line to its baseline, in whole pixels.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of a line, in whole pixels.
    pub descent: f32,
    /// Height of one line, in whole pixels.
    pub line_height: f32,
    /// Extra space between consecutive lines.
    pub spacing: f32,
}

impl TextLayout {
    /// Top edge of line `index`, relative to the top of the layout.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn line_top(&self, index: usize) -> f32 {
        index as f32 * (self.line_height + self.spacing)
    }

    /// Width and height of the whole layout in pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pixel_size(&self) -> (f32, f32) {
        let left = self
            .lines
            .iter()
            .map(|line| line.logical.x)
            .fold(f32::INFINITY, f32::min);
        let right = self
            .lines
            .iter()
            .map(|line| line.logical.right())
            .fold(f32::NEG_INFINITY, f32::max);
        let width = if self.lines.is_empty() { 0.0 } else { right - left };

        let count = self.lines.len() as f32;
        let height = if self.lines.is_empty() {
            0.0
        } else {
            count * self.line_height + (count - 1.0) * self.spacing
        };
        (width, height)
    }
}

/// A run of styled text laid out into lines.
///
/// # Example
///
/// ```
/// use quire_layout::TextFragment;
///
/// let mut fragment = TextFragment::with_default_metrics("The quick brown fox", None);
/// fragment.set_width(Some(90.0));
/// assert_eq!(fragment.layout().lines.len(), 2);
/// ```
#[derive(Clone)]
pub struct TextFragment<'m> {
    text: String,
    width: Option<f32>,
    spacing: f32,
    font: FontDescription,
    alignment: TextAlign,
    foreground: ColorValue,
    metrics: &'m dyn FontMetrics,
}

impl std::fmt::Debug for TextFragment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFragment")
            .field("text", &self.text)
            .field("width", &self.width)
            .field("spacing", &self.spacing)
            .field("font", &self.font)
            .field("alignment", &self.alignment)
            .field("foreground", &self.foreground)
            .finish_non_exhaustive()
    }
}

impl<'m> TextFragment<'m> {
    /// A fragment measured with `metrics`, with the default font.
    ///
    /// A `width` of `None` disables wrapping.
    #[must_use]
    pub fn new(text: &str, width: Option<f32>, metrics: &'m dyn FontMetrics) -> Self {
        let mut fragment = Self {
            text: text.to_string(),
            width: None,
            spacing: 0.0,
            font: FontDescription::default(),
            alignment: TextAlign::Left,
            foreground: ColorValue::BLACK,
            metrics,
        };
        fragment.set_width(width);
        fragment
    }

    /// A fragment configured from a text box's content and style.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NotText`] if `text_box` is not a text box, or
    /// [`LayoutError::InvalidValue`] if its font size is unusable.
    pub fn from_textbox(
        text_box: &LayoutBox,
        metrics: &'m dyn FontMetrics,
    ) -> Result<Self, LayoutError> {
        let mut fragment = Self::new("", None, metrics);
        fragment.set_textbox(text_box)?;
        Ok(fragment)
    }

    /// Apply a text box's text and style.
    ///
    /// Letter spacing is only changed when the style gives a length. The
    /// background color is left to the box painter.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NotText`] if `text_box` is not a text box, or
    /// [`LayoutError::InvalidValue`] if its font size is unusable.
    pub fn set_textbox(&mut self, text_box: &LayoutBox) -> Result<(), LayoutError> {
        let text = text_box
            .text_content()
            .ok_or_else(|| LayoutError::NotText {
                tag: text_box.element_tag.clone(),
            })?;
        let style = &text_box.style;

        self.set_text(text);
        self.set_font_family(&style.font_family_list());
        self.set_font_size(style.font_size)?;
        self.alignment = style.text_align;
        self.font.variant = style.font_variant;
        self.set_font_weight(style.font_weight);
        self.font.style = style.font_style;
        if let Some(spacing) = style.letter_spacing {
            self.set_letter_spacing(spacing);
        }
        self.set_foreground(style.color);
        Ok(())
    }

    /// The fragment's text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    /// The wrap width, `None` when unconstrained.
    #[must_use]
    pub const fn width(&self) -> Option<f32> {
        self.width
    }

    /// Set the wrap width. `None`, a negative or a non-finite width turns
    /// wrapping off.
    pub fn set_width(&mut self, width: Option<f32>) {
        self.width = width.filter(|w| w.is_finite() && *w >= 0.0);
    }

    /// Extra space between lines, in pixels.
    pub const fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing;
    }

    /// The alignment. Justified text reports [`TextAlign::Justify`].
    #[must_use]
    pub const fn alignment(&self) -> TextAlign {
        self.alignment
    }

    /// Whether inter-word space is stretched to fill lines.
    #[must_use]
    pub fn justify(&self) -> bool {
        self.alignment == TextAlign::Justify
    }

    /// Set the alignment from a `text-align` keyword.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidValue`] for anything but `left`,
    /// `right`, `center` or `justify`.
    pub fn set_alignment(&mut self, keyword: &str) -> Result<(), LayoutError> {
        self.alignment = parse_keyword(keyword, "text-align", "left, right, center or justify")?;
        Ok(())
    }

    /// The font description.
    #[must_use]
    pub const fn font(&self) -> &FontDescription {
        &self.font
    }

    /// Set the family list, a comma-separated string as in CSS.
    pub fn set_font_family(&mut self, family: &str) {
        family.clone_into(&mut self.font.family);
    }

    /// Set the font size in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidValue`] for a negative or non-finite
    /// size; the previous size is kept.
    pub fn set_font_size(&mut self, size: f32) -> Result<(), LayoutError> {
        if !size.is_finite() || size < 0.0 {
            return Err(LayoutError::InvalidValue {
                property: "font-size",
                value: size.to_string(),
                expected: "a non-negative number of pixels",
            });
        }
        self.font.size = size;
        Ok(())
    }

    /// Set the slant from a `font-style` keyword.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidValue`] for anything but `normal`,
    /// `italic` or `oblique`.
    pub fn set_font_style(&mut self, keyword: &str) -> Result<(), LayoutError> {
        self.font.style =
            parse_keyword::<FontStyle>(keyword, "font-style", "normal, italic or oblique")?;
        Ok(())
    }

    /// Set the variant from a `font-variant` keyword.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidValue`] for anything but `normal` or
    /// `small-caps`.
    pub fn set_font_variant(&mut self, keyword: &str) -> Result<(), LayoutError> {
        self.font.variant =
            parse_keyword::<FontVariant>(keyword, "font-variant", "normal or small-caps")?;
        Ok(())
    }

    /// Set the weight, clamped to 100..=900.
    pub fn set_font_weight(&mut self, weight: u16) {
        self.font.weight = weight.clamp(100, 900);
    }

    /// Extra advance after every glyph, in pixels.
    pub const fn set_letter_spacing(&mut self, spacing: f32) {
        self.font.letter_spacing = spacing;
    }

    /// Raise the text above the baseline by `rise` pixels.
    pub const fn set_rise(&mut self, rise: f32) {
        self.font.rise = rise;
    }

    /// The text color.
    #[must_use]
    pub const fn foreground(&self) -> ColorValue {
        self.foreground
    }

    /// Set the text color.
    pub const fn set_foreground(&mut self, color: ColorValue) {
        self.foreground = color;
    }

    /// The font metrics context the fragment measures with.
    #[must_use]
    pub fn metrics(&self) -> &'m dyn FontMetrics {
        self.metrics
    }

    /// Width and height in pixels of the whole wrapped text.
    #[must_use]
    pub fn size(&self) -> (f32, f32) {
        self.layout().pixel_size()
    }

    /// Lay out every line.
    #[must_use]
    pub fn layout(&self) -> TextLayout {
        self.lay_out(None)
    }

    /// Lay out at most `limit` lines.
    ///
    /// Without a wrap width, centered and right-aligned lines are placed
    /// relative to the widest line, so the limit is ignored then.
    pub(crate) fn lay_out(&self, limit: Option<usize>) -> TextLayout {
        let limit = match (self.width, self.alignment) {
            (None, TextAlign::Center | TextAlign::Right) => None,
            _ => limit,
        };
        let measure = |slice: &str| advance_width(slice, &self.font, self.metrics);
        let spans = break_lines(&self.text, self.width, measure, limit);

        let ascent = self.metrics.ascent(&self.font);
        let descent = self.metrics.descent(&self.font);
        let line_box = Rect::new(0.0, -ascent, 0.0, ascent + descent).round_nearest();

        let advances: Vec<f32> = spans
            .iter()
            .map(|span| measure(&self.text[span.start..span.end]))
            .collect();
        let available = self
            .width
            .unwrap_or_else(|| advances.iter().copied().fold(0.0, f32::max));

        let lines = spans
            .iter()
            .zip(advances)
            .map(|(span, advance)| self.lay_out_line(*span, advance, available, ascent, descent))
            .collect();

        TextLayout {
            lines,
            ascent: -line_box.y,
            descent: line_box.bottom(),
            line_height: line_box.height,
            spacing: self.spacing,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn lay_out_line(
        &self,
        span: LineSpan,
        advance: f32,
        available: f32,
        ascent: f32,
        descent: f32,
    ) -> LayoutLine {
        let content = &self.text[span.start..span.end];
        let glyphs = place_glyphs(content, &self.font, self.metrics);
        let gaps = glyphs.iter().filter(|glyph| glyph.ch.is_whitespace()).count();

        let justify_gap = match self.width {
            Some(width) if self.justify() && !span.hard_break && gaps > 0 => {
                (width - advance).max(0.0) / gaps as f32
            }
            _ => 0.0,
        };
        let line_width = advance + justify_gap * gaps as f32;

        let x_offset = match self.alignment {
            TextAlign::Left | TextAlign::Justify => 0.0,
            TextAlign::Right => (available - line_width).max(0.0),
            TextAlign::Center => ((available - line_width) / 2.0).max(0.0),
        };
        let rise = self.font.rise;

        let logical =
            Rect::new(x_offset, -ascent - rise, line_width, ascent + descent).round_nearest();

        let mut ink = Rect::default();
        let mut stretch = 0.0;
        for glyph in &glyphs {
            if let Some(glyph_ink) = self.metrics.glyph_ink(glyph.ch, &self.font, glyph.size) {
                let rect = Rect::new(
                    x_offset + glyph.x + stretch + glyph_ink.xmin,
                    -(glyph_ink.ymin + glyph_ink.height) - rise,
                    glyph_ink.width,
                    glyph_ink.height,
                );
                ink = ink.union(&rect);
            }
            if glyph.ch.is_whitespace() {
                stretch += justify_gap;
            }
        }

        LayoutLine {
            text: content.to_string(),
            start: span.start,
            end: span.end,
            next: span.next,
            hard_break: span.hard_break,
            x_offset,
            advance,
            justify_gap,
            logical,
            ink: if ink.is_empty() {
                Rect::default()
            } else {
                ink.round_outward()
            },
        }
    }

    /// Paint every line onto `target` with the top-left corner of the
    /// layout at `(x, y)`.
    ///
    /// Justified lines are emitted word by word so the stretched gaps land
    /// where the layout put them.
    pub fn show_layout(&self, target: &mut dyn PaintTarget, x: f32, y: f32) {
        let layout = self.layout();
        for (line_index, line) in layout.lines.iter().enumerate() {
            let baseline = y + layout.line_top(line_index) + layout.ascent - self.font.rise;
            let left = x + line.x_offset;

            if line.justify_gap <= 0.0 {
                if !line.text.is_empty() {
                    target.draw_text(&self.run(&line.text, left, baseline));
                }
                continue;
            }

            let mut gaps = 0;
            let mut word_start = None;
            let mut pen_end = 0;
            let mut pen = 0.0;
            let mut emit = |start: usize, end: usize, gaps: usize| {
                pen += advance_width(&line.text[pen_end..start], &self.font, self.metrics);
                pen_end = start;
                #[allow(clippy::cast_precision_loss)]
                let offset = pen + line.justify_gap * gaps as f32;
                target.draw_text(&self.run(&line.text[start..end], left + offset, baseline));
            };
            for (index, ch) in line.text.char_indices() {
                if ch.is_whitespace() {
                    if let Some(start) = word_start.take() {
                        emit(start, index, gaps);
                    }
                    if !ch.is_control() {
                        gaps += 1;
                    }
                } else if word_start.is_none() {
                    word_start = Some(index);
                }
            }
            if let Some(start) = word_start {
                emit(start, line.text.len(), gaps);
            }
        }
    }

    fn run(&self, text: &str, x: f32, baseline: f32) -> TextRun {
        TextRun {
            text: text.to_string(),
            x,
            baseline,
            font: self.font.clone(),
            color: self.foreground,
        }
    }
}

impl TextFragment<'static> {
    /// A fragment measured with [`ApproximateFontMetrics`].
    #[must_use]
    pub fn with_default_metrics(text: &str, width: Option<f32>) -> Self {
        Self::new(text, width, &APPROXIMATE_METRICS)
    }
}

fn parse_keyword<T: FromStr>(
    keyword: &str,
    property: &'static str,
    expected: &'static str,
) -> Result<T, LayoutError> {
    T::from_str(keyword.trim()).map_err(|_| LayoutError::InvalidValue {
        property,
        value: keyword.to_string(),
        expected,
    })
}
