//! Font metrics interface and glyph placement.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use serde::Serialize;

use crate::style::{DEFAULT_FONT_SIZE_PX, FontStyle, FontVariant};

/// Scale of synthesized small capitals relative to the font size.
pub const SMALL_CAPS_SCALE: f32 = 0.7;

/// Everything that selects and sizes glyphs for a run of text.
///
/// Always fully defined: [`Default`] gives a 16px normal face, so a fragment
/// can be measured before any style has been applied to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontDescription {
    /// Comma-separated family list, first match wins.
    pub family: String,
    /// Font size in pixels.
    pub size: f32,
    /// Numeric weight, 100 to 900.
    pub weight: u16,
    /// Slant.
    pub style: FontStyle,
    /// Small-caps or normal.
    pub variant: FontVariant,
    /// Extra advance after every glyph, in pixels.
    pub letter_spacing: f32,
    /// Upward displacement from the baseline, in pixels.
    pub rise: f32,
}

impl Default for FontDescription {
    fn default() -> Self {
        Self {
            family: "serif".to_string(),
            size: DEFAULT_FONT_SIZE_PX,
            weight: 400,
            style: FontStyle::Normal,
            variant: FontVariant::Normal,
            letter_spacing: 0.0,
            rise: 0.0,
        }
    }
}

impl FontDescription {
    /// The family names in preference order, with quotes stripped.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.family
            .split(',')
            .map(|name| name.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|name| !name.is_empty())
    }

    /// Whether a bold face should be selected.
    #[must_use]
    pub const fn is_bold(&self) -> bool {
        self.weight >= 600
    }

    /// Whether an italic or oblique face should be selected.
    #[must_use]
    pub fn is_italic(&self) -> bool {
        self.style != FontStyle::Normal
    }
}

/// Ink bounds of one glyph, relative to its pen position on the baseline.
///
/// `ymin` is the bottom edge measured upward from the baseline (negative for
/// descenders), so the glyph covers `ymin..ymin + height` above the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInk {
    /// Left edge relative to the pen position.
    pub xmin: f32,
    /// Bottom edge, upward from the baseline.
    pub ymin: f32,
    /// Horizontal ink extent.
    pub width: f32,
    /// Vertical ink extent.
    pub height: f32,
}

/// Font metrics interface for text measurement during layout.
///
/// This is the device-dependent part of text layout: implementors know which
/// face a [`FontDescription`] selects and what its glyphs look like. The
/// layout engine calls these methods to measure text for line breaking,
/// extents and baselines.
pub trait FontMetrics {
    /// Advance width of `ch` at `size` pixels in the face `font` selects.
    fn advance(&self, ch: char, font: &FontDescription, size: f32) -> f32;

    /// Ink bounds of `ch`, or `None` if the glyph paints nothing.
    fn glyph_ink(&self, ch: char, font: &FontDescription, size: f32) -> Option<GlyphInk>;

    /// Distance from the baseline to the top of the line's logical box.
    fn ascent(&self, font: &FontDescription) -> f32;

    /// Distance from the baseline to the bottom of the line's logical box.
    fn descent(&self, font: &FontDescription) -> f32;

    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// Height of one line's logical box.
    fn line_height(&self, font: &FontDescription) -> f32 {
        self.ascent(font) + self.descent(font)
    }
}

/// Approximate font metrics using fixed ratios.
///
/// Without font data, the average advance of Latin glyphs in a proportional
/// face is about 0.6× the font size, and `line-height: normal` is about 1.2×
/// with the baseline at 80% of the line. This is used when no font context is
/// available, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl ApproximateFontMetrics {
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    const BOLD_CHAR_WIDTH_RATIO: f32 = 0.65;
    const LINE_HEIGHT_RATIO: f32 = 1.2;
    const BASELINE_RATIO: f32 = 0.8;
    const CAP_HEIGHT_RATIO: f32 = 0.7;
    const DESCENDER_RATIO: f32 = 0.2;
}

impl FontMetrics for ApproximateFontMetrics {
    fn advance(&self, ch: char, font: &FontDescription, size: f32) -> f32 {
        if ch.is_control() {
            return 0.0;
        }
        let ratio = if font.is_bold() {
            Self::BOLD_CHAR_WIDTH_RATIO
        } else {
            Self::CHAR_WIDTH_RATIO
        };
        size * ratio
    }

    fn glyph_ink(&self, ch: char, font: &FontDescription, size: f32) -> Option<GlyphInk> {
        if ch.is_whitespace() || ch.is_control() {
            return None;
        }
        let advance = self.advance(ch, font, size);
        let bearing = size * 0.05;
        let ymin = if matches!(ch, 'g' | 'j' | 'p' | 'q' | 'y') {
            -size * Self::DESCENDER_RATIO
        } else {
            0.0
        };
        Some(GlyphInk {
            xmin: bearing,
            ymin,
            width: (advance - 2.0 * bearing).max(0.0),
            height: size * Self::CAP_HEIGHT_RATIO - ymin,
        })
    }

    fn ascent(&self, font: &FontDescription) -> f32 {
        font.size * Self::LINE_HEIGHT_RATIO * Self::BASELINE_RATIO
    }

    fn descent(&self, font: &FontDescription) -> f32 {
        font.size * Self::LINE_HEIGHT_RATIO * (1.0 - Self::BASELINE_RATIO)
    }
}

/// A glyph positioned along a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    /// The character drawn (uppercased for synthesized small caps).
    pub ch: char,
    /// Size the glyph is drawn at.
    pub size: f32,
    /// Pen position relative to the start of the run.
    pub x: f32,
    /// Advance including letter spacing.
    pub advance: f32,
}

/// Place every glyph of `text` along the baseline.
///
/// Control characters take no space. With `font-variant: small-caps`,
/// lowercase letters are drawn as capitals at [`SMALL_CAPS_SCALE`] of the
/// size. Letter spacing is added after every glyph.
#[must_use]
pub fn place_glyphs(
    text: &str,
    font: &FontDescription,
    metrics: &dyn FontMetrics,
) -> Vec<PlacedGlyph> {
    let mut glyphs = Vec::with_capacity(text.len());
    let mut pen = 0.0;
    let mut place = |ch: char, size: f32| {
        let advance = metrics.advance(ch, font, size) + font.letter_spacing;
        glyphs.push(PlacedGlyph {
            ch,
            size,
            x: pen,
            advance,
        });
        pen += advance;
    };

    for ch in text.chars().filter(|ch| !ch.is_control()) {
        if font.variant == FontVariant::SmallCaps && ch.is_lowercase() {
            for upper in ch.to_uppercase() {
                place(upper, font.size * SMALL_CAPS_SCALE);
            }
        } else {
            place(ch, font.size);
        }
    }
    glyphs
}

/// Total advance of `text`, letter spacing included.
#[must_use]
pub fn advance_width(text: &str, font: &FontDescription, metrics: &dyn FontMetrics) -> f32 {
    place_glyphs(text, font, metrics)
        .iter()
        .map(|glyph| glyph.advance)
        .sum()
}
