//! Font selection and font metrics backed by fontdue.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use std::collections::HashMap;
use std::path::Path;

use fontdue::{Font, FontSettings};
use quire_common::warning::warn_once;
use quire_layout::{ApproximateFontMetrics, FontDescription, FontMetrics, GlyphInk};
use thiserror::Error;

/// Where the fallback faces are looked for, as `(bold, italic, candidates)`.
/// The first readable candidate of each slot wins.
const SYSTEM_FACES: &[(bool, bool, &[&str])] = &[
    (
        false,
        false,
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
            "/usr/share/fonts/TTF/DejaVuSerif.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
            "/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\times.ttf",
        ],
    ),
    (
        true,
        false,
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSerif-Bold.ttf",
            "/usr/share/fonts/TTF/DejaVuSerif-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSerif-Bold.ttf",
            "/System/Library/Fonts/Supplemental/Times New Roman Bold.ttf",
            "C:\\Windows\\Fonts\\timesbd.ttf",
        ],
    ),
    (
        false,
        true,
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSerif-Italic.ttf",
            "/usr/share/fonts/TTF/DejaVuSerif-Italic.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSerif-Italic.ttf",
            "/System/Library/Fonts/Supplemental/Times New Roman Italic.ttf",
            "C:\\Windows\\Fonts\\timesi.ttf",
        ],
    ),
    (
        true,
        true,
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSerif-BoldItalic.ttf",
            "/usr/share/fonts/TTF/DejaVuSerif-BoldItalic.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSerif-BoldItalic.ttf",
            "/System/Library/Fonts/Supplemental/Times New Roman Bold Italic.ttf",
            "C:\\Windows\\Fonts\\timesbi.ttf",
        ],
    ),
];

/// A font file that could not be used.
#[derive(Debug, Error)]
pub enum FontError {
    /// The file could not be read.
    #[error("failed to read font '{path}': {source}")]
    Io {
        /// Path of the font file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// fontdue rejected the data.
    #[error("failed to parse font '{path}': {message}")]
    Parse {
        /// Path of the font file.
        path: String,
        /// fontdue's description of the problem.
        message: &'static str,
    },
}

/// The faces of one family. Missing variants fall back toward regular.
#[derive(Default)]
struct FontFaces {
    regular: Option<Font>,
    bold: Option<Font>,
    italic: Option<Font>,
    bold_italic: Option<Font>,
}

impl FontFaces {
    fn slot(&mut self, bold: bool, italic: bool) -> &mut Option<Font> {
        match (bold, italic) {
            (true, true) => &mut self.bold_italic,
            (true, false) => &mut self.bold,
            (false, true) => &mut self.italic,
            (false, false) => &mut self.regular,
        }
    }

    /// The best available face, falling back through: exact match, partial
    /// match, regular.
    fn pick(&self, bold: bool, italic: bool) -> Option<&Font> {
        match (bold, italic) {
            (true, true) => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.italic.as_ref())
                .or(self.regular.as_ref()),
            (true, false) => self.bold.as_ref().or(self.regular.as_ref()),
            (false, true) => self.italic.as_ref().or(self.regular.as_ref()),
            (false, false) => self.regular.as_ref(),
        }
    }

    fn is_empty(&self) -> bool {
        self.regular.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.bold_italic.is_none()
    }
}

/// Registered font families plus a fallback family.
///
/// [§ 5.2 Matching font styles](https://www.w3.org/TR/css-fonts-4/#font-style-matching)
///
/// A family list is matched in order; the first registered family wins.
/// When none is registered, the fallback faces are used.
#[derive(Default)]
pub struct FontSet {
    families: HashMap<String, FontFaces>,
    fallback: FontFaces,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.families.keys().collect();
        names.sort();
        f.debug_struct("FontSet")
            .field("families", &names)
            .field("has_fallback", &!self.fallback.is_empty())
            .finish()
    }
}

impl FontSet {
    /// An empty set. Every lookup fails until faces are added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A set whose fallback faces are the first system fonts found.
    #[must_use]
    pub fn system() -> Self {
        let mut fallback = FontFaces::default();
        for &(bold, italic, candidates) in SYSTEM_FACES {
            *fallback.slot(bold, italic) = load_font_from_paths(candidates);
        }
        if fallback.regular.is_none() {
            warn_once(
                "font",
                "no system font found, text will be measured with approximate metrics",
            );
        }
        Self {
            families: HashMap::new(),
            fallback,
        }
    }

    /// Register `font` as the face of `family` for the given weight class
    /// and slant. Family names match case-insensitively.
    pub fn add_face(&mut self, family: &str, bold: bool, italic: bool, font: Font) {
        let faces = self.families.entry(family.trim().to_lowercase()).or_default();
        *faces.slot(bold, italic) = Some(font);
    }

    /// Load a font file and register it under `family`.
    ///
    /// # Errors
    ///
    /// Returns [`FontError`] if the file cannot be read or parsed.
    pub fn load_face(
        &mut self,
        family: &str,
        path: &Path,
        bold: bool,
        italic: bool,
    ) -> Result<(), FontError> {
        let font = read_font(path)?;
        self.add_face(family, bold, italic, font);
        Ok(())
    }

    /// Use the font file at `path` as the regular fallback face.
    ///
    /// # Errors
    ///
    /// Returns [`FontError`] if the file cannot be read or parsed.
    pub fn load_fallback(&mut self, path: &Path) -> Result<(), FontError> {
        self.fallback.regular = Some(read_font(path)?);
        Ok(())
    }

    /// Whether `family` has any registered face.
    #[must_use]
    pub fn has_family(&self, family: &str) -> bool {
        self.families.contains_key(&family.trim().to_lowercase())
    }

    /// The face a font description selects, if any.
    #[must_use]
    pub fn select(&self, font: &FontDescription) -> Option<&Font> {
        let (bold, italic) = (font.is_bold(), font.is_italic());
        font.families()
            .find_map(|name| self.families.get(&name.to_lowercase()))
            .and_then(|faces| faces.pick(bold, italic))
            .or_else(|| self.fallback.pick(bold, italic))
    }
}

fn read_font(path: &Path) -> Result<Font, FontError> {
    let data = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Font::from_bytes(data, FontSettings::default()).map_err(|message| FontError::Parse {
        path: path.display().to_string(),
        message,
    })
}

/// Try to load a font from a list of filesystem paths.
fn load_font_from_paths(paths: &[&str]) -> Option<Font> {
    paths.iter().find_map(|path| read_font(Path::new(path)).ok())
}

/// Font metrics implementation backed by fontdue's per-glyph metrics.
///
/// This implementation queries fontdue for exact per-character advance
/// widths and outline bounds. It uses `Font::metrics()` (not
/// `Font::rasterize()`) to avoid the cost of bitmap generation when only
/// measurements are needed. Descriptions that select no face are measured
/// with [`ApproximateFontMetrics`].
#[derive(Debug, Clone, Copy)]
pub struct FontdueFontMetrics<'a> {
    fonts: &'a FontSet,
}

impl<'a> FontdueFontMetrics<'a> {
    /// Measure with the faces in `fonts`.
    #[must_use]
    pub const fn new(fonts: &'a FontSet) -> Self {
        Self { fonts }
    }
}

impl FontMetrics for FontdueFontMetrics<'_> {
    fn advance(&self, ch: char, font: &FontDescription, size: f32) -> f32 {
        if ch.is_control() {
            return 0.0;
        }
        self.fonts.select(font).map_or_else(
            || ApproximateFontMetrics.advance(ch, font, size),
            |face| face.metrics(ch, size).advance_width,
        )
    }

    fn glyph_ink(&self, ch: char, font: &FontDescription, size: f32) -> Option<GlyphInk> {
        let Some(face) = self.fonts.select(font) else {
            return ApproximateFontMetrics.glyph_ink(ch, font, size);
        };
        let bounds = face.metrics(ch, size).bounds;
        (bounds.width > 0.0 && bounds.height > 0.0).then_some(GlyphInk {
            xmin: bounds.xmin,
            ymin: bounds.ymin,
            width: bounds.width,
            height: bounds.height,
        })
    }

    fn ascent(&self, font: &FontDescription) -> f32 {
        self.fonts
            .select(font)
            .and_then(|face| face.horizontal_line_metrics(font.size))
            .map_or_else(|| ApproximateFontMetrics.ascent(font), |line| line.ascent)
    }

    fn descent(&self, font: &FontDescription) -> f32 {
        // fontdue reports descent as a negative offset below the baseline
        self.fonts
            .select(font)
            .and_then(|face| face.horizontal_line_metrics(font.size))
            .map_or_else(|| ApproximateFontMetrics.descent(font), |line| -line.descent)
    }
}
