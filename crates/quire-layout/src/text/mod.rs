//! Text measurement and line splitting.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "When an inline box exceeds the width of a line box, it is split into
//! several boxes and these boxes are distributed across several line boxes."
//!
//! The layout algorithm owns the loop: it hands a [`TextLineFragment`] the
//! remaining text of a run and the width still available on the current line,
//! reads back the first line's text and geometry, and continues with the
//! remainder on the next line box. [`LineSplitter`] packages that loop for
//! callers that only need consecutive lines of a fixed width.
//!
//! - [`metrics`] - the font metrics interface and glyph placement
//! - [`line_break`] - UAX #14 break opportunities and greedy line filling
//! - [`fragment`] - the configured fragment and its full layout
//! - [`line_fragment`] - single-line extraction

pub mod fragment;
pub mod line_break;
pub mod line_fragment;
pub mod metrics;

pub use fragment::{LayoutLine, TextFragment, TextLayout};
pub use line_fragment::{LineMetrics, LineSplitter, TextLineFragment};
pub use metrics::{
    ApproximateFontMetrics, FontDescription, FontMetrics, GlyphInk, PlacedGlyph, SMALL_CAPS_SCALE,
    advance_width, place_glyphs,
};
