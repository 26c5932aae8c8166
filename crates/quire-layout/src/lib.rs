//! Box generation and text measurement for the Quire renderer.
//!
//! This crate sits between the styled element tree and the layout algorithm:
//!
//! ```text
//! Elements + ComputedStyle ─► HandlerRegistry ─► LayoutBox sequence
//! Text run + ComputedStyle ─► TextLineFragment ─► lines, extents, baselines
//! ```
//!
//! # Module Structure
//!
//! - [`style`] - the resolved style record the cascade hands over
//! - [`classifier`] - block-level vs inline-level from `display`
//! - [`boxes`] - the [`LayoutBox`] sum type
//! - [`replacement`] - replaced content with intrinsic dimensions
//! - [`html`] - the element handler registry and per-tag handlers
//! - [`text`] - text fragments, line splitting and glyph placement
//! - [`paint`] - the paint target abstraction and a recording display list
//! - [`builder`] - a minimal tree walker driving the handler registry
//!
//! # Relevant Specifications
//!
//! - [HTML § 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
//! - [HTML § 4.9 Tabular data](https://html.spec.whatwg.org/multipage/tables.html)
//! - [CSS Display Module Level 3](https://www.w3.org/TR/css-display-3/)
//! - [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)
//! - [UAX #14 Unicode Line Breaking Algorithm](https://www.unicode.org/reports/tr14/)

pub mod box_model;
pub mod boxes;
pub mod builder;
pub mod classifier;
mod error;
pub mod html;
pub mod paint;
pub mod replacement;
pub mod style;
pub mod text;

pub use box_model::Rect;
pub use boxes::{BoxKind, GroupSpan, LayoutBox};
pub use builder::{BoxTreeBuilder, default_display_for_element};
pub use classifier::{BoxLevel, box_level, is_block_level};
pub use error::LayoutError;
pub use html::{Document, ElementHandler, HandlerRegistry, NoResources};
pub use paint::{DisplayCommand, DisplayList, PaintTarget, TextRun};
pub use replacement::{ImageReplacement, ReplacedContent, Replacement};
pub use style::{
    ColorValue, ComputedStyle, DisplayValue, FontStyle, FontVariant, TextAlign, WhiteSpace,
};
pub use text::{
    ApproximateFontMetrics, FontDescription, FontMetrics, GlyphInk, LayoutLine, LineMetrics,
    LineSplitter, TextFragment, TextLayout, TextLineFragment,
};
