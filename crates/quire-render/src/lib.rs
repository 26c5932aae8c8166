//! Device collaborators for the Quire layout core.
//!
//! The layout crate measures text through [`quire_layout::FontMetrics`],
//! loads images through [`quire_layout::Document`] and paints through
//! [`quire_layout::PaintTarget`]. This crate provides the real
//! implementations:
//!
//! ```text
//! FontSet ──► FontdueFontMetrics ──► TextFragment
//! src ──► ImageLoaderPipeline ──► ResourceDocument ──► <img> handler
//! DisplayList ──► Canvas ──► PNG
//! ```

pub mod canvas;
pub mod document;
pub mod font_metrics;
pub mod image_loader;

pub use canvas::Canvas;
pub use document::ResourceDocument;
pub use font_metrics::{FontError, FontSet, FontdueFontMetrics};
pub use image_loader::{
    ImageDecoder, ImageError, ImageFormat, ImageLoaderPipeline, RasterDecoder, SvgDecoder,
    detect_format,
};
