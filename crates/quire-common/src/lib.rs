//! Common utilities for the Quire renderer.
//!
//! This crate provides shared infrastructure used by all renderer components:
//! - **Warning System** - colored, deduplicated terminal diagnostics
//! - **Image Surfaces** - decoded pixel data consumed by replaced elements
//! - **URLs** - resolution of `src` references against a document base
//! - **Fetching** - `data:` URL decoding and blocking HTTP reads

pub mod image;
pub mod net;
pub mod url;
pub mod warning;
