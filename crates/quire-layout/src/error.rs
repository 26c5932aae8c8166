//! Contract errors raised by the layout core.
//!
//! Malformed markup never produces one of these: it degrades through the
//! documented fallbacks instead. A `LayoutError` means a collaborator handed
//! over a value it should never have produced.

use thiserror::Error;

use crate::style::DisplayValue;

/// A defect in an upstream collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The classifier was asked about a `display` value that is neither
    /// block-level nor inline-level.
    #[error("Unsupported display: {0}")]
    UnsupportedDisplay(DisplayValue),

    /// A keyword or number outside a property's domain reached a setter.
    #[error("invalid {property} value '{value}', expected {expected}")]
    InvalidValue {
        /// The property being set.
        property: &'static str,
        /// The rejected value as given.
        value: String,
        /// Human-readable description of the accepted domain.
        expected: &'static str,
    },

    /// A text fragment was configured from a box that carries no text.
    #[error("<{tag}> box is not a text box")]
    NotText {
        /// Tag of the offending box.
        tag: String,
    },
}
