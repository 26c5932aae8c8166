//! Block-level vs inline-level classification.
//!
//! [§ 2.1 Outer Display Roles](https://www.w3.org/TR/css-display-3/#outer-role)
//!
//! "The `<display-outside>` keywords specify the element's outer display type,
//! which is essentially its principal box's role in flow layout."

use serde::Serialize;

use crate::LayoutError;
use crate::style::{ComputedStyle, DisplayValue};

/// How a box participates in flow layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoxLevel {
    /// "The element generates a block-level box when placed in flow layout."
    Block,
    /// "The element generates an inline-level box when placed in flow layout."
    Inline,
}

/// Classify a style's `display` as block-level or inline-level.
///
/// # Errors
///
/// Any display other than `block`, `list-item`, `table`, `inline`,
/// `inline-table` or `inline-block` is a style-resolution defect upstream and
/// yields [`LayoutError::UnsupportedDisplay`].
pub fn box_level(style: &ComputedStyle) -> Result<BoxLevel, LayoutError> {
    match style.display {
        DisplayValue::Block | DisplayValue::ListItem | DisplayValue::Table => Ok(BoxLevel::Block),
        DisplayValue::Inline | DisplayValue::InlineTable | DisplayValue::InlineBlock => {
            Ok(BoxLevel::Inline)
        }
        other => Err(LayoutError::UnsupportedDisplay(other)),
    }
}

/// `true` for block-level, `false` for inline-level.
///
/// # Errors
///
/// See [`box_level`].
pub fn is_block_level(style: &ComputedStyle) -> Result<bool, LayoutError> {
    Ok(box_level(style)? == BoxLevel::Block)
}
