//! The resolved style record.
//!
//! The cascade runs elsewhere; by the time a box reaches this crate every
//! property it needs has a computed value. Keyword properties are typed
//! enums that parse from their CSS spelling via [`std::str::FromStr`].
//!
//! - [CSS Display Module Level 3](https://www.w3.org/TR/css-display-3/)
//! - [CSS Fonts Module Level 4](https://www.w3.org/TR/css-fonts-4/)
//! - [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

pub mod computed;
mod display;
mod values;

pub use computed::{ComputedStyle, DEFAULT_FONT_SIZE_PX};
pub use display::DisplayValue;
pub use values::{ColorValue, FontStyle, FontVariant, TextAlign, WhiteSpace};
