//! Computed style for a box.
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! "The computed value is the result of resolving the specified value..."

use serde::Serialize;

use super::display::DisplayValue;
use super::values::{ColorValue, FontStyle, FontVariant, TextAlign, WhiteSpace};

/// [§ 3.5 'font-size'](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
///
/// The used value of `medium` in every major UA stylesheet.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// The properties the box generator and the text engine read.
///
/// Unlike a cascade-side style, every field holds a resolved value: there is
/// no "unset" state left to interpret here. [`Default`] yields the CSS
/// initial values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedStyle {
    /// [§ 2 'display'](https://www.w3.org/TR/css-display-3/#the-display-properties)
    pub display: DisplayValue,
    /// [§ 3.1 'font-family'](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
    ///
    /// Ordered family list; the first family that can be matched wins.
    pub font_family: Vec<String>,
    /// [§ 3.5 'font-size'](https://www.w3.org/TR/css-fonts-4/#font-size-prop), in pixels.
    pub font_size: f32,
    /// [§ 3.2 'font-weight'](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
    ///
    /// Numeric weight: 400 = normal, 700 = bold.
    pub font_weight: u16,
    /// [§ 3.3 'font-style'](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
    pub font_style: FontStyle,
    /// [§ 6.11 'font-variant'](https://www.w3.org/TR/css-fonts-4/#font-variant-prop)
    pub font_variant: FontVariant,
    /// [§ 8.2 'letter-spacing'](https://www.w3.org/TR/css-text-3/#letter-spacing-property)
    ///
    /// `None` is the keyword `normal`: the font's own spacing.
    pub letter_spacing: Option<f32>,
    /// [§ 16.2 'text-align'](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
    pub text_align: TextAlign,
    /// [§ 3.1 'color'](https://www.w3.org/TR/css-color-4/#the-color-property)
    pub color: ColorValue,
    /// [§ 3 'white-space'](https://www.w3.org/TR/css-text-3/#white-space-property)
    pub white_space: WhiteSpace,
    /// [§ 3.2 'background-color'](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    ///
    /// Carried for the box painter; text layout never draws it.
    pub background_color: Option<ColorValue>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: DisplayValue::Inline,
            font_family: vec!["serif".to_string()],
            font_size: DEFAULT_FONT_SIZE_PX,
            font_weight: 400,
            font_style: FontStyle::Normal,
            font_variant: FontVariant::Normal,
            letter_spacing: None,
            text_align: TextAlign::Left,
            color: ColorValue::BLACK,
            white_space: WhiteSpace::Normal,
            background_color: None,
        }
    }
}

impl ComputedStyle {
    /// [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    ///
    /// The style of an anonymous child: inherited properties (fonts, color,
    /// alignment, spacing, white-space) are copied, everything else takes
    /// its initial value.
    #[must_use]
    pub fn inherit_from(&self) -> Self {
        Self {
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            font_weight: self.font_weight,
            font_style: self.font_style,
            font_variant: self.font_variant,
            letter_spacing: self.letter_spacing,
            text_align: self.text_align,
            color: self.color,
            white_space: self.white_space,
            ..Self::default()
        }
    }

    /// Builder-style `display` setter.
    #[must_use]
    pub fn with_display(mut self, display: DisplayValue) -> Self {
        self.display = display;
        self
    }

    /// The family list as a single comma-separated string, as handed to the
    /// text engine.
    #[must_use]
    pub fn font_family_list(&self) -> String {
        self.font_family.join(", ")
    }
}
