//! Per-tag handlers.
//!
//! Each handler receives the element, the provisional box the style system
//! generated for it, and returns the boxes to use instead.

use quire_dom::ElementRef;

use crate::LayoutError;
use crate::boxes::{BoxKind, GroupSpan, LayoutBox};
use crate::replacement::{ImageReplacement, ReplacedContent};
use crate::style::WhiteSpace;

use super::Document;
use super::attributes::{integer_attribute, url_attribute};

/// [§ 4.9.3](https://html.spec.whatwg.org/multipage/tables.html#the-colgroup-element)
/// "values greater than 1000 will be treated as 1000"; also the `colspan`
/// limit.
pub const MAX_SPAN: u32 = 1000;

/// [§ 4.9.11](https://html.spec.whatwg.org/multipage/tables.html#attributes-common-to-td-and-th-elements)
/// `rowspan` values above this are clamped.
pub const MAX_ROWSPAN: u32 = 65534;

/// Wrap replaced content in a block-level or inline-level replaced box,
/// whichever the provisional box's display calls for.
///
/// The replaced box takes the place of the provisional one entirely.
///
/// # Errors
///
/// Returns [`LayoutError::UnsupportedDisplay`] if the box is neither
/// block-level nor inline-level.
pub fn make_replaced_box(
    element: ElementRef<'_>,
    layout_box: LayoutBox,
    replacement: ReplacedContent,
) -> Result<LayoutBox, LayoutError> {
    LayoutBox::replaced(
        element.tag(),
        element.source_line(),
        layout_box.style,
        replacement,
    )
}

/// A text box holding `text`, wrapped in a block or inline box.
///
/// The text box gets the inherited part of the element's style; the
/// wrapper keeps the element's full style and decides block vs inline.
///
/// # Errors
///
/// Returns [`LayoutError::UnsupportedDisplay`] if the box is neither
/// block-level nor inline-level.
pub fn make_text_box(
    element: ElementRef<'_>,
    layout_box: LayoutBox,
    text: &str,
) -> Result<LayoutBox, LayoutError> {
    let text_box = LayoutBox::text(
        element.tag(),
        element.source_line(),
        layout_box.style.inherit_from(),
        text,
    );
    LayoutBox::container(
        element.tag(),
        element.source_line(),
        layout_box.style,
        vec![text_box],
    )
}

/// [§ 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
///
/// The image if it can be loaded, otherwise the alternative text.
///
/// "If the src attribute is set and the alt attribute is set to the empty
/// string: the image is either decorative or supplemental to the rest of
/// the content." It represents nothing when it cannot be shown.
///
/// # Errors
///
/// Returns [`LayoutError::UnsupportedDisplay`] if the box is neither
/// block-level nor inline-level.
pub fn handle_img(
    document: &dyn Document,
    element: ElementRef<'_>,
    layout_box: LayoutBox,
) -> Result<Vec<LayoutBox>, LayoutError> {
    if let Some(src) = url_attribute(document, element, "src")
        && let Some(surface) = document.image_surface_from_uri(&src)
    {
        let replacement = ReplacedContent::Image(ImageReplacement::new(surface));
        return Ok(vec![make_replaced_box(element, layout_box, replacement)?]);
    }

    // No src, or it did not decode. Without alt there is nothing to show
    // either: no missing-image indicator is generated.
    match element.attribute("alt") {
        Some(alt) if !alt.is_empty() => Ok(vec![make_text_box(element, layout_box, alt)?]),
        _ => Ok(Vec::new()),
    }
}

/// [§ 4.5.27 The br element](https://html.spec.whatwg.org/multipage/text-level-semantics.html#the-br-element)
///
/// "The br element represents a line break." It becomes a preserved
/// newline character in an inline box.
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
pub fn handle_br(
    _document: &dyn Document,
    element: ElementRef<'_>,
    layout_box: LayoutBox,
) -> Result<Vec<LayoutBox>, LayoutError> {
    let mut newline_style = layout_box.style.clone();
    newline_style.white_space = WhiteSpace::Pre;
    let newline = LayoutBox::text(element.tag(), element.source_line(), newline_style, "\n");

    Ok(vec![LayoutBox::new(
        element.tag(),
        element.source_line(),
        layout_box.style,
        BoxKind::Inline {
            children: vec![newline],
        },
    )])
}

/// [§ 4.9.3 The colgroup element](https://html.spec.whatwg.org/multipage/tables.html#the-colgroup-element)
///
/// "If the colgroup element contains no col elements, then the element may
/// have a span content attribute specified." With `<col>` children the
/// group spans whatever its columns span.
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
pub fn handle_colgroup(
    _document: &dyn Document,
    element: ElementRef<'_>,
    mut layout_box: LayoutBox,
) -> Result<Vec<LayoutBox>, LayoutError> {
    if let BoxKind::TableColumnGroup { span, .. } = &mut layout_box.kind {
        if element.child_elements().any(|child| child.tag() == "col") {
            *span = GroupSpan::FromColumns;
        } else if let Some(value) = integer_attribute(element, "span", 1, MAX_SPAN) {
            *span = GroupSpan::Fixed(value);
        }
    }
    Ok(vec![layout_box])
}

/// [§ 4.9.4 The col element](https://html.spec.whatwg.org/multipage/tables.html#the-col-element)
///
/// A column spanning `n` columns becomes `n` column boxes, each keeping the
/// parsed span. Spans above [`MAX_SPAN`] count as [`MAX_SPAN`].
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
pub fn handle_col(
    _document: &dyn Document,
    element: ElementRef<'_>,
    mut layout_box: LayoutBox,
) -> Result<Vec<LayoutBox>, LayoutError> {
    if let BoxKind::TableColumn { span } = &mut layout_box.kind {
        if let Some(value) = integer_attribute(element, "span", 1, MAX_SPAN) {
            *span = value;
        }
        let count = (*span).min(MAX_SPAN) as usize;
        if count > 1 {
            return Ok(vec![layout_box; count]);
        }
    }
    Ok(vec![layout_box])
}

/// [§ 4.9.11 Attributes common to td and th elements](https://html.spec.whatwg.org/multipage/tables.html#attributes-common-to-td-and-th-elements)
///
/// "The td and th elements may have a colspan content attribute specified,
/// whose value must be a valid non-negative integer greater than zero."
/// A `rowspan` of zero is kept: the cell extends to the end of its row
/// group.
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
pub fn handle_td(
    _document: &dyn Document,
    element: ElementRef<'_>,
    mut layout_box: LayoutBox,
) -> Result<Vec<LayoutBox>, LayoutError> {
    if let BoxKind::TableCell {
        colspan, rowspan, ..
    } = &mut layout_box.kind
    {
        if let Some(value) = integer_attribute(element, "colspan", 1, MAX_SPAN) {
            *colspan = value;
        }
        if let Some(value) = integer_attribute(element, "rowspan", 0, MAX_ROWSPAN) {
            *rowspan = value;
        }
    }
    Ok(vec![layout_box])
}
