//! Tests for the element handler registry and the per-tag handlers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use quire_common::image::ImageSurface;
use quire_dom::{DomTree, ElementData, NodeId};
use quire_layout::html::attributes::integer_attribute;
use quire_layout::html::handlers::{MAX_ROWSPAN, MAX_SPAN};
use quire_layout::html::{make_replaced_box, make_text_box};
use quire_layout::{
    BoxKind, ComputedStyle, DisplayValue, Document, GroupSpan, HandlerRegistry, ImageReplacement,
    LayoutBox, LayoutError, NoResources, ReplacedContent, Replacement, WhiteSpace,
};

/// A document serving a fixed set of images and recording every lookup.
#[derive(Default)]
struct TestDocument {
    base_url: Option<String>,
    images: HashMap<String, Arc<ImageSurface>>,
    requests: RefCell<Vec<String>>,
}

impl TestDocument {
    fn with_image(uri: &str, width: u32, height: u32) -> Self {
        let mut document = Self::default();
        let _ = document.images.insert(
            uri.to_string(),
            Arc::new(ImageSurface::filled(width, height, [255, 0, 0, 255])),
        );
        document
    }
}

impl Document for TestDocument {
    fn image_surface_from_uri(&self, uri: &str) -> Option<Arc<ImageSurface>> {
        self.requests.borrow_mut().push(uri.to_string());
        self.images.get(uri).cloned()
    }

    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}

fn single_element(data: ElementData) -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let root = tree.root();
    let id = tree.append_element(root, data);
    (tree, id)
}

fn inline_box(tag: &str) -> LayoutBox {
    LayoutBox::new(
        tag,
        Some(7),
        ComputedStyle::default(),
        BoxKind::Inline {
            children: Vec::new(),
        },
    )
}

fn styled_box(tag: &str, display: DisplayValue) -> LayoutBox {
    let mut style = ComputedStyle::default().with_display(display);
    style.background_color = Some(quire_layout::ColorValue::WHITE);
    LayoutBox::new(
        tag,
        Some(7),
        style,
        BoxKind::Block {
            children: Vec::new(),
        },
    )
}

fn cell_box(tag: &str, colspan: u32, rowspan: u32) -> LayoutBox {
    LayoutBox::new(
        tag,
        None,
        ComputedStyle::default().with_display(DisplayValue::TableCell),
        BoxKind::TableCell {
            colspan,
            rowspan,
            children: Vec::new(),
        },
    )
}

fn column_box(span: u32) -> LayoutBox {
    LayoutBox::new(
        "col",
        None,
        ComputedStyle::default().with_display(DisplayValue::TableColumn),
        BoxKind::TableColumn { span },
    )
}

fn group_box() -> LayoutBox {
    LayoutBox::new(
        "colgroup",
        None,
        ComputedStyle::default().with_display(DisplayValue::TableColumnGroup),
        BoxKind::TableColumnGroup {
            span: GroupSpan::default(),
            children: Vec::new(),
        },
    )
}

// ---------------------------------------------------------------------------
// Registry dispatch
// ---------------------------------------------------------------------------

#[test]
fn test_unregistered_tag_passes_box_through() {
    let (tree, id) = single_element(ElementData::new("span"));
    let element = tree.element(id).unwrap();
    let original = inline_box("span");

    let boxes = HandlerRegistry::html()
        .handle(&NoResources, element, original.clone())
        .unwrap();
    assert_eq!(boxes, vec![original]);
}

#[test]
fn test_html_registry_contents() {
    let registry = HandlerRegistry::html();
    for tag in ["img", "br", "colgroup", "col", "td", "th"] {
        assert!(registry.is_registered(tag), "{tag} should be registered");
    }
    assert!(!registry.is_registered("div"));
    assert!(!HandlerRegistry::empty().is_registered("img"));
}

#[test]
fn test_registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HandlerRegistry>();
}

// ---------------------------------------------------------------------------
// <img>
// ---------------------------------------------------------------------------

#[test]
fn test_img_with_decodable_source_becomes_inline_replaced() {
    let document = TestDocument::with_image("logo.png", 40, 20);
    let (tree, id) =
        single_element(ElementData::new("img").with_attr("src", "logo.png").at_line(12));
    let element = tree.element(id).unwrap();

    let boxes = HandlerRegistry::html()
        .handle(&document, element, inline_box("img"))
        .unwrap();
    assert_eq!(boxes.len(), 1);
    let replaced = &boxes[0];
    assert!(matches!(replaced.kind, BoxKind::InlineLevelReplaced { .. }));
    assert_eq!(replaced.element_tag, "img");
    assert_eq!(replaced.source_line, Some(12));
    assert!(replaced.children().is_empty());

    let content = replaced.replacement().unwrap();
    assert_eq!(content.intrinsic_width(), Some(40.0));
    assert_eq!(content.intrinsic_height(), Some(20.0));
    assert_eq!(content.intrinsic_ratio(), Some(2.0));
}

#[test]
fn test_img_block_display_becomes_block_replaced() {
    let document = TestDocument::with_image("a.png", 1, 1);
    let (tree, id) = single_element(ElementData::new("img").with_attr("src", "a.png"));
    let element = tree.element(id).unwrap();

    for display in [DisplayValue::Block, DisplayValue::ListItem, DisplayValue::Table] {
        let boxes = HandlerRegistry::html()
            .handle(&document, element, styled_box("img", display))
            .unwrap();
        assert!(matches!(boxes[0].kind, BoxKind::BlockLevelReplaced { .. }));
        assert_eq!(boxes[0].style.display, display);
    }
}

#[test]
fn test_img_src_resolved_against_base_and_requested_once() {
    let mut document = TestDocument::with_image("http://example.com/img/a.png", 2, 2);
    document.base_url = Some("http://example.com/pages/index.html".to_string());
    let (tree, id) = single_element(ElementData::new("img").with_attr("src", "  ../img/a.png "));
    let element = tree.element(id).unwrap();

    let boxes = HandlerRegistry::html()
        .handle(&document, element, inline_box("img"))
        .unwrap();
    assert_eq!(boxes.len(), 1);
    assert_eq!(
        *document.requests.borrow(),
        vec!["http://example.com/img/a.png".to_string()]
    );
}

#[test]
fn test_img_undecodable_with_alt_becomes_text() {
    let document = TestDocument::default();
    let (tree, id) = single_element(
        ElementData::new("img")
            .with_attr("src", "missing.png")
            .with_attr("alt", "Company logo"),
    );
    let element = tree.element(id).unwrap();

    let boxes = HandlerRegistry::html()
        .handle(&document, element, styled_box("img", DisplayValue::Inline))
        .unwrap();
    assert_eq!(boxes.len(), 1);
    let wrapper = &boxes[0];
    assert!(matches!(wrapper.kind, BoxKind::Inline { .. }));
    assert_eq!(wrapper.style.background_color, Some(quire_layout::ColorValue::WHITE));

    let [text_box] = wrapper.children() else {
        panic!("expected a single text box, got {:?}", wrapper.children());
    };
    assert_eq!(text_box.text_content(), Some("Company logo"));
    assert_eq!(text_box.element_tag, "img");
    assert_eq!(text_box.source_line, Some(7));
    // Non-inherited properties are reset on the text box.
    assert_eq!(text_box.style.background_color, None);
    assert_eq!(text_box.style.display, DisplayValue::Inline);
}

#[test]
fn test_img_without_src_uses_alt() {
    let document = TestDocument::default();
    let (tree, id) = single_element(ElementData::new("img").with_attr("alt", "Chart"));
    let element = tree.element(id).unwrap();

    let boxes = HandlerRegistry::html()
        .handle(&document, element, styled_box("img", DisplayValue::Block))
        .unwrap();
    assert!(matches!(boxes[0].kind, BoxKind::Block { .. }));
    assert_eq!(boxes[0].children()[0].text_content(), Some("Chart"));
    assert!(document.requests.borrow().is_empty());
}

#[test]
fn test_img_empty_alt_represents_nothing() {
    let (tree, id) = single_element(
        ElementData::new("img")
            .with_attr("src", "missing.png")
            .with_attr("alt", ""),
    );
    let element = tree.element(id).unwrap();
    let boxes = HandlerRegistry::html()
        .handle(&NoResources, element, inline_box("img"))
        .unwrap();
    assert!(boxes.is_empty());
}

#[test]
fn test_img_without_alt_or_image_is_dropped() {
    let registry = HandlerRegistry::html();
    for data in [
        ElementData::new("img").with_attr("src", "missing.png"),
        ElementData::new("img").with_attr("src", "   "),
        ElementData::new("img"),
    ] {
        let (tree, id) = single_element(data);
        let element = tree.element(id).unwrap();
        let boxes = registry
            .handle(&NoResources, element, inline_box("img"))
            .unwrap();
        assert!(boxes.is_empty());
    }
}

#[test]
fn test_img_with_unclassifiable_display_is_an_error() {
    let document = TestDocument::with_image("a.png", 1, 1);
    let (tree, id) = single_element(ElementData::new("img").with_attr("src", "a.png"));
    let element = tree.element(id).unwrap();

    let result =
        HandlerRegistry::html().handle(&document, element, styled_box("img", DisplayValue::RunIn));
    assert_eq!(
        result,
        Err(LayoutError::UnsupportedDisplay(DisplayValue::RunIn))
    );
}

// ---------------------------------------------------------------------------
// <br>
// ---------------------------------------------------------------------------

#[test]
fn test_br_becomes_preserved_newline() {
    let (tree, id) = single_element(ElementData::new("br").at_line(3));
    let element = tree.element(id).unwrap();

    let boxes = HandlerRegistry::html()
        .handle(&NoResources, element, inline_box("br"))
        .unwrap();
    assert_eq!(boxes.len(), 1);
    let wrapper = &boxes[0];
    assert!(matches!(wrapper.kind, BoxKind::Inline { .. }));
    assert_eq!(wrapper.source_line, Some(3));
    assert_eq!(wrapper.style.white_space, WhiteSpace::Normal);

    let newline = &wrapper.children()[0];
    assert_eq!(newline.text_content(), Some("\n"));
    assert_eq!(newline.style.white_space, WhiteSpace::Pre);
    assert_eq!(newline.element_tag, "br");
}

// ---------------------------------------------------------------------------
// Table attributes
// ---------------------------------------------------------------------------

#[test]
fn test_col_span_generates_clones() {
    let (tree, id) = single_element(ElementData::new("col").with_attr("span", "3"));
    let element = tree.element(id).unwrap();

    let boxes = HandlerRegistry::html()
        .handle(&NoResources, element, column_box(1))
        .unwrap();
    assert_eq!(boxes.len(), 3);
    for column in &boxes {
        assert_eq!(column.kind, BoxKind::TableColumn { span: 3 });
    }
}

#[test]
fn test_col_invalid_span_keeps_single_box() {
    let registry = HandlerRegistry::html();
    for value in ["0", "-2", "two", ""] {
        let (tree, id) = single_element(ElementData::new("col").with_attr("span", value));
        let element = tree.element(id).unwrap();
        let boxes = registry
            .handle(&NoResources, element, column_box(1))
            .unwrap();
        assert_eq!(boxes, vec![column_box(1)], "span={value:?}");
    }
}

#[test]
fn test_col_span_is_clamped() {
    let (tree, id) = single_element(ElementData::new("col").with_attr("span", "4294967295"));
    let element = tree.element(id).unwrap();

    let boxes = HandlerRegistry::html()
        .handle(&NoResources, element, column_box(1))
        .unwrap();
    assert_eq!(boxes.len(), 1000);
    assert!(
        boxes
            .iter()
            .all(|column| column.kind == BoxKind::TableColumn { span: 1000 })
    );
}

#[test]
fn test_td_spans_are_clamped() {
    let (tree, id) = single_element(
        ElementData::new("td")
            .with_attr("colspan", "5000")
            .with_attr("rowspan", "99999999999"),
    );
    let element = tree.element(id).unwrap();

    let boxes = HandlerRegistry::html()
        .handle(&NoResources, element, cell_box("td", 1, 1))
        .unwrap();
    assert!(matches!(
        boxes[0].kind,
        BoxKind::TableCell {
            colspan: MAX_SPAN,
            rowspan: MAX_ROWSPAN,
            ..
        }
    ));
}

#[test]
fn test_col_handler_ignores_other_variants() {
    let (tree, id) = single_element(ElementData::new("col").with_attr("span", "4"));
    let element = tree.element(id).unwrap();
    let block = styled_box("col", DisplayValue::Block);

    let boxes = HandlerRegistry::html()
        .handle(&NoResources, element, block.clone())
        .unwrap();
    assert_eq!(boxes, vec![block]);
}

#[test]
fn test_colgroup_with_columns_derives_span() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let colgroup = tree.append_element(root, ElementData::new("colgroup").with_attr("span", "5"));
    let _ = tree.append_element(colgroup, ElementData::new("col"));
    let element = tree.element(colgroup).unwrap();

    let boxes = HandlerRegistry::html()
        .handle(&NoResources, element, group_box())
        .unwrap();
    assert!(matches!(
        boxes[0].kind,
        BoxKind::TableColumnGroup {
            span: GroupSpan::FromColumns,
            ..
        }
    ));
}

#[test]
fn test_colgroup_without_columns_reads_span() {
    let registry = HandlerRegistry::html();
    let cases = [("4", GroupSpan::Fixed(4)), ("0", GroupSpan::Fixed(1)), ("x", GroupSpan::Fixed(1))];
    for (value, expected) in cases {
        let (tree, id) = single_element(ElementData::new("colgroup").with_attr("span", value));
        let element = tree.element(id).unwrap();
        let boxes = registry
            .handle(&NoResources, element, group_box())
            .unwrap();
        assert!(
            matches!(&boxes[0].kind, BoxKind::TableColumnGroup { span, .. } if *span == expected),
            "span={value:?}"
        );
    }
}

#[test]
fn test_td_rowspan_zero_is_accepted() {
    let (tree, id) = single_element(
        ElementData::new("td")
            .with_attr("rowspan", "0")
            .with_attr("colspan", " 2 "),
    );
    let element = tree.element(id).unwrap();

    let boxes = HandlerRegistry::html()
        .handle(&NoResources, element, cell_box("td", 1, 1))
        .unwrap();
    assert!(matches!(
        boxes[0].kind,
        BoxKind::TableCell {
            colspan: 2,
            rowspan: 0,
            ..
        }
    ));
}

#[test]
fn test_th_malformed_spans_keep_existing_values() {
    let (tree, id) = single_element(
        ElementData::new("th")
            .with_attr("colspan", "abc")
            .with_attr("rowspan", "-1"),
    );
    let element = tree.element(id).unwrap();

    let boxes = HandlerRegistry::html()
        .handle(&NoResources, element, cell_box("th", 4, 2))
        .unwrap();
    assert_eq!(boxes, vec![cell_box("th", 4, 2)]);
}

#[test]
fn test_td_colspan_zero_is_rejected() {
    let (tree, id) = single_element(ElementData::new("td").with_attr("colspan", "0"));
    let element = tree.element(id).unwrap();
    let boxes = HandlerRegistry::html()
        .handle(&NoResources, element, cell_box("td", 3, 1))
        .unwrap();
    assert_eq!(boxes, vec![cell_box("td", 3, 1)]);
}

// ---------------------------------------------------------------------------
// Construction helpers
// ---------------------------------------------------------------------------

#[test]
fn test_make_replaced_box_keeps_style() {
    let (tree, id) = single_element(ElementData::new("img").at_line(9));
    let element = tree.element(id).unwrap();
    let content = ReplacedContent::Image(ImageReplacement::new(Arc::new(ImageSurface::filled(
        3,
        0,
        [0; 4],
    ))));

    let provisional = styled_box("img", DisplayValue::InlineBlock);
    let style = provisional.style.clone();
    let replaced = make_replaced_box(element, provisional, content).unwrap();
    assert!(matches!(replaced.kind, BoxKind::InlineLevelReplaced { .. }));
    assert_eq!(replaced.style, style);
    assert_eq!(replaced.source_line, Some(9));
    // Zero height leaves the ratio undefined.
    assert_eq!(replaced.replacement().unwrap().intrinsic_ratio(), None);
}

#[test]
fn test_make_text_box_block_level() {
    let (tree, id) = single_element(ElementData::new("object"));
    let element = tree.element(id).unwrap();
    let wrapper = make_text_box(element, styled_box("object", DisplayValue::Table), "x").unwrap();
    assert!(matches!(wrapper.kind, BoxKind::Block { .. }));
    assert_eq!(wrapper.kind_name(), "BlockBox");
    assert_eq!(wrapper.children()[0].kind_name(), "TextBox");
}

#[test]
fn test_integer_attribute_bounds() {
    let (tree, id) = single_element(
        ElementData::new("td")
            .with_attr("a", "+7")
            .with_attr("b", "0")
            .with_attr("c", "1.5")
            .with_attr("d", "99999999999"),
    );
    let element = tree.element(id).unwrap();
    assert_eq!(integer_attribute(element, "a", 1, 1000), Some(7));
    assert_eq!(integer_attribute(element, "b", 1, 1000), None);
    assert_eq!(integer_attribute(element, "b", 0, 1000), Some(0));
    assert_eq!(integer_attribute(element, "c", 1, 1000), None);
    assert_eq!(integer_attribute(element, "d", 1, 1000), Some(1000));
    assert_eq!(integer_attribute(element, "a", 1, 5), Some(5));
    assert_eq!(integer_attribute(element, "missing", 0, 1000), None);
}

mod properties {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn parsed(value: &str, minimum: i64, maximum: i64) -> Option<u32> {
        value
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|v| *v >= minimum)
            .and_then(|v| u32::try_from(v.min(maximum)).ok())
    }

    #[quickcheck]
    fn td_attributes_never_fail_and_respect_minimums(colspan: String, rowspan: String) -> bool {
        let (tree, id) = single_element(
            ElementData::new("td")
                .with_attr("colspan", &colspan)
                .with_attr("rowspan", &rowspan),
        );
        let element = tree.element(id).unwrap();
        let Ok(boxes) = HandlerRegistry::html().handle(&NoResources, element, cell_box("td", 5, 6))
        else {
            return false;
        };
        match &boxes[..] {
            [cell] => match cell.kind {
                BoxKind::TableCell {
                    colspan: c,
                    rowspan: r,
                    ..
                } => {
                    let expected_c = parsed(&colspan, 1, 1000).unwrap_or(5);
                    let expected_r = parsed(&rowspan, 0, 65534).unwrap_or(6);
                    c == expected_c && r == expected_r
                }
                _ => false,
            },
            _ => false,
        }
    }

    #[quickcheck]
    fn col_produces_span_many_boxes(span: u8) -> bool {
        let (tree, id) =
            single_element(ElementData::new("col").with_attr("span", &span.to_string()));
        let element = tree.element(id).unwrap();
        let boxes = HandlerRegistry::html()
            .handle(&NoResources, element, column_box(1))
            .unwrap();
        let expected = usize::from(span.max(1));
        boxes.len() == expected
            && boxes
                .iter()
                .all(|b| b.kind == BoxKind::TableColumn { span: u32::from(span.max(1)) })
    }
}
