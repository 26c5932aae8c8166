//! Box tree construction.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! A minimal driver for the handler registry: every element gets a
//! provisional box from its UA default `display`, its children are built
//! first, and the registry then decides what replaces the provisional box.
//! The real cascade lives outside this crate; the builder only applies
//! inheritance and the HTML rendering defaults.

use quire_dom::{DomTree, ElementRef, NodeId, NodeType};

use crate::LayoutError;
use crate::boxes::{BoxKind, GroupSpan, LayoutBox};
use crate::html::{Document, HandlerRegistry};
use crate::style::{ComputedStyle, DisplayValue};

// [HTML Living Standard § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
// defines the default CSS styles for HTML elements.

/// Returns the default display value for an HTML element.
///
/// [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements)
/// [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
/// [§ 15.3.8 Tables](https://html.spec.whatwg.org/multipage/rendering.html#tables-2)
#[must_use]
pub fn default_display_for_element(tag_name: &str) -> DisplayValue {
    // [§ 15.3.1 Hidden elements]
    // "The following elements must have their display set to none:"
    let hidden = [
        "area", "base", "basefont", "datalist", "head", "link", "meta", "noembed", "noframes",
        "param", "rp", "script", "style", "template", "title",
    ];
    if hidden.contains(&tag_name) {
        return DisplayValue::None;
    }

    // [§ 15.3.3 Flow content]
    let block_elements = [
        "address",
        "article",
        "aside",
        "blockquote",
        "body",
        "center",
        "dd",
        "details",
        "dialog",
        "dir",
        "div",
        "dl",
        "dt",
        "fieldset",
        "figcaption",
        "figure",
        "footer",
        "form",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "header",
        "hgroup",
        "hr",
        "html",
        "legend",
        "listing",
        "main",
        "menu",
        "nav",
        "ol",
        "p",
        "plaintext",
        "pre",
        "search",
        "section",
        "summary",
        "ul",
        "xmp",
    ];
    if block_elements.contains(&tag_name) {
        return DisplayValue::Block;
    }

    match tag_name {
        // [§ 15.3.7 Lists]
        // "li { display: list-item; }"
        "li" => DisplayValue::ListItem,

        // [§ 15.3.8 Tables]
        "table" => DisplayValue::Table,
        "caption" => DisplayValue::TableCaption,
        "colgroup" => DisplayValue::TableColumnGroup,
        "col" => DisplayValue::TableColumn,
        "thead" => DisplayValue::TableHeaderGroup,
        "tbody" => DisplayValue::TableRowGroup,
        "tfoot" => DisplayValue::TableFooterGroup,
        "tr" => DisplayValue::TableRow,
        "td" | "th" => DisplayValue::TableCell,

        // Form controls are inline-block by default.
        "input" | "button" | "textarea" | "select" => DisplayValue::InlineBlock,

        // a, abbr, b, br, cite, code, em, i, img, span, strong, ...
        _ => DisplayValue::Inline,
    }
}

/// Walks an element tree and produces the box sequence for it.
pub struct BoxTreeBuilder<'a> {
    registry: &'a HandlerRegistry,
    document: &'a dyn Document,
}

impl<'a> BoxTreeBuilder<'a> {
    /// A builder dispatching through `registry`, loading resources from
    /// `document`.
    #[must_use]
    pub fn new(registry: &'a HandlerRegistry, document: &'a dyn Document) -> Self {
        Self { registry, document }
    }

    /// Boxes for the children of the tree's root, in document order.
    ///
    /// `root_style` is the style the top-level elements inherit from.
    ///
    /// # Errors
    ///
    /// Propagates [`LayoutError::UnsupportedDisplay`] from handlers and box
    /// constructors.
    pub fn build(
        &self,
        tree: &DomTree,
        root_style: &ComputedStyle,
    ) -> Result<Vec<LayoutBox>, LayoutError> {
        self.build_children(tree, tree.root(), root_style)
    }

    fn build_children(
        &self,
        tree: &DomTree,
        parent: NodeId,
        parent_style: &ComputedStyle,
    ) -> Result<Vec<LayoutBox>, LayoutError> {
        let (parent_tag, parent_line) = tree
            .as_element(parent)
            .map_or(("", None), |data| (data.tag_name.as_str(), data.source_line));

        let mut boxes = Vec::new();
        for &child_id in tree.children(parent) {
            let Some(node) = tree.get(child_id) else {
                continue;
            };
            match &node.node_type {
                NodeType::Element(_) => {
                    if let Some(element) = tree.element(child_id) {
                        boxes.extend(self.build_element(tree, element, parent_style)?);
                    }
                }
                // [§ 9.2.2.1 Anonymous inline boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous)
                //
                // "Any text that is directly contained inside a block container
                // element (not inside an inline element) must be treated as an
                // anonymous inline element."
                NodeType::Text(text) if !text.is_empty() => {
                    boxes.push(LayoutBox::text(
                        parent_tag,
                        parent_line,
                        parent_style.inherit_from(),
                        text,
                    ));
                }
                NodeType::Text(_) | NodeType::Comment(_) | NodeType::Document => {}
            }
        }
        Ok(boxes)
    }

    fn build_element(
        &self,
        tree: &DomTree,
        element: ElementRef<'_>,
        parent_style: &ComputedStyle,
    ) -> Result<Vec<LayoutBox>, LayoutError> {
        let display = default_display_for_element(element.tag());
        if display == DisplayValue::None {
            return Ok(Vec::new());
        }
        let style = parent_style.inherit_from().with_display(display);
        let children = self.build_children(tree, element.id(), &style)?;
        let layout_box = provisional_box(element, style, children)?;
        self.registry.handle(self.document, element, layout_box)
    }
}

/// The box a `display` value generates before any element handler runs.
fn provisional_box(
    element: ElementRef<'_>,
    style: ComputedStyle,
    children: Vec<LayoutBox>,
) -> Result<LayoutBox, LayoutError> {
    let kind = match style.display {
        DisplayValue::TableColumnGroup => BoxKind::TableColumnGroup {
            span: GroupSpan::default(),
            children,
        },
        DisplayValue::TableColumn => BoxKind::TableColumn { span: 1 },
        DisplayValue::TableCell => BoxKind::TableCell {
            colspan: 1,
            rowspan: 1,
            children,
        },
        // Table internals and other block containers the classifier does
        // not know about. Table layout rebuilds the table structure from
        // these.
        DisplayValue::TableRow
        | DisplayValue::TableRowGroup
        | DisplayValue::TableHeaderGroup
        | DisplayValue::TableFooterGroup
        | DisplayValue::TableCaption
        | DisplayValue::FlowRoot
        | DisplayValue::Flex
        | DisplayValue::Grid => BoxKind::Block { children },
        DisplayValue::InlineFlex | DisplayValue::InlineGrid => BoxKind::Inline { children },
        _ => {
            return LayoutBox::container(element.tag(), element.source_line(), style, children);
        }
    };
    Ok(LayoutBox::new(
        element.tag(),
        element.source_line(),
        style,
        kind,
    ))
}
