//! The box tree.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! "The following sections describe the types of boxes that may be generated
//! in CSS 2.1. A box's type affects, in part, its behavior in the visual
//! formatting model."
//!
//! Each variant of [`BoxKind`] carries exactly the fields that are meaningful
//! for it; table attributes live on the table variants only.

use crate::LayoutError;
use crate::classifier::{BoxLevel, box_level};
use crate::replacement::ReplacedContent;
use crate::style::ComputedStyle;

/// [§ 17.3 Columns](https://www.w3.org/TR/CSS2/tables.html#columns)
///
/// The number of columns a column group stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSpan {
    /// Given by the group's own `span` attribute (or the default of 1).
    Fixed(u32),
    /// The sum of the child columns' spans, computed by table layout. Used
    /// when the group has `<col>` children so their columns are not counted
    /// twice.
    FromColumns,
}

impl Default for GroupSpan {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

/// What a box is, and the fields only that kind of box has.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxKind {
    /// A block-level block container.
    Block {
        /// Child boxes in document order.
        children: Vec<LayoutBox>,
    },
    /// An inline-level box whose contents join the surrounding line.
    Inline {
        /// Child boxes in document order.
        children: Vec<LayoutBox>,
    },
    /// A block-level atomic box with external content.
    BlockLevelReplaced {
        /// The externally rendered content.
        replacement: ReplacedContent,
    },
    /// An inline-level atomic box with external content.
    InlineLevelReplaced {
        /// The externally rendered content.
        replacement: ReplacedContent,
    },
    /// [§ 2.5 Text Runs](https://www.w3.org/TR/css-display-3/#text-nodes)
    Text {
        /// The characters of the run.
        text: String,
    },
    /// `display: table-column-group`.
    TableColumnGroup {
        /// Number of columns the group stands for.
        span: GroupSpan,
        /// Column boxes in document order.
        children: Vec<LayoutBox>,
    },
    /// `display: table-column`.
    TableColumn {
        /// Number of columns this box stands for (at least 1).
        span: u32,
    },
    /// `display: table-cell`.
    TableCell {
        /// Number of columns the cell spans (at least 1).
        colspan: u32,
        /// Number of rows the cell spans; 0 extends to the end of the row
        /// group.
        rowspan: u32,
        /// Child boxes in document order.
        children: Vec<LayoutBox>,
    },
}

/// A node in the box tree.
///
/// "Each box is associated with its generating element."
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    /// Tag of the generating element.
    pub element_tag: String,
    /// Source line of the generating element, for diagnostics.
    pub source_line: Option<usize>,
    /// The resolved style.
    pub style: ComputedStyle,
    /// Variant and variant-specific fields.
    pub kind: BoxKind,
}

impl LayoutBox {
    /// Assemble a box from its parts.
    #[must_use]
    pub fn new(
        element_tag: &str,
        source_line: Option<usize>,
        style: ComputedStyle,
        kind: BoxKind,
    ) -> Self {
        Self {
            element_tag: element_tag.to_string(),
            source_line,
            style,
            kind,
        }
    }

    /// A text box.
    #[must_use]
    pub fn text(
        element_tag: &str,
        source_line: Option<usize>,
        style: ComputedStyle,
        text: &str,
    ) -> Self {
        Self::new(
            element_tag,
            source_line,
            style,
            BoxKind::Text {
                text: text.to_string(),
            },
        )
    }

    /// A `Block` or `Inline` container, whichever the style's display
    /// calls for.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnsupportedDisplay`] if the style is neither
    /// block-level nor inline-level.
    pub fn container(
        element_tag: &str,
        source_line: Option<usize>,
        style: ComputedStyle,
        children: Vec<Self>,
    ) -> Result<Self, LayoutError> {
        let kind = match box_level(&style)? {
            BoxLevel::Block => BoxKind::Block { children },
            BoxLevel::Inline => BoxKind::Inline { children },
        };
        Ok(Self::new(element_tag, source_line, style, kind))
    }

    /// A block-level or inline-level replaced box, whichever the style's
    /// display calls for.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnsupportedDisplay`] if the style is neither
    /// block-level nor inline-level.
    pub fn replaced(
        element_tag: &str,
        source_line: Option<usize>,
        style: ComputedStyle,
        replacement: ReplacedContent,
    ) -> Result<Self, LayoutError> {
        let kind = match box_level(&style)? {
            BoxLevel::Block => BoxKind::BlockLevelReplaced { replacement },
            BoxLevel::Inline => BoxKind::InlineLevelReplaced { replacement },
        };
        Ok(Self::new(element_tag, source_line, style, kind))
    }

    /// Child boxes; empty for leaf variants.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            BoxKind::Block { children }
            | BoxKind::Inline { children }
            | BoxKind::TableColumnGroup { children, .. }
            | BoxKind::TableCell { children, .. } => children,
            BoxKind::BlockLevelReplaced { .. }
            | BoxKind::InlineLevelReplaced { .. }
            | BoxKind::Text { .. }
            | BoxKind::TableColumn { .. } => &[],
        }
    }

    /// The text of a text box.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            BoxKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// The content of a replaced box.
    #[must_use]
    pub const fn replacement(&self) -> Option<&ReplacedContent> {
        match &self.kind {
            BoxKind::BlockLevelReplaced { replacement }
            | BoxKind::InlineLevelReplaced { replacement } => Some(replacement),
            _ => None,
        }
    }

    /// A short name for the variant, for diagnostics and CLI output.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self.kind {
            BoxKind::Block { .. } => "BlockBox",
            BoxKind::Inline { .. } => "InlineBox",
            BoxKind::BlockLevelReplaced { .. } => "BlockLevelReplacedBox",
            BoxKind::InlineLevelReplaced { .. } => "InlineLevelReplacedBox",
            BoxKind::Text { .. } => "TextBox",
            BoxKind::TableColumnGroup { .. } => "TableColumnGroupBox",
            BoxKind::TableColumn { .. } => "TableColumnBox",
            BoxKind::TableCell { .. } => "TableCellBox",
        }
    }
}
