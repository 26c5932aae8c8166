//! The `display` property.
//!
//! [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
//!
//! "The display property defines an element's display type, which consists of
//! the two basic qualities of how an element generates boxes."
//!
//! Only the single-keyword forms are modelled; multi-keyword syntax is
//! resolved to one of these by the cascade.

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// A computed `display` keyword.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DisplayValue {
    /// "The element generates a block-level box."
    Block,
    /// "The element generates an inline-level box."
    Inline,
    /// An inline-level block container.
    InlineBlock,
    /// A block-level box plus a `::marker` box.
    ListItem,
    /// A block-level table wrapper box.
    Table,
    /// An inline-level table wrapper box.
    InlineTable,
    /// `<tbody>`.
    TableRowGroup,
    /// `<thead>`.
    TableHeaderGroup,
    /// `<tfoot>`.
    TableFooterGroup,
    /// `<tr>`.
    TableRow,
    /// `<colgroup>`.
    TableColumnGroup,
    /// `<col>`.
    TableColumn,
    /// `<td>` and `<th>`.
    TableCell,
    /// `<caption>`.
    TableCaption,
    /// "The element generates a run-in box."
    RunIn,
    /// A block container establishing a new formatting context.
    FlowRoot,
    /// A block-level flex container.
    Flex,
    /// An inline-level flex container.
    InlineFlex,
    /// A block-level grid container.
    Grid,
    /// An inline-level grid container.
    InlineGrid,
    /// "The element and its descendants generate no boxes or text runs."
    None,
}
