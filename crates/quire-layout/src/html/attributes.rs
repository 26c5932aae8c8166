//! Typed attribute readers.
//!
//! Malformed attributes are never errors: the reader returns `None` and the
//! caller keeps whatever value it already had.

use quire_common::url::resolve_url;
use quire_dom::ElementRef;

use super::Document;

/// [§ 2.3.4.1 Signed integers](https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#signed-integers)
///
/// Read attribute `name` as an integer in `minimum..=maximum`.
///
/// The trimmed value must parse as a whole number. Absent, unparseable or
/// too small values give `None`; values above `maximum` are treated as
/// `maximum`.
#[must_use]
pub fn integer_attribute(
    element: ElementRef<'_>,
    name: &str,
    minimum: u32,
    maximum: u32,
) -> Option<u32> {
    let value: i64 = element.attribute(name)?.trim().parse().ok()?;
    if value < i64::from(minimum) {
        return None;
    }
    Some(u32::try_from(value).map_or(maximum, |value| value.min(maximum)))
}

/// Read attribute `name` as a URL resolved against the document's base.
///
/// Whitespace around the value is ignored; an empty value counts as absent.
#[must_use]
pub fn url_attribute(
    document: &dyn Document,
    element: ElementRef<'_>,
    name: &str,
) -> Option<String> {
    let value = element.attribute(name)?.trim();
    if value.is_empty() {
        return None;
    }
    Some(resolve_url(value, document.base_url()))
}
