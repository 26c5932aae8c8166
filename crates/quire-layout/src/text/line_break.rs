//! Greedy line breaking over UAX #14 break opportunities.
//!
//! [§ 5 Line Breaking and Word Boundaries](https://www.w3.org/TR/css-text-3/#line-breaking)
//!
//! "When inline-level content is laid out into lines, it is broken across
//! line boxes. Such a break is called a line break."
//!
//! Break opportunities come from `unicode-linebreak`. Lines are filled
//! greedily: the last opportunity whose content still fits wins. A word
//! wider than the available width is broken between characters, keeping at
//! least one character per line so splitting always makes progress.

use unicode_linebreak::{BreakOpportunity, linebreaks};

/// Tolerance for floating-point accumulation when comparing widths.
const FIT_EPSILON: f32 = 0.001;

/// One line of a wrapped paragraph, as byte offsets into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// Offset of the first character on the line.
    pub start: usize,
    /// End of the visible content: trailing spaces and the line terminator
    /// are excluded.
    pub end: usize,
    /// Offset where the following line starts. Preserved newlines lie
    /// between `end` and `next`.
    pub next: usize,
    /// The line ends at a mandatory break (a newline or the end of the
    /// text), so it is the last line of its paragraph.
    pub hard_break: bool,
}

impl LineSpan {
    const fn empty_at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
            next: offset,
            hard_break: true,
        }
    }
}

/// Characters UAX #14 treats as mandatory break classes BK, CR, LF and NL.
const fn is_line_terminator(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Whitespace hanging at the end of a line, not counted when fitting.
fn trim_line_end(segment: &str) -> &str {
    segment.trim_end_matches(|ch: char| ch == ' ' || ch == '\t' || is_line_terminator(ch))
}

/// Split `text` into lines no wider than `max_width`.
///
/// `measure` returns the advance width of a slice and must be additive
/// over concatenation; each character is measured about once. With `max_width` of
/// `None` only mandatory breaks end lines. At most `limit` lines are
/// produced when a limit is given.
///
/// Empty text yields a single empty line, and text ending in a newline
/// yields a trailing empty line, matching how a paragraph with a final
/// preserved newline is displayed.
pub fn break_lines(
    text: &str,
    max_width: Option<f32>,
    measure: impl Fn(&str) -> f32,
    limit: Option<usize>,
) -> Vec<LineSpan> {
    let opportunities: Vec<(usize, BreakOpportunity)> = linebreaks(text).collect();
    let limit = limit.unwrap_or(usize::MAX);
    let mut lines = Vec::new();

    if text.is_empty() {
        if limit > 0 {
            lines.push(LineSpan::empty_at(0));
        }
        return lines;
    }

    let mut start = 0;
    while start < text.len() && lines.len() < limit {
        let line = next_line(text, start, &opportunities, max_width, &measure);
        lines.push(line);
        start = line.next;
    }

    let ends_with_newline = text.chars().next_back().is_some_and(is_line_terminator);
    if ends_with_newline && lines.len() < limit {
        lines.push(LineSpan::empty_at(text.len()));
    }
    lines
}

fn next_line(
    text: &str,
    start: usize,
    opportunities: &[(usize, BreakOpportunity)],
    max_width: Option<f32>,
    measure: &impl Fn(&str) -> f32,
) -> LineSpan {
    let first = opportunities.partition_point(|&(offset, _)| offset <= start);
    let candidates = &opportunities[first..];
    let Some(max_width) = max_width else {
        return unconstrained_line(text, start, candidates);
    };
    let limit = max_width + FIT_EPSILON;

    // Advances are additive, so only the part added since the previous
    // opportunity is measured.
    let mut measured_end = start;
    let mut width = 0.0;
    let mut best: Option<LineSpan> = None;

    for &(offset, opportunity) in candidates {
        let end = start + trim_line_end(&text[start..offset]).len();
        width += measure(&text[measured_end..end]);
        measured_end = end;
        if width > limit {
            break;
        }

        let mandatory = opportunity == BreakOpportunity::Mandatory;
        best = Some(LineSpan {
            start,
            end,
            next: offset,
            hard_break: mandatory,
        });
        if mandatory {
            break;
        }
    }

    best.unwrap_or_else(|| break_word(text, start, candidates, limit, measure))
}

/// Without a width only a mandatory break (or the end of text) ends a line.
fn unconstrained_line(
    text: &str,
    start: usize,
    candidates: &[(usize, BreakOpportunity)],
) -> LineSpan {
    let next = candidates
        .iter()
        .find(|&&(_, opportunity)| opportunity == BreakOpportunity::Mandatory)
        .map_or(text.len(), |&(offset, _)| offset);
    LineSpan {
        start,
        end: start + trim_line_end(&text[start..next]).len(),
        next,
        hard_break: true,
    }
}

/// The first word on the line does not fit: break it between characters.
fn break_word(
    text: &str,
    start: usize,
    candidates: &[(usize, BreakOpportunity)],
    limit: f32,
    measure: &impl Fn(&str) -> f32,
) -> LineSpan {
    let word_end = candidates.first().map_or(text.len(), |&(offset, _)| {
        start + trim_line_end(&text[start..offset]).len()
    });

    let mut boundaries = text[start..word_end]
        .char_indices()
        .map(|(index, ch)| start + index + ch.len_utf8());

    // At least one character per line.
    let mut end = boundaries.next().unwrap_or(word_end);
    let mut width = measure(&text[start..end]);
    for boundary in boundaries {
        width += measure(&text[end..boundary]);
        if width > limit {
            break;
        }
        end = boundary;
    }

    LineSpan {
        start,
        end,
        next: end,
        hard_break: false,
    }
}
