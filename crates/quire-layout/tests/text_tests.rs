//! Tests for text fragments, first-line extraction and line splitting.
//!
//! Geometry is computed with [`ApproximateFontMetrics`] (advance 0.6em,
//! ascent 15px and descent 4px at 16px once rounded) or with a fixed-advance
//! metrics implementation, so no system fonts are involved.

use quire_layout::text::{GlyphInk, advance_width};
use quire_layout::{
    ApproximateFontMetrics, BoxKind, ColorValue, ComputedStyle, DisplayCommand, DisplayList,
    FontDescription, FontMetrics, FontStyle, FontVariant, LayoutBox, LayoutError, LineSplitter,
    Rect, TextAlign, TextFragment, TextLineFragment,
};

/// Every glyph is a 10px box sitting on a 2px descender.
struct MonospaceMetrics;

impl FontMetrics for MonospaceMetrics {
    fn advance(&self, ch: char, _font: &FontDescription, _size: f32) -> f32 {
        if ch.is_control() { 0.0 } else { 10.0 }
    }

    fn glyph_ink(&self, ch: char, _font: &FontDescription, _size: f32) -> Option<GlyphInk> {
        (!ch.is_whitespace()).then_some(GlyphInk {
            xmin: 0.0,
            ymin: -2.0,
            width: 10.0,
            height: 10.0,
        })
    }

    fn ascent(&self, _font: &FontDescription) -> f32 {
        8.0
    }

    fn descent(&self, _font: &FontDescription) -> f32 {
        2.0
    }
}

static APPROXIMATE: ApproximateFontMetrics = ApproximateFontMetrics;

fn line(text: &str, width: Option<f32>) -> TextLineFragment<'static> {
    TextLineFragment::new(text, width, &APPROXIMATE)
}

fn text_box(text: &str, style: ComputedStyle) -> LayoutBox {
    LayoutBox::text("p", Some(1), style, text)
}

// ---------------------------------------------------------------------------
// First line and remainder
// ---------------------------------------------------------------------------

#[test]
fn test_first_line_and_remainder() {
    let fragment = line("The quick brown fox", Some(90.0));
    assert_eq!(fragment.text(), "The quick");
    assert_eq!(fragment.remaining_text().as_deref(), Some("brown fox"));
    assert_eq!(fragment.source_text(), "The quick brown fox");
}

#[test]
fn test_everything_fits() {
    let fragment = line("The quick brown fox", Some(500.0));
    assert_eq!(fragment.text(), "The quick brown fox");
    assert_eq!(fragment.remaining_text(), None);
}

#[test]
fn test_unconstrained_width_never_wraps() {
    let mut fragment = line("The quick brown fox", Some(10.0));
    fragment.set_width(None);
    assert_eq!(fragment.remaining_text(), None);

    fragment.set_width(Some(-1.0));
    assert_eq!(fragment.width(), None);
    assert_eq!(fragment.text(), "The quick brown fox");
}

#[test]
fn test_preserved_newline_is_consumed_between_lines() {
    let fragment = line("ab\ncd", None);
    assert_eq!(fragment.text(), "ab");
    assert_eq!(fragment.remaining_text().as_deref(), Some("cd"));

    let newline = line("\n", None);
    assert_eq!(newline.text(), "");
    assert_eq!(newline.remaining_text().as_deref(), Some(""));
}

#[test]
fn test_long_word_breaks_inside_word() {
    let fragment = line("Supercalifragilistic is long", Some(50.0));
    assert_eq!(fragment.text(), "Super");
    assert_eq!(
        fragment.remaining_text().as_deref(),
        Some("califragilistic is long")
    );
}

#[test]
fn test_zero_width_takes_one_character() {
    let fragment = line("abc", Some(0.0));
    assert_eq!(fragment.text(), "a");
    assert_eq!(fragment.remaining_text().as_deref(), Some("bc"));
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[test]
fn test_first_line_geometry() {
    let fragment = line("The quick brown fox", Some(90.0));
    assert_eq!(fragment.size(), (86.0, 19.0));
    assert_eq!(fragment.logical_extents(), Rect::new(0.0, -15.0, 86.0, 19.0));
    assert_eq!(fragment.ink_extents(), Rect::new(0.0, -12.0, 86.0, 16.0));
    assert_eq!(fragment.baseline(), 15.0);
}

#[test]
fn test_queries_are_repeatable() {
    let fragment = line("The quick brown fox", Some(90.0));
    let first = (
        fragment.size(),
        fragment.logical_extents(),
        fragment.ink_extents(),
        fragment.baseline(),
    );
    let second = (
        fragment.size(),
        fragment.logical_extents(),
        fragment.ink_extents(),
        fragment.baseline(),
    );
    assert_eq!(first, second);
    assert_eq!(fragment.text(), fragment.text());
}

#[test]
fn test_mutation_is_reflected_immediately() {
    let mut fragment = line("The quick brown fox", Some(90.0));
    assert_eq!(fragment.text(), "The quick");
    fragment.set_width(Some(200.0));
    assert_eq!(fragment.text(), "The quick brown fox");
    fragment.set_font_size(32.0).unwrap();
    assert_eq!(fragment.text(), "The quick");
}

#[test]
fn test_custom_metrics() {
    let metrics = MonospaceMetrics;
    let fragment = TextLineFragment::new("hello world", Some(55.0), &metrics);
    assert_eq!(fragment.text(), "hello");
    assert_eq!(fragment.remaining_text().as_deref(), Some("world"));
    assert_eq!(fragment.size(), (50.0, 10.0));
    assert_eq!(fragment.logical_extents(), Rect::new(0.0, -8.0, 50.0, 10.0));
    assert_eq!(fragment.ink_extents(), Rect::new(0.0, -8.0, 50.0, 10.0));
    assert_eq!(fragment.baseline(), 8.0);
}

#[test]
fn test_whitespace_only_line_has_no_ink() {
    let fragment = line("   ", Some(100.0));
    assert_eq!(fragment.ink_extents(), Rect::default());
    assert_eq!(fragment.logical_extents().height, 19.0);
}

#[test]
fn test_empty_text_is_one_line_tall() {
    let fragment = TextFragment::with_default_metrics("", None);
    assert_eq!(fragment.size(), (0.0, 19.0));
    assert_eq!(fragment.layout().lines.len(), 1);
}

#[test]
fn test_multi_line_size_includes_spacing() {
    let mut fragment = TextFragment::with_default_metrics("The quick brown fox", Some(90.0));
    assert_eq!(fragment.size(), (86.0, 38.0));
    fragment.set_spacing(5.0);
    assert_eq!(fragment.size(), (86.0, 43.0));
}

#[test]
fn test_right_alignment_offsets_line() {
    let mut fragment = line("The quick brown fox", Some(200.0));
    fragment.set_alignment("right").unwrap();
    let logical = fragment.logical_extents();
    assert_eq!(logical.x, 18.0);
    assert_eq!(logical.right(), 200.0);
}

#[test]
fn test_center_without_width_uses_widest_line() {
    let mut fragment = line("ab\nabcd", None);
    fragment.set_alignment("center").unwrap();
    assert_eq!(fragment.logical_extents().x, 10.0);
}

#[test]
fn test_letter_spacing_widens_every_glyph() {
    let mut fragment = line("ab", None);
    fragment.set_letter_spacing(2.0);
    assert_eq!(fragment.size().0, 23.0);
}

#[test]
fn test_small_caps_are_synthesized() {
    let mut fragment = line("ab", None);
    assert_eq!(fragment.size().0, 19.0);
    fragment.set_font_variant("small-caps").unwrap();
    assert_eq!(fragment.font().variant, FontVariant::SmallCaps);
    assert_eq!(fragment.size().0, 13.0);
}

#[test]
fn test_rise_moves_extents_up() {
    let mut fragment = line("ab", None);
    fragment.set_rise(4.0);
    assert_eq!(fragment.logical_extents().y, -19.0);
    assert_eq!(fragment.ink_extents().y, -16.0);
}

#[test]
fn test_bold_is_wider_and_weight_is_clamped() {
    let mut fragment = line("ab", None);
    fragment.set_font_weight(1000);
    assert_eq!(fragment.font().weight, 900);
    assert_eq!(fragment.size().0, 21.0);
    fragment.set_font_weight(50);
    assert_eq!(fragment.font().weight, 100);
}

#[test]
fn test_control_characters_take_no_space() {
    let font = FontDescription::default();
    assert_eq!(
        advance_width("a\u{0}b", &font, &APPROXIMATE),
        advance_width("ab", &font, &APPROXIMATE)
    );
}

// ---------------------------------------------------------------------------
// Keyword validation
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_keywords_are_rejected() {
    let mut fragment = line("x", None);
    assert!(matches!(
        fragment.set_alignment("middle"),
        Err(LayoutError::InvalidValue {
            property: "text-align",
            ..
        })
    ));
    assert!(fragment.set_font_style("slanted").is_err());
    assert!(fragment.set_font_variant("all-small-caps").is_err());
    assert_eq!(fragment.alignment(), TextAlign::Left);
    assert_eq!(fragment.font().style, FontStyle::Normal);
}

#[test]
fn test_unusable_font_size_is_rejected() {
    let mut fragment = line("x", None);
    assert!(fragment.set_font_size(-1.0).is_err());
    assert!(fragment.set_font_size(f32::NAN).is_err());
    assert!(fragment.set_font_size(f32::INFINITY).is_err());
    assert_eq!(fragment.font().size, 16.0);
    fragment.set_font_size(0.0).unwrap();
    assert_eq!(fragment.font().size, 0.0);
}

// ---------------------------------------------------------------------------
// Configuration from a text box
// ---------------------------------------------------------------------------

#[test]
fn test_from_textbox_applies_style() {
    let style = ComputedStyle {
        font_family: vec!["Helvetica".to_string(), "Arial".to_string()],
        font_size: 20.0,
        font_weight: 700,
        font_style: FontStyle::Italic,
        font_variant: FontVariant::SmallCaps,
        letter_spacing: Some(1.5),
        text_align: TextAlign::Justify,
        color: ColorValue::rgb(10, 20, 30),
        background_color: Some(ColorValue::WHITE),
        ..ComputedStyle::default()
    };
    let fragment = TextFragment::from_textbox(&text_box("Hello", style), &APPROXIMATE).unwrap();

    assert_eq!(fragment.text(), "Hello");
    let font = fragment.font();
    assert_eq!(font.family, "Helvetica, Arial");
    assert_eq!(font.families().collect::<Vec<_>>(), ["Helvetica", "Arial"]);
    assert_eq!(font.size, 20.0);
    assert_eq!(font.weight, 700);
    assert_eq!(font.style, FontStyle::Italic);
    assert_eq!(font.variant, FontVariant::SmallCaps);
    assert_eq!(font.letter_spacing, 1.5);
    assert!(fragment.justify());
    assert_eq!(fragment.foreground(), ColorValue::rgb(10, 20, 30));
}

#[test]
fn test_normal_letter_spacing_keeps_previous_value() {
    let mut fragment = line("", None);
    fragment.set_letter_spacing(3.0);
    fragment
        .set_textbox(&text_box("x", ComputedStyle::default()))
        .unwrap();
    assert_eq!(fragment.font().letter_spacing, 3.0);
}

#[test]
fn test_non_text_box_is_rejected() {
    let block = LayoutBox::new(
        "div",
        None,
        ComputedStyle::default(),
        BoxKind::Block {
            children: Vec::new(),
        },
    );
    let result = TextLineFragment::from_textbox(&block, &APPROXIMATE);
    assert!(matches!(result, Err(LayoutError::NotText { tag }) if tag == "div"));
}

// ---------------------------------------------------------------------------
// Justification and painting
// ---------------------------------------------------------------------------

#[test]
fn test_justify_stretches_all_but_last_line() {
    let mut fragment = TextFragment::with_default_metrics("aa bb cc dd", Some(60.0));
    fragment.set_alignment("justify").unwrap();
    let layout = fragment.layout();
    assert_eq!(layout.lines.len(), 2);
    assert!((layout.lines[0].justify_gap - 12.0).abs() < 0.01);
    assert_eq!(layout.lines[0].logical.width, 60.0);
    assert_eq!(layout.lines[1].justify_gap, 0.0);
    assert!(layout.lines[1].hard_break);
}

#[test]
fn test_show_layout_emits_positioned_runs() {
    let mut fragment = TextFragment::with_default_metrics("aa bb cc dd", Some(60.0));
    fragment.set_alignment("justify").unwrap();
    fragment.set_foreground(ColorValue::rgb(200, 0, 0));

    let mut list = DisplayList::new();
    fragment.show_layout(&mut list, 10.0, 100.0);

    let runs: Vec<_> = list.text_runs().collect();
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].text, "aa");
    assert_eq!(runs[0].x, 10.0);
    assert_eq!(runs[0].baseline, 115.0);
    assert_eq!(runs[1].text, "bb");
    assert!((runs[1].x - 50.8).abs() < 0.01);
    assert_eq!(runs[2].text, "cc dd");
    assert_eq!(runs[2].baseline, 134.0);
    assert!(runs.iter().all(|run| run.color == ColorValue::rgb(200, 0, 0)));
    assert!(matches!(list.commands()[0], DisplayCommand::DrawText(_)));
}

#[test]
fn test_show_layout_skips_empty_lines() {
    let fragment = TextFragment::with_default_metrics("a\n\nb", None);
    let mut list = DisplayList::new();
    fragment.show_layout(&mut list, 0.0, 0.0);
    let texts: Vec<&str> = list.text_runs().map(|run| run.text.as_str()).collect();
    assert_eq!(texts, ["a", "b"]);
    assert_eq!(list.text_runs().nth(1).map(|run| run.baseline), Some(53.0));
}

// ---------------------------------------------------------------------------
// LineSplitter
// ---------------------------------------------------------------------------

#[test]
fn test_splitter_yields_every_line() {
    let lines: Vec<String> = LineSplitter::new(line("The quick brown fox jumps", Some(90.0)))
        .map(|metrics| metrics.text)
        .collect();
    assert_eq!(lines, ["The quick", "brown fox", "jumps"]);
}

#[test]
fn test_splitter_reports_geometry() {
    let first = LineSplitter::new(line("The quick brown fox", Some(90.0)))
        .next()
        .unwrap();
    assert_eq!(first.width, 86.0);
    assert_eq!(first.height, 19.0);
    assert_eq!(first.baseline, 15.0);
    assert_eq!(first.logical, Rect::new(0.0, -15.0, 86.0, 19.0));
}

#[test]
fn test_splitter_width_can_change_between_lines() {
    let mut splitter = LineSplitter::new(line("aaa bbb ccc", Some(40.0)));
    assert_eq!(splitter.next().map(|m| m.text).as_deref(), Some("aaa"));
    splitter.fragment_mut().set_width(Some(200.0));
    assert_eq!(splitter.next().map(|m| m.text).as_deref(), Some("bbb ccc"));
    assert_eq!(splitter.next(), None);
}

#[test]
fn test_splitter_stops_on_trailing_newline() {
    let lines: Vec<String> = LineSplitter::new(line("ab\n", None))
        .map(|metrics| metrics.text)
        .collect();
    assert_eq!(lines, ["ab"]);
}

mod properties {
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    use super::*;

    #[quickcheck]
    #[allow(clippy::needless_pass_by_value)]
    fn splitting_preserves_words_and_fits(words: Vec<String>, width: u8) -> TestResult {
        let words: Vec<String> = words
            .iter()
            .map(|word| word.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
            .filter(|word| !word.is_empty())
            .take(30)
            .collect();
        let text = words.join(" ");
        let max = f32::from(width);

        let lines: Vec<String> = LineSplitter::new(line(&text, Some(max)))
            .map(|metrics| metrics.text)
            .collect();

        let joined: String = lines.concat().chars().filter(|ch| *ch != ' ').collect();
        let expected: String = words.concat();
        if joined != expected {
            return TestResult::failed();
        }
        #[allow(clippy::cast_precision_loss)]
        let all_fit = lines.iter().all(|text| {
            let count = text.chars().count();
            count <= 1 || count as f32 * 9.6 <= max + 0.01
        });
        TestResult::from_bool(all_fit)
    }
}
