//! Quire CLI
//!
//! Inspect the two halves of the layout core from a terminal:
//!
//! - `quire wrap`   - split a run of text into lines and print their metrics
//! - `quire image`  - run the `<img>` handler and print the boxes it returns
//! - `quire render` - paint a wrapped paragraph to a PNG

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use quire_common::warning::clear_warnings;
use quire_dom::{DomTree, ElementData};
use quire_layout::{
    ColorValue, ComputedStyle, DisplayList, DisplayValue, HandlerRegistry, LayoutBox,
    LineMetrics, LineSplitter, ReplacedContent, TextFragment, TextLineFragment,
};
use quire_render::{Canvas, FontSet, FontdueFontMetrics, ResourceDocument};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Wrap a sentence at 90px with approximate metrics
    quire wrap 'The quick brown fox' --width 90

    # Same, measured with a real font, as JSON
    quire wrap 'The quick brown fox' --width 90 --font DejaVuSans.ttf --json

    # Run the <img> handler on a missing image
    quire image missing.png --alt 'A logo'

    # Paint a justified paragraph
    quire render 'Lorem ipsum dolor sit amet' --width 120 --align justify -o out.png
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split text into lines and print per-line metrics
    Wrap(WrapArgs),
    /// Generate the boxes for an <img> element
    Image(ImageArgs),
    /// Lay out text and save it as an image
    Render(RenderArgs),
}

/// Font and paragraph options shared by `wrap` and `render`.
#[derive(Args, Debug)]
struct TextArgs {
    /// The text to lay out
    text: String,

    /// Wrap width in pixels (omit to never wrap)
    #[arg(long)]
    width: Option<f32>,

    /// Font size in pixels
    #[arg(long, default_value = "16")]
    font_size: f32,

    /// Comma-separated font family list
    #[arg(long, default_value = "serif")]
    font_family: String,

    /// Numeric font weight (100-900)
    #[arg(long, default_value = "400")]
    weight: u16,

    /// normal, italic or oblique
    #[arg(long, default_value = "normal")]
    style: String,

    /// normal or small-caps
    #[arg(long, default_value = "normal")]
    variant: String,

    /// left, right, center or justify
    #[arg(long, default_value = "left")]
    align: String,

    /// Extra advance after every character, in pixels
    #[arg(long)]
    letter_spacing: Option<f32>,

    /// Extra space between lines, in pixels
    #[arg(long, default_value = "0")]
    spacing: f32,

    /// TrueType/OpenType file used for every family
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Look up fallback fonts in the usual system locations
    #[arg(long)]
    system_fonts: bool,
}

#[derive(Args, Debug)]
struct WrapArgs {
    #[command(flatten)]
    text: TextArgs,

    /// Print the lines as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ImageArgs {
    /// Value of the src attribute
    src: String,

    /// Value of the alt attribute
    #[arg(long)]
    alt: Option<String>,

    /// Computed display of the element
    #[arg(long, default_value = "inline")]
    display: DisplayValue,

    /// Base URL relative sources resolve against
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    text: TextArgs,

    /// Output PNG path
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Blank border around the text, in pixels
    #[arg(long, default_value = "8")]
    margin: u32,
}

/// One wrapped line as printed by `wrap --json`.
#[derive(Serialize)]
struct WrapOutput<'a> {
    index: usize,
    #[serde(flatten)]
    line: &'a LineMetrics,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    match cli.command {
        Command::Wrap(args) => wrap(&args),
        Command::Image(args) => image(&args),
        Command::Render(args) => render(&args),
    }
}

/// Build the font set the options ask for.
fn load_fonts(args: &TextArgs) -> Result<FontSet> {
    let mut fonts = if args.system_fonts {
        FontSet::system()
    } else {
        FontSet::new()
    };
    if let Some(path) = &args.font {
        fonts
            .load_fallback(path)
            .with_context(|| format!("loading font '{}'", path.display()))?;
    }
    Ok(fonts)
}

/// Apply the paragraph options to a fragment.
fn configure(fragment: &mut TextFragment<'_>, args: &TextArgs) -> Result<()> {
    fragment.set_font_family(&args.font_family);
    fragment.set_font_size(args.font_size)?;
    fragment.set_font_weight(args.weight);
    fragment.set_font_style(&args.style)?;
    fragment.set_font_variant(&args.variant)?;
    fragment.set_alignment(&args.align)?;
    if let Some(spacing) = args.letter_spacing {
        fragment.set_letter_spacing(spacing);
    }
    fragment.set_spacing(args.spacing);
    Ok(())
}

fn wrap(args: &WrapArgs) -> Result<()> {
    let fonts = load_fonts(&args.text)?;
    let metrics = FontdueFontMetrics::new(&fonts);

    let mut fragment = TextLineFragment::new(&args.text.text, args.text.width, &metrics);
    configure(&mut fragment, &args.text)?;
    let lines: Vec<LineMetrics> = LineSplitter::new(fragment).collect();

    if args.json {
        let output: Vec<WrapOutput<'_>> = lines
            .iter()
            .enumerate()
            .map(|(index, line)| WrapOutput { index, line })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let width = args
        .text
        .width
        .map_or_else(|| "none".to_string(), |w| format!("{w}px"));
    println!("{} (width: {width})", "=== Lines ===".bold());
    for (index, line) in lines.iter().enumerate() {
        println!(
            "{} {:?}",
            format!("{index:>3}").dimmed(),
            line.text.green()
        );
        println!(
            "      size: {:.1}x{:.1}  baseline: {:.1}",
            line.width, line.height, line.baseline
        );
        println!(
            "      logical: x={:.0} y={:.0} w={:.0} h={:.0}  ink: x={:.0} y={:.0} w={:.0} h={:.0}",
            line.logical.x,
            line.logical.y,
            line.logical.width,
            line.logical.height,
            line.ink.x,
            line.ink.y,
            line.ink.width,
            line.ink.height
        );
    }
    Ok(())
}

fn image(args: &ImageArgs) -> Result<()> {
    let mut data = ElementData::new("img").with_attr("src", &args.src);
    if let Some(alt) = &args.alt {
        data = data.with_attr("alt", alt);
    }
    let mut tree = DomTree::new();
    let id = tree.append_element(tree.root(), data);
    let element = tree
        .element(id)
        .context("freshly appended element is missing")?;

    let document = ResourceDocument::new(args.base_url.as_deref());
    let registry = HandlerRegistry::html();
    let style = ComputedStyle::default().with_display(args.display);
    let provisional = LayoutBox::container(element.tag(), None, style, Vec::new())?;
    let boxes = registry.handle(&document, element, provisional)?;

    println!("{} ({} boxes)", "=== Boxes ===".bold(), boxes.len());
    for layout_box in &boxes {
        print_box(layout_box, 0);
    }
    Ok(())
}

/// Recursively print a box and its children.
fn print_box(layout_box: &LayoutBox, depth: usize) {
    let indent = "  ".repeat(depth);
    let detail = match (layout_box.text_content(), layout_box.replacement()) {
        (Some(text), _) => format!("{:?}", text.replace('\n', "\\n")),
        (None, Some(ReplacedContent::Image(image))) => format!(
            "image {}x{}",
            image.surface().width(),
            image.surface().height()
        ),
        (None, None) => String::new(),
    };
    println!(
        "{indent}[{}] <{}> {} {}",
        layout_box.kind_name().cyan(),
        layout_box.element_tag,
        layout_box.style.display.dimmed(),
        detail
    );
    for child in layout_box.children() {
        print_box(child, depth + 1);
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn render(args: &RenderArgs) -> Result<()> {
    let fonts = load_fonts(&args.text)?;
    let metrics = FontdueFontMetrics::new(&fonts);

    let mut fragment = TextFragment::new(&args.text.text, args.text.width, &metrics);
    configure(&mut fragment, &args.text)?;

    let (text_width, text_height) = fragment.size();
    let layout_width = args.text.width.unwrap_or(text_width).max(text_width);
    let margin = args.margin as f32;

    let mut display_list = DisplayList::new();
    fragment.show_layout(&mut display_list, margin, margin);

    let width = (layout_width + 2.0 * margin).ceil().max(1.0) as u32;
    let height = (text_height + 2.0 * margin).ceil().max(1.0) as u32;
    let mut canvas = Canvas::new(width, height, ColorValue::WHITE, &fonts);
    canvas.render(&display_list);
    canvas.save(&args.output)?;

    println!(
        "{} {} ({width}x{height}, {} draw commands)",
        "Saved".green().bold(),
        args.output.display(),
        display_list.len()
    );
    Ok(())
}
