//! Turning an `src` reference into pixels.
//!
//! [§ 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
//!
//! 1. **Fetch** - [`quire_common::net::fetch_bytes`] reads HTTP, `data:`
//!    and local file references.
//! 2. **Detect** - [`detect_format()`] decides between SVG and raster using
//!    extension, MIME type, and magic-byte sniffing.
//! 3. **Decode** - [`ImageDecoder`] implementations turn bytes into an
//!    [`ImageSurface`].

use std::path::Path;

use quire_common::image::{ImageSurface, SurfaceError};
use quire_common::net::{FetchError, fetch_bytes};
use quire_common::warning::warn_once;
use thiserror::Error;

/// Why an image could not be loaded.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The bytes could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// usvg rejected the document.
    #[error("failed to parse SVG: {0}")]
    Svg(#[from] usvg::Error),
    /// The SVG has no intrinsic size to rasterize at.
    #[error("SVG has zero-size dimensions")]
    EmptySvg,
    /// tiny-skia could not allocate the target.
    #[error("failed to allocate a {width}x{height} pixmap for SVG")]
    Pixmap {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The `image` crate could not decode the bytes.
    #[error("could not decode image ({0})")]
    Raster(#[from] image::ImageError),
    /// The decoded pixels did not form a valid surface.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    /// No registered decoder handles the detected format.
    #[error("no decoder available for format {0:?}")]
    NoDecoder(ImageFormat),
}

/// Decoder family of a resource.
///
/// Raster sub-formats are told apart by the `image` crate itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// `image/svg+xml`, rasterized at its intrinsic size.
    Svg,
    /// Raster image (decoded via the `image` crate).
    Raster,
}

/// The path part of `resolved`, without query or fragment.
///
/// `data:` URLs are returned whole since `#` and `?` may be payload.
#[must_use]
pub fn strip_url_decorations(resolved: &str) -> &str {
    if resolved.starts_with("data:") {
        return resolved;
    }
    let end = resolved.find(['?', '#']).unwrap_or(resolved.len());
    &resolved[..end]
}

/// Emit `warn_once` messages for URL parts the loader ignores.
pub fn warn_url_decorations(resolved: &str) {
    if resolved.starts_with("data:") || is_http(resolved) {
        return;
    }
    if let Some((_, fragment)) = resolved.split_once('#') {
        warn_once(
            "image",
            &format!("ignoring fragment identifier '#{fragment}' in '{resolved}'"),
        );
    }
    let without_fragment = resolved.split_once('#').map_or(resolved, |(b, _)| b);
    if let Some((_, query)) = without_fragment.split_once('?') {
        warn_once(
            "image",
            &format!("ignoring query string '?{query}' in '{resolved}'"),
        );
    }
}

fn is_http(resolved: &str) -> bool {
    resolved.starts_with("http://") || resolved.starts_with("https://")
}

/// Decide which decoder family `bytes` belong to.
///
/// 1. **Extension check** - fast path for `.svg` in `path_for_ext`.
/// 2. **Data URL MIME check** - `data:image/svg` prefix in `resolved_url`.
/// 3. **Magic-byte sniffing** - trims leading whitespace and checks the
///    first bytes for `<?xml` or `<svg` prefixes.
/// 4. **Default** - [`ImageFormat::Raster`].
#[must_use]
pub fn detect_format(path_for_ext: &str, resolved_url: &str, bytes: &[u8]) -> ImageFormat {
    if Path::new(path_for_ext)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
    {
        return ImageFormat::Svg;
    }

    if resolved_url.starts_with("data:image/svg") {
        return ImageFormat::Svg;
    }

    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let head = &bytes[start..];
    if head.starts_with(b"<?xml") || head.starts_with(b"<svg") {
        return ImageFormat::Svg;
    }

    ImageFormat::Raster
}

/// A decoder that can turn raw bytes into an [`ImageSurface`].
pub trait ImageDecoder {
    /// Name shown in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether `format` is one this decoder understands.
    fn supports(&self, format: ImageFormat) -> bool;

    /// Attempt to decode `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an [`ImageError`] if the bytes cannot be decoded by this
    /// decoder.
    fn decode(&self, bytes: &[u8]) -> Result<ImageSurface, ImageError>;
}

/// Decodes SVG images via usvg → resvg rasterization at intrinsic size.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgDecoder;

impl ImageDecoder for SvgDecoder {
    fn name(&self) -> &'static str {
        "SVG (resvg)"
    }

    fn supports(&self, format: ImageFormat) -> bool {
        format == ImageFormat::Svg
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn decode(&self, bytes: &[u8]) -> Result<ImageSurface, ImageError> {
        let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())?;

        let size = tree.size();
        let (width, height) = (size.width().ceil() as u32, size.height().ceil() as u32);
        if width == 0 || height == 0 {
            return Err(ImageError::EmptySvg);
        }

        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(ImageError::Pixmap { width, height })?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        // tiny-skia stores premultiplied alpha; surfaces are straight RGBA.
        let rgba = pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect();
        Ok(ImageSurface::new(width, height, rgba)?)
    }
}

/// Everything the `image` crate can guess from the bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn name(&self) -> &'static str {
        "Raster (image crate)"
    }

    fn supports(&self, format: ImageFormat) -> bool {
        format == ImageFormat::Raster
    }

    fn decode(&self, bytes: &[u8]) -> Result<ImageSurface, ImageError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(ImageSurface::new(width, height, rgba.into_raw())?)
    }
}

/// Ordered decoders; the first one supporting the sniffed format wins.
pub struct ImageLoaderPipeline {
    decoders: Vec<Box<dyn ImageDecoder>>,
}

impl std::fmt::Debug for ImageLoaderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.decoders.iter().map(|d| d.name()).collect();
        f.debug_struct("ImageLoaderPipeline")
            .field("decoders", &names)
            .finish()
    }
}

impl ImageLoaderPipeline {
    /// The SVG decoder followed by the raster decoder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            decoders: vec![Box::new(SvgDecoder), Box::new(RasterDecoder)],
        }
    }

    /// Detect the image format and decode `bytes`.
    ///
    /// `resolved_url` is used both for the extension check (without query
    /// and fragment) and for data-URL MIME detection.
    ///
    /// # Errors
    ///
    /// Returns an [`ImageError`] if no decoder supports the detected format
    /// or if decoding fails.
    pub fn decode(&self, bytes: &[u8], resolved_url: &str) -> Result<ImageSurface, ImageError> {
        let format = detect_format(strip_url_decorations(resolved_url), resolved_url, bytes);

        self.decoders
            .iter()
            .find(|decoder| decoder.supports(format))
            .ok_or(ImageError::NoDecoder(format))?
            .decode(bytes)
    }

    /// Fetch and decode the image at `resolved_url`.
    ///
    /// # Errors
    ///
    /// Returns an [`ImageError`] if the bytes cannot be fetched or decoded.
    pub fn load(&self, resolved_url: &str) -> Result<ImageSurface, ImageError> {
        // Servers see the query; local files never do.
        let target = if is_http(resolved_url) {
            resolved_url
        } else {
            strip_url_decorations(resolved_url)
        };
        let bytes = fetch_bytes(target)?;
        self.decode(&bytes, resolved_url)
    }
}

impl Default for ImageLoaderPipeline {
    fn default() -> Self {
        Self::new()
    }
}
