//! Decoded image surfaces.
//!
//! [§ 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
//!
//! Image *decoding* happens before layout runs; layout only ever sees the
//! finished surface, reads its intrinsic size and hands it to a paint target.

use thiserror::Error;

/// Error constructing an [`ImageSurface`] from raw pixel data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The pixel buffer does not hold `width * height` RGBA pixels.
    #[error("expected {expected} bytes of RGBA data for {width}x{height}, got {actual}")]
    BufferSize {
        /// Surface width in pixels.
        width: u32,
        /// Surface height in pixels.
        height: u32,
        /// Byte length implied by the dimensions.
        expected: usize,
        /// Byte length actually supplied.
        actual: usize,
    },
}

/// A decoded image: straight (non-premultiplied) RGBA8 pixels in row-major
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSurface {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
}

impl ImageSurface {
    /// Wrap decoded RGBA pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::BufferSize`] if `rgba_data` is not exactly
    /// `width * height * 4` bytes long.
    pub fn new(width: u32, height: u32, rgba_data: Vec<u8>) -> Result<Self, SurfaceError> {
        let expected = width as usize * height as usize * 4;
        if rgba_data.len() != expected {
            return Err(SurfaceError::BufferSize {
                width,
                height,
                expected,
                actual: rgba_data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba_data,
        })
    }

    /// A surface filled with a single color.
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let rgba_data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            rgba_data,
        }
    }

    /// Intrinsic width of the image in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Intrinsic height of the image in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The pixel at `(x, y)`, or `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba_data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Raw RGBA pixel data.
    #[must_use]
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }
}
