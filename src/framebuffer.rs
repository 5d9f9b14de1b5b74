//! Borrowed RGB framebuffer target.
//!
//! The host owns the pixel bytes (typically a window surface or a `Vec<u8>`)
//! and lends them to the rasterizer as a [`FramebufferView`]. The view never
//! copies or reallocates; it only checks that the slice is exactly
//! `3 * width * height` bytes so every later index is in range.

use crate::color::{Color, Rgba};
use crate::error::{Error, Result};

/// Bytes per pixel (R, G, B).
pub const BYTES_PER_PIXEL: usize = 3;

/// Non-owning, row-major RGB view over caller-owned bytes.
#[derive(Debug)]
pub struct FramebufferView<'a> {
    /// Width in pixels.
    width: usize,
    /// Height in pixels.
    height: usize,
    /// RGB pixels in row-major order, 3 bytes each, no padding.
    pixels: &'a mut [u8],
}

impl<'a> FramebufferView<'a> {
    /// Wrap `pixels` as a `width` x `height` RGB target.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero, or if `pixels` is not
    /// exactly `3 * width * height` bytes long.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_raster::framebuffer::FramebufferView;
    ///
    /// let mut bytes = vec![0u8; 3 * 4 * 2];
    /// let view = FramebufferView::new(&mut bytes, 4, 2).unwrap();
    /// assert_eq!(view.width(), 4);
    /// assert_eq!(view.height(), 2);
    /// ```
    pub fn new(pixels: &'a mut [u8], width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let expected = BYTES_PER_PIXEL * width * height;
        if pixels.len() != expected {
            return Err(Error::FramebufferSize {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Get the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Get the raw pixel data as a slice.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &*self.pixels
    }

    /// Get a row of pixels as a slice.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width * BYTES_PER_PIXEL;
        Some(&self.pixels[start..start + self.width * BYTES_PER_PIXEL])
    }

    /// Get a row of pixels as a mutable slice.
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width * BYTES_PER_PIXEL;
        Some(&mut self.pixels[start..start + self.width * BYTES_PER_PIXEL])
    }

    /// Fill every byte with `value`. `255` gives a white frame.
    pub fn fill(&mut self, value: u8) {
        self.pixels.fill(value);
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        Some(Rgba::rgb(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
        ))
    }

    /// Set the color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        let [r, g, b] = color.to_rgb8();
        self.pixels[idx] = r;
        self.pixels[idx + 1] = g;
        self.pixels[idx + 2] = b;
    }

    /// Calculate the byte index for a pixel coordinate.
    #[inline]
    fn pixel_index(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * BYTES_PER_PIXEL
    }
}
