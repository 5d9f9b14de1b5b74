//! Supersample storage.
//!
//! A [`SampleBuffer`] is a row-major grid of `width*scale` by `height*scale`
//! colors. Pixel `(x, y)` owns the `scale x scale` block whose top-left cell
//! is `(x*scale, y*scale)`.

use crate::color::Color;
use crate::error::{Error, Result};

/// Validated samples-per-pixel count.
///
/// Only positive perfect squares are accepted so every pixel maps onto a
/// square block of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleRate {
    rate: u32,
    scale: u32,
}

impl SampleRate {
    /// One sample per pixel (no supersampling).
    pub const ONE: Self = Self { rate: 1, scale: 1 };

    /// Validate a samples-per-pixel count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSampleRate`] if `rate` is zero or not a
    /// perfect square.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_raster::render::SampleRate;
    ///
    /// assert_eq!(SampleRate::new(16).unwrap().scale(), 4);
    /// assert!(SampleRate::new(8).is_err());
    /// ```
    pub fn new(rate: u32) -> Result<Self> {
        let scale = f64::from(rate).sqrt().round() as u32;
        if rate == 0 || u64::from(scale) * u64::from(scale) != u64::from(rate) {
            return Err(Error::InvalidSampleRate { rate });
        }
        Ok(Self { rate, scale })
    }

    /// Samples per pixel.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.rate
    }

    /// Samples per pixel along one axis.
    #[must_use]
    pub const fn scale(self) -> usize {
        self.scale as usize
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = Error;

    fn try_from(rate: u32) -> Result<Self> {
        Self::new(rate)
    }
}

/// Supersampled color grid, reset to white on allocation and clear.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    width: usize,
    height: usize,
    scale: usize,
    samples: Vec<Color>,
}

impl SampleBuffer {
    /// Background color every cell is reset to.
    pub const BACKGROUND: Color = Color::WHITE;

    /// Allocate a fresh buffer for a `width` x `height` canvas.
    #[must_use]
    pub fn allocated(width: usize, height: usize, rate: SampleRate) -> Self {
        let samples = vec![Self::BACKGROUND; width * height * rate.get() as usize];
        Self {
            width,
            height,
            scale: rate.scale(),
            samples,
        }
    }

    /// Canvas width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Samples per pixel along one axis.
    #[must_use]
    pub const fn scale(&self) -> usize {
        self.scale
    }

    /// Width of the grid in cells.
    #[must_use]
    pub const fn super_width(&self) -> usize {
        self.width * self.scale
    }

    /// Height of the grid in cells.
    #[must_use]
    pub const fn super_height(&self) -> usize {
        self.height * self.scale
    }

    /// Total number of cells (`width * height * sample_rate`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the canvas has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn samples(&self) -> &[Color] {
        &self.samples
    }

    /// Reset every cell to [`Self::BACKGROUND`] without reallocating.
    pub fn reset(&mut self) {
        self.samples.fill(Self::BACKGROUND);
    }

    /// Color of cell `(sx, sy)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, sx: usize, sy: usize) -> Option<Color> {
        if sx >= self.super_width() || sy >= self.super_height() {
            return None;
        }
        Some(self.samples[self.index(sx, sy)])
    }

    /// Write cell `(sx, sy)`. Writes outside the grid are ignored.
    pub fn set(&mut self, sx: usize, sy: usize, color: Color) {
        if sx >= self.super_width() || sy >= self.super_height() {
            return;
        }
        let idx = self.index(sx, sy);
        self.samples[idx] = color;
    }

    /// Write `color` into every cell of pixel `(x, y)`.
    ///
    /// Returns false, logging a warning, if the pixel lies outside the
    /// canvas.
    pub fn fill_pixel(&mut self, x: usize, y: usize, color: Color) -> bool {
        if x >= self.width || y >= self.height {
            log::warn!(
                "fill_pixel: ({x}, {y}) outside {}x{} canvas, write dropped",
                self.width,
                self.height
            );
            return false;
        }

        let (ox, oy) = (x * self.scale, y * self.scale);
        let row_len = self.super_width();
        for sy in oy..oy + self.scale {
            let start = sy * row_len + ox;
            self.samples[start..start + self.scale].fill(color);
        }
        true
    }

    /// Channel-wise sum over the cells of pixel `(x, y)`, or `None` outside
    /// the canvas.
    #[must_use]
    pub fn pixel_sum(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let (ox, oy) = (x * self.scale, y * self.scale);
        let row_len = self.super_width();
        let mut sum = Color::BLACK;
        for sy in oy..oy + self.scale {
            let start = sy * row_len + ox;
            for &sample in &self.samples[start..start + self.scale] {
                sum += sample;
            }
        }
        Some(sum)
    }

    /// Box-filtered color of pixel `(x, y)`, or `None` outside the canvas.
    #[must_use]
    pub fn pixel_average(&self, x: usize, y: usize) -> Option<Color> {
        let sum = self.pixel_sum(x, y)?;
        Some(sum * (1.0 / (self.scale * self.scale) as f32))
    }

    #[inline]
    fn index(&self, sx: usize, sy: usize) -> usize {
        sy * self.super_width() + sx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_rate_accepts_perfect_squares() {
        for (rate, scale) in [(1, 1), (4, 2), (9, 3), (16, 4), (64, 8)] {
            let sr = SampleRate::new(rate).unwrap();
            assert_eq!(sr.get(), rate);
            assert_eq!(sr.scale(), scale);
        }
    }

    #[test]
    fn test_sample_rate_rejects_non_squares() {
        for rate in [0, 2, 3, 5, 8, 15, 17] {
            assert!(
                matches!(SampleRate::new(rate), Err(Error::InvalidSampleRate { rate: r }) if r == rate),
                "rate {rate} should be rejected"
            );
        }
        assert!(SampleRate::try_from(u32::MAX).is_err());
    }

    #[test]
    fn test_allocated_size_invariant() {
        let buf = SampleBuffer::allocated(7, 5, SampleRate::new(9).unwrap());
        assert_eq!(buf.len(), 7 * 5 * 9);
        assert_eq!(buf.super_width(), 21);
        assert_eq!(buf.super_height(), 15);
        assert!(buf.samples().iter().all(|&c| c == Color::WHITE));
    }

    #[test]
    fn test_fill_pixel_covers_whole_block() {
        let mut buf = SampleBuffer::allocated(3, 3, SampleRate::new(4).unwrap());
        assert!(buf.fill_pixel(1, 2, Color::RED));

        for sy in 0..6 {
            for sx in 0..6 {
                let inside = (2..4).contains(&sx) && (4..6).contains(&sy);
                let expected = if inside { Color::RED } else { Color::WHITE };
                assert_eq!(buf.get(sx, sy), Some(expected), "cell ({sx}, {sy})");
            }
        }
    }

    #[test_log::test]
    fn test_fill_pixel_out_of_bounds_is_dropped() {
        let mut buf = SampleBuffer::allocated(2, 2, SampleRate::ONE);
        assert!(!buf.fill_pixel(2, 0, Color::RED));
        assert!(!buf.fill_pixel(0, 5, Color::RED));
        assert!(buf.samples().iter().all(|&c| c == Color::WHITE));
    }

    #[test]
    fn test_set_and_get_ignore_out_of_grid() {
        let mut buf = SampleBuffer::allocated(2, 2, SampleRate::new(4).unwrap());
        buf.set(3, 3, Color::BLUE);
        buf.set(4, 0, Color::RED);
        assert_eq!(buf.get(3, 3), Some(Color::BLUE));
        assert_eq!(buf.get(4, 0), None);
    }

    #[test]
    fn test_pixel_average_box_filter() {
        let mut buf = SampleBuffer::allocated(1, 1, SampleRate::new(4).unwrap());
        buf.set(0, 0, Color::BLACK);
        buf.set(1, 1, Color::BLACK);
        let avg = buf.pixel_average(0, 0).unwrap();
        assert_relative_eq!(avg.r, 0.5);
        assert_relative_eq!(avg.g, 0.5);
        assert_relative_eq!(avg.b, 0.5);
    }

    #[test]
    fn test_pixel_sum_outside_canvas_is_none() {
        let mut buf = SampleBuffer::allocated(3, 2, SampleRate::new(4).unwrap());
        buf.fill_pixel(2, 1, Color::RED);

        let sum = buf.pixel_sum(2, 1).unwrap();
        assert_relative_eq!(sum.r, 4.0);
        assert_relative_eq!(sum.g, 0.0);

        assert_eq!(buf.pixel_sum(3, 0), None);
        assert_eq!(buf.pixel_sum(0, 2), None);
        assert_eq!(buf.pixel_average(usize::MAX, 0), None);
    }

    #[test]
    fn test_reset_restores_background() {
        let mut buf = SampleBuffer::allocated(2, 2, SampleRate::ONE);
        buf.fill_pixel(0, 0, Color::RED);
        buf.reset();
        assert_eq!(buf.len(), 4);
        assert!(buf.samples().iter().all(|&c| c == SampleBuffer::BACKGROUND));
    }
}
