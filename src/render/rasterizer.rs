//! Supersampling rasterizer.
//!
//! Draw calls write into a [`SampleBuffer`] at `sample_rate` samples per
//! pixel. [`Rasterizer::resolve_to_framebuffer`] box-filters those samples
//! into the borrowed RGB target; it is the only place antialiasing becomes
//! visible, so call it once after all draws for a frame.
//!
//! Triangles get true coverage antialiasing (each sample is tested on its
//! own). Points and lines flat-fill every sample of the pixels they touch.

use super::primitives::LineSteps;
use super::sample_buffer::{SampleBuffer, SampleRate};
use super::triangle::{cell_center, TriangleSetup};
use crate::color::Color;
use crate::config::RasterizerConfig;
use crate::error::{Error, Result};
use crate::framebuffer::{FramebufferView, BYTES_PER_PIXEL};
use crate::geometry::{Point, Triangle};
use crate::texture::{LevelSampleMethod, PixelSampleMethod, SampleParams, Texture};
use trueno::Vector;

/// Largest `f32` strictly below 1.0; upper clamp for texture coordinates.
const UV_MAX: f32 = 1.0 - f32::EPSILON / 2.0;

/// Clamp one texture coordinate into `[0, 1)`. NaN is passed through.
#[inline]
fn clamp_unit(t: f32) -> f32 {
    if t < 0.0 {
        0.0
    } else if t >= 1.0 {
        UV_MAX
    } else {
        t
    }
}

#[inline]
fn clamp_uv(uv: Point) -> Point {
    Point::new(clamp_unit(uv.x), clamp_unit(uv.y))
}

/// Software rasterizer bound to at most one borrowed framebuffer.
///
/// # Example
///
/// ```
/// use trueno_raster::prelude::*;
///
/// let mut pixels = vec![0u8; 3 * 4 * 4];
/// let mut raster = Rasterizer::new(
///     PixelSampleMethod::Nearest,
///     LevelSampleMethod::Zero,
///     4,
///     4,
///     4,
/// )
/// .unwrap();
/// raster.set_framebuffer_target(FramebufferView::new(&mut pixels, 4, 4).unwrap());
/// raster.rasterize_triangle(
///     Point::new(0.0, 0.0),
///     Point::new(4.0, 0.0),
///     Point::new(0.0, 4.0),
///     Color::BLACK,
/// );
/// raster.resolve_to_framebuffer().unwrap();
/// drop(raster);
/// assert_eq!(&pixels[0..3], &[0, 0, 0]);
/// ```
#[derive(Debug)]
pub struct Rasterizer<'fb> {
    psm: PixelSampleMethod,
    lsm: LevelSampleMethod,
    width: usize,
    height: usize,
    sample_rate: SampleRate,
    sample_buffer: SampleBuffer,
    target: Option<FramebufferView<'fb>>,
}

impl<'fb> Rasterizer<'fb> {
    /// Create a rasterizer for a `width` x `height` canvas with no
    /// framebuffer bound yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or `sample_rate` is not a
    /// positive perfect square.
    pub fn new(
        psm: PixelSampleMethod,
        lsm: LevelSampleMethod,
        width: usize,
        height: usize,
        sample_rate: u32,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let sample_rate = SampleRate::new(sample_rate)?;

        Ok(Self {
            psm,
            lsm,
            width,
            height,
            sample_rate,
            sample_buffer: SampleBuffer::allocated(width, height, sample_rate),
            target: None,
        })
    }

    /// Create a rasterizer from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Rasterizer::new`].
    pub fn from_config(config: &RasterizerConfig) -> Result<Self> {
        Self::new(
            config.pixel_sampling,
            config.level_sampling,
            config.width,
            config.height,
            config.sample_rate,
        )
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

    /// Current samples per pixel.
    #[must_use]
    pub const fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Active pixel sampling method for textured triangles.
    #[must_use]
    pub const fn pixel_sample_method(&self) -> PixelSampleMethod {
        self.psm
    }

    /// Active level sampling method for textured triangles.
    #[must_use]
    pub const fn level_sample_method(&self) -> LevelSampleMethod {
        self.lsm
    }

    /// Switch pixel sampling for subsequent textured draws.
    pub fn set_pixel_sample_method(&mut self, psm: PixelSampleMethod) {
        self.psm = psm;
    }

    /// Switch level sampling for subsequent textured draws.
    pub fn set_level_sample_method(&mut self, lsm: LevelSampleMethod) {
        self.lsm = lsm;
    }

    /// The supersample buffer.
    #[must_use]
    pub const fn sample_buffer(&self) -> &SampleBuffer {
        &self.sample_buffer
    }

    /// The bound framebuffer, if any.
    #[must_use]
    pub fn framebuffer(&self) -> Option<&FramebufferView<'fb>> {
        self.target.as_ref()
    }

    /// Unbind and return the framebuffer view.
    pub fn take_framebuffer_target(&mut self) -> Option<FramebufferView<'fb>> {
        self.target.take()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Change the sample rate. Reallocates and resets the sample buffer and
    /// clears the bound framebuffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSampleRate`] and leaves the rasterizer
    /// untouched if `rate` is not a positive perfect square.
    pub fn set_sample_rate(&mut self, rate: u32) -> Result<()> {
        let sample_rate = SampleRate::new(rate)?;
        log::debug!(
            "sample rate {} -> {} ({}x{} canvas)",
            self.sample_rate.get(),
            rate,
            self.width,
            self.height
        );

        self.sample_rate = sample_rate;
        self.sample_buffer = SampleBuffer::allocated(self.width, self.height, sample_rate);
        if let Some(target) = self.target.as_mut() {
            target.fill(u8::MAX);
        }
        Ok(())
    }

    /// Bind a new framebuffer. The canvas takes the view's dimensions and
    /// the sample buffer is reallocated and reset. The previous view, if
    /// any, is released untouched.
    pub fn set_framebuffer_target(&mut self, target: FramebufferView<'fb>) {
        log::debug!(
            "framebuffer target {}x{} -> {}x{}",
            self.width,
            self.height,
            target.width(),
            target.height()
        );

        self.width = target.width();
        self.height = target.height();
        self.sample_buffer = SampleBuffer::allocated(self.width, self.height, self.sample_rate);
        self.target = Some(target);
    }

    /// Reset the framebuffer to white (255 per channel) and the sample
    /// buffer to the background color, without reallocating.
    pub fn clear_buffers(&mut self) {
        if let Some(target) = self.target.as_mut() {
            target.fill(u8::MAX);
        }
        self.sample_buffer.reset();
    }

    /// Box-filter the sample buffer into the bound framebuffer.
    ///
    /// Each output channel is `round(sum(samples) * 255 / sample_rate)`.
    /// Rows are scaled with trueno's SIMD vectors; if the vector kernel
    /// reports an error the row falls back to scalar code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFramebufferTarget`] if nothing is bound.
    pub fn resolve_to_framebuffer(&mut self) -> Result<()> {
        let target = self.target.as_mut().ok_or(Error::MissingFramebufferTarget)?;
        let factor = 255.0 / self.sample_rate.get() as f32;
        let row_len = self.width * BYTES_PER_PIXEL;
        let factors = Vector::from_vec(vec![factor; row_len]);
        let mut sums = Vec::with_capacity(row_len);

        for y in 0..self.height {
            sums.clear();
            for x in 0..self.width {
                let sum = self.sample_buffer.pixel_sum(x, y).unwrap_or_default();
                sums.extend_from_slice(&[sum.r, sum.g, sum.b]);
            }

            let Some(row) = target.row_mut(y) else {
                continue;
            };

            match Vector::from_slice(&sums).mul(&factors) {
                Ok(scaled) => write_channels(row, scaled.as_slice()),
                Err(_) => {
                    let scaled: Vec<f32> = sums.iter().map(|s| s * factor).collect();
                    write_channels(row, &scaled);
                }
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Points and lines
    // ------------------------------------------------------------------

    /// Flat-fill every sample of pixel `(x, y)`.
    ///
    /// Out-of-canvas pixels are logged and dropped.
    pub fn fill_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.sample_buffer.fill_pixel(x, y, color);
    }

    /// Fill the pixel containing the continuous point `(x, y)`.
    ///
    /// Points outside the canvas or with non-finite coordinates are ignored.
    pub fn rasterize_point(&mut self, x: f32, y: f32, color: Color) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let (sx, sy) = (x.floor(), y.floor());
        if sx < 0.0 || sy < 0.0 || sx >= self.width as f32 || sy >= self.height as f32 {
            return;
        }
        self.fill_pixel(sx as usize, sy as usize, color);
    }

    /// Rasterize a line segment with a DDA stepper.
    ///
    /// The segment is first clipped to the canvas grown by one pixel on
    /// every side, so far off-screen endpoints cost nothing.
    pub fn rasterize_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        let min = Point::new(-1.0, -1.0);
        let max = Point::new(self.width as f32 + 1.0, self.height as f32 + 1.0);
        let Some(steps) = LineSteps::clipped(Point::new(x0, y0), Point::new(x1, y1), min, max)
        else {
            log::trace!("line ({x0}, {y0}) -> ({x1}, {y1}) is non-finite or off canvas");
            return;
        };
        for p in steps {
            self.rasterize_point(p.x, p.y, color);
        }
    }

    // ------------------------------------------------------------------
    // Triangles
    // ------------------------------------------------------------------

    fn setup(&self, v0: Point, v1: Point, v2: Point) -> TriangleSetup {
        TriangleSetup::new(&Triangle::new(v0, v1, v2), self.sample_rate.scale() as f32)
    }

    /// Rasterize a flat-colored triangle at sample resolution.
    ///
    /// Either winding order is accepted.
    pub fn rasterize_triangle(&mut self, v0: Point, v1: Point, v2: Point, color: Color) {
        let setup = self.setup(v0, v1, v2);
        let buf = &mut self.sample_buffer;
        let Some(bounds) = setup.sample_bounds(buf.super_width(), buf.super_height()) else {
            return;
        };

        for (sx, sy) in bounds.cells() {
            if setup.covers(cell_center(sx, sy)) {
                buf.set(sx, sy, color);
            }
        }
    }

    /// Rasterize a triangle with per-vertex colors blended by barycentric
    /// weights.
    pub fn rasterize_interpolated_color_triangle(
        &mut self,
        v0: Point,
        c0: Color,
        v1: Point,
        c1: Color,
        v2: Point,
        c2: Color,
    ) {
        let setup = self.setup(v0, v1, v2);
        let buf = &mut self.sample_buffer;
        let Some(bounds) = setup.sample_bounds(buf.super_width(), buf.super_height()) else {
            return;
        };

        for (sx, sy) in bounds.cells() {
            let p = cell_center(sx, sy);
            if !setup.covers(p) {
                continue;
            }
            let Some([w0, w1, w2]) = setup.barycentric(p) else {
                log::trace!("degenerate color triangle, skipping cell ({sx}, {sy})");
                continue;
            };
            buf.set(sx, sy, c0 * w0 + c1 * w1 + c2 * w2);
        }
    }

    /// Rasterize a texture-mapped triangle.
    ///
    /// UVs are interpolated at each sample center and one sample step to the
    /// right and below; the offsets give the texture its screen-space
    /// derivatives. All UVs reaching `texture` lie in `[0, 1)`.
    pub fn rasterize_textured_triangle<T: Texture + ?Sized>(
        &mut self,
        v0: Point,
        uv0: Point,
        v1: Point,
        uv1: Point,
        v2: Point,
        uv2: Point,
        texture: &T,
    ) {
        let setup = self.setup(v0, v1, v2);
        let uvs = [uv0, uv1, uv2];
        let mut params = SampleParams {
            psm: self.psm,
            lsm: self.lsm,
            ..SampleParams::default()
        };
        let buf = &mut self.sample_buffer;
        let Some(bounds) = setup.sample_bounds(buf.super_width(), buf.super_height()) else {
            return;
        };

        for (sx, sy) in bounds.cells() {
            let p = cell_center(sx, sy);
            if !setup.covers(p) {
                continue;
            }
            let Some(uv) = setup.interpolate(p, uvs) else {
                log::trace!("NaN texture coordinate, skipping cell ({sx}, {sy})");
                continue;
            };
            let uv = clamp_uv(uv);

            // Offsets off the triangle or with NaN UVs give a zero derivative.
            let offset_uv = |q: Point| {
                if setup.covers(q) {
                    setup.interpolate(q, uvs).map_or(uv, clamp_uv)
                } else {
                    uv
                }
            };

            params.p_uv = uv;
            params.p_dx_uv = offset_uv(p + Point::new(1.0, 0.0));
            params.p_dy_uv = offset_uv(p + Point::new(0.0, 1.0));
            buf.set(sx, sy, texture.sample(params));
        }
    }
}

/// Round, saturate, and store scaled channel values into an RGB row.
fn write_channels(row: &mut [u8], scaled: &[f32]) {
    for (dst, &value) in row.iter_mut().zip(scaled) {
        *dst = value.round().clamp(0.0, 255.0) as u8;
    }
}
