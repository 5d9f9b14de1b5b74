//! Mipmapped texture with nearest, bilinear, and trilinear filtering.

use super::{LevelSampleMethod, PixelSampleMethod, SampleParams, Texture};
use crate::color::{Color, Rgba};
use crate::error::{Error, Result};
use crate::geometry::Point;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One level of a mip chain.
#[derive(Debug, Clone, PartialEq)]
pub struct MipLevel {
    width: usize,
    height: usize,
    texels: Vec<Color>,
}

impl MipLevel {
    /// Width in texels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in texels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Texel at `(x, y)`, clamped to the level edges.
    #[must_use]
    pub fn texel(&self, x: isize, y: isize) -> Color {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        self.texels[y * self.width + x]
    }

    /// 2x2 box-filtered half-resolution copy. Odd edges reuse the last
    /// row/column.
    fn downsample(&self) -> Self {
        let width = (self.width / 2).max(1);
        let height = (self.height / 2).max(1);
        let mut texels = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = (2 * x as isize, 2 * y as isize);
                let sum = self.texel(sx, sy)
                    + self.texel(sx + 1, sy)
                    + self.texel(sx, sy + 1)
                    + self.texel(sx + 1, sy + 1);
                texels.push(sum * 0.25);
            }
        }

        Self {
            width,
            height,
            texels,
        }
    }

    fn sample_nearest(&self, uv: Point) -> Color {
        let x = (uv.x * self.width as f32).floor() as isize;
        let y = (uv.y * self.height as f32).floor() as isize;
        self.texel(x, y)
    }

    fn sample_bilinear(&self, uv: Point) -> Color {
        // Texel centers sit at half-integer coordinates.
        let tx = uv.x * self.width as f32 - 0.5;
        let ty = uv.y * self.height as f32 - 0.5;
        let x0 = tx.floor();
        let y0 = ty.floor();
        let fx = tx - x0;
        let fy = ty - y0;
        let (x0, y0) = (x0 as isize, y0 as isize);

        let top = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), fx);
        let bottom = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), fx);
        top.lerp(bottom, fy)
    }

    fn sample(&self, uv: Point, psm: PixelSampleMethod) -> Color {
        match psm {
            PixelSampleMethod::Nearest => self.sample_nearest(uv),
            PixelSampleMethod::Bilinear => self.sample_bilinear(uv),
        }
    }
}

/// Texture holding a full mip chain down to 1x1.
#[derive(Debug, Clone, PartialEq)]
pub struct MipmappedTexture {
    levels: Vec<MipLevel>,
}

impl MipmappedTexture {
    /// Build a texture from row-major 8-bit texels.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or `texels` does not hold
    /// `width * height` entries.
    pub fn new(width: usize, height: usize, texels: Vec<Rgba>) -> Result<Self> {
        Self::from_colors(width, height, texels.into_iter().map(Color::from).collect())
    }

    /// Build a texture from row-major floating-point texels.
    ///
    /// # Errors
    ///
    /// Same conditions as [`MipmappedTexture::new`].
    pub fn from_colors(width: usize, height: usize, texels: Vec<Color>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if texels.len() != width * height {
            return Err(Error::TextureSize {
                expected: width * height,
                actual: texels.len(),
            });
        }

        let mut levels = vec![MipLevel {
            width,
            height,
            texels,
        }];
        while let Some(last) = levels.last() {
            if last.width == 1 && last.height == 1 {
                break;
            }
            let next = last.downsample();
            levels.push(next);
        }

        log::debug!(
            "built {}x{} texture with {} mip levels",
            width,
            height,
            levels.len()
        );
        Ok(Self { levels })
    }

    /// Decode a PNG image from memory.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or the pixel layout is unsupported.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode_png(bytes)
    }

    /// Decode a PNG image from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded.
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::decode_png(BufReader::new(file))
    }

    fn decode_png<R: Read>(reader: R) -> Result<Self> {
        let mut decoder = png::Decoder::new(reader);
        // Palette and low bit depths expand to 8-bit, 16-bit strips to 8-bit.
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;

        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        let data = &buf[..info.buffer_size()];

        let texels: Vec<Rgba> = match info.color_type {
            png::ColorType::Rgba => data
                .chunks_exact(4)
                .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
                .collect(),
            png::ColorType::Rgb => data
                .chunks_exact(3)
                .map(|p| Rgba::rgb(p[0], p[1], p[2]))
                .collect(),
            png::ColorType::GrayscaleAlpha => data
                .chunks_exact(2)
                .map(|p| Rgba::new(p[0], p[0], p[0], p[1]))
                .collect(),
            png::ColorType::Grayscale => data.iter().map(|&l| Rgba::rgb(l, l, l)).collect(),
            other => {
                return Err(Error::UnsupportedPixelFormat(format!("{other:?}")));
            }
        };

        Self::new(info.width as usize, info.height as usize, texels)
    }

    /// Number of mip levels, including the full-resolution level.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Borrow a mip level.
    #[must_use]
    pub fn level(&self, index: usize) -> Option<&MipLevel> {
        self.levels.get(index)
    }

    /// Continuous level of detail for a sample request.
    ///
    /// The UV differentials are scaled to level-0 texels; the larger of the
    /// two footprints picks the level, clamped to the available chain.
    #[must_use]
    pub fn level_of_detail(&self, params: &SampleParams) -> f32 {
        let base = &self.levels[0];
        let texel_scale = |d: Point| Point::new(d.x * base.width as f32, d.y * base.height as f32);
        let footprint = texel_scale(params.du_dx())
            .length()
            .max(texel_scale(params.du_dy()).length());

        if footprint.is_nan() || footprint <= 1.0 {
            return 0.0;
        }
        let max_level = (self.levels.len() - 1) as f32;
        footprint.log2().min(max_level)
    }

    fn sample_level(&self, level: usize, uv: Point, psm: PixelSampleMethod) -> Color {
        let level = level.min(self.levels.len() - 1);
        self.levels[level].sample(uv, psm)
    }
}

impl Texture for MipmappedTexture {
    fn sample(&self, params: SampleParams) -> Color {
        match params.lsm {
            LevelSampleMethod::Zero => self.sample_level(0, params.p_uv, params.psm),
            LevelSampleMethod::Nearest => {
                let level = self.level_of_detail(&params).round() as usize;
                self.sample_level(level, params.p_uv, params.psm)
            }
            LevelSampleMethod::Linear => {
                let level = self.level_of_detail(&params);
                let lower = level.floor();
                let t = level - lower;
                let near = self.sample_level(lower as usize, params.p_uv, params.psm);
                if t == 0.0 {
                    return near;
                }
                let far = self.sample_level(lower as usize + 1, params.p_uv, params.psm);
                near.lerp(far, t)
            }
        }
    }
}
