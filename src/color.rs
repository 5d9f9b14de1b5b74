//! Color types for rasterization.
//!
//! [`Color`] is the floating-point working color held in the supersample
//! buffer and returned by textures. [`Rgba`] is the 8-bit storage format used
//! for texels and framebuffer readback.

use std::ops::{Add, AddAssign, Mul, MulAssign};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Floating-point RGB color, each channel nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White, the background every sample buffer is reset to.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a new color.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other + self * -1.0) * t
    }

    /// Convert a single channel to a byte, rounding and saturating.
    ///
    /// NaN maps to 0.
    #[inline]
    #[must_use]
    pub fn channel_to_u8(value: f32) -> u8 {
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    }

    /// Convert to 8-bit `[r, g, b]`.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            Self::channel_to_u8(self.r),
            Self::channel_to_u8(self.g),
            Self::channel_to_u8(self.b),
        ]
    }

    /// Returns true if every channel is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

impl From<Rgba> for Color {
    /// Alpha is dropped; the rasterizer does not composite.
    fn from(c: Rgba) -> Self {
        Self::new(
            f32::from(c.r) / 255.0,
            f32::from(c.g) / 255.0,
            f32::from(c.b) / 255.0,
        )
    }
}

impl From<Color> for Rgba {
    fn from(c: Color) -> Self {
        let [r, g, b] = c.to_rgb8();
        Self::rgb(r, g, b)
    }
}

impl Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Mul<f32> for Color {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl MulAssign<f32> for Color {
    fn mul_assign(&mut self, rhs: f32) {
        self.r *= rhs;
        self.g *= rhs;
        self.b *= rhs;
    }
}
