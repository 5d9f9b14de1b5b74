//! Texture sampling contract and a mipmapped reference texture.
//!
//! The rasterizer never reads texels itself. For every covered sample it
//! builds a [`SampleParams`] holding the interpolated UV and the UVs one
//! sample step to the right and one step down, then asks a [`Texture`] for a
//! color. The texture owns level selection and filtering.
//!
//! # References
//!
//! - Williams, L. (1983). "Pyramidal Parametrics." SIGGRAPH '83.

mod mipmap;

pub use mipmap::{MipLevel, MipmappedTexture};

use crate::color::Color;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// How texels are filtered within one mip level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelSampleMethod {
    /// Nearest texel.
    #[default]
    Nearest,
    /// Weighted average of the four surrounding texels.
    Bilinear,
}

/// How the mip level is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelSampleMethod {
    /// Always sample the full-resolution level.
    #[default]
    Zero,
    /// Round the estimated level to the nearest integer.
    Nearest,
    /// Blend the two neighbouring levels (trilinear when combined with
    /// [`PixelSampleMethod::Bilinear`]).
    Linear,
}

/// A single texture lookup request.
///
/// All three UVs are already clamped into `[0, 1)` by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleParams {
    /// UV at the sample center.
    pub p_uv: Point,
    /// UV one sample step to the right.
    pub p_dx_uv: Point,
    /// UV one sample step down.
    pub p_dy_uv: Point,
    /// Active pixel sampling method.
    pub psm: PixelSampleMethod,
    /// Active level sampling method.
    pub lsm: LevelSampleMethod,
}

impl SampleParams {
    /// UV change per step in x.
    #[must_use]
    pub fn du_dx(&self) -> Point {
        self.p_dx_uv - self.p_uv
    }

    /// UV change per step in y.
    #[must_use]
    pub fn du_dy(&self) -> Point {
        self.p_dy_uv - self.p_uv
    }
}

/// A texture the rasterizer can sample.
pub trait Texture {
    /// Return the filtered color for one sample request.
    fn sample(&self, params: SampleParams) -> Color;
}

impl<T: Texture + ?Sized> Texture for &T {
    fn sample(&self, params: SampleParams) -> Color {
        (**self).sample(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flat(Color);

    impl Texture for Flat {
        fn sample(&self, _params: SampleParams) -> Color {
            self.0
        }
    }

    #[test]
    fn test_derivatives() {
        let params = SampleParams {
            p_uv: Point::new(0.25, 0.5),
            p_dx_uv: Point::new(0.5, 0.5),
            p_dy_uv: Point::new(0.25, 0.75),
            ..SampleParams::default()
        };
        assert_eq!(params.du_dx(), Point::new(0.25, 0.0));
        assert_eq!(params.du_dy(), Point::new(0.0, 0.25));
    }

    #[test]
    fn test_texture_through_reference() {
        let tex = Flat(Color::RED);
        let by_ref: &dyn Texture = &tex;
        assert_eq!(by_ref.sample(SampleParams::default()), Color::RED);
        assert_eq!((&tex).sample(SampleParams::default()), Color::RED);
    }

    #[test]
    fn test_default_modes() {
        assert_eq!(PixelSampleMethod::default(), PixelSampleMethod::Nearest);
        assert_eq!(LevelSampleMethod::default(), LevelSampleMethod::Zero);
    }
}
