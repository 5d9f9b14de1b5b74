//! Supersampling rasterization.
//!
//! Primitives are drawn into a [`SampleBuffer`] holding `sample_rate` color
//! samples per pixel, then box-filtered into an RGB framebuffer.
//!
//! # Algorithms
//!
//! - **Edge functions**: Triangle coverage tested per sample center
//! - **DDA**: Line stepping along the dominant axis
//! - **Box filter**: Uniform average of each pixel's samples on resolve
//!
//! # References
//!
//! - Pineda, J. (1988). "A Parallel Algorithm for Polygon Rasterization." SIGGRAPH '88.

mod primitives;
mod rasterizer;
mod sample_buffer;
mod triangle;

pub use primitives::Drawable;
pub use rasterizer::Rasterizer;
pub use sample_buffer::{SampleBuffer, SampleRate};
