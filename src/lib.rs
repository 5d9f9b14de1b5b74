//! # Trueno-Raster
//!
//! Supersampling software rasterizer for points, lines, and flat, color
//! interpolated, or texture-mapped triangles.
//!
//! Built on the [trueno](https://crates.io/crates/trueno) core library for
//! SIMD resolve, trueno-raster draws into a supersample buffer and
//! box-filters it into a caller-owned RGB8 framebuffer.
//!
//! ## Features
//!
//! - **Pure Rust**: No GPU, windowing, or C dependencies
//! - **Supersampling**: Any perfect-square sample rate (1, 4, 9, 16, ...)
//! - **Texture Mapping**: Mipmapped textures with nearest/bilinear and
//!   zero/nearest/linear level sampling
//! - **PNG I/O**: Encode framebuffers, decode textures
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_raster::prelude::*;
//!
//! let mut pixels = vec![0u8; 3 * 32 * 32];
//! let mut raster = Rasterizer::new(
//!     PixelSampleMethod::Nearest,
//!     LevelSampleMethod::Zero,
//!     32,
//!     32,
//!     4,
//! )?;
//! raster.set_framebuffer_target(FramebufferView::new(&mut pixels, 32, 32)?);
//!
//! raster.rasterize_triangle(
//!     Point::new(4.0, 4.0),
//!     Point::new(28.0, 8.0),
//!     Point::new(12.0, 28.0),
//!     Color::RED,
//! );
//! raster.rasterize_line(0.0, 31.0, 31.0, 0.0, Color::BLACK);
//! raster.resolve_to_framebuffer()?;
//! # Ok::<(), trueno_raster::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable parallel processing in trueno's vector kernels
//!
//! ## Academic References
//!
//! - Pineda, J. (1988). "A Parallel Algorithm for Polygon Rasterization." SIGGRAPH '88.
//! - Williams, L. (1983). "Pyramidal Parametrics." SIGGRAPH '83.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and byte conversions.
pub mod color;

/// Borrowed RGB8 framebuffer view.
pub mod framebuffer;

/// Geometric primitives (points, lines, triangles).
pub mod geometry;

/// YAML configuration for rasterizer setup.
pub mod config;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Supersampling rasterization.
pub mod render;

/// Texture sampling and mipmaps.
pub mod texture;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-raster operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_raster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Color, Rgba};
    pub use crate::config::RasterizerConfig;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::FramebufferView;
    pub use crate::geometry::{Line, Point, Triangle};
    pub use crate::output::PngEncoder;
    pub use crate::render::{Drawable, Rasterizer, SampleBuffer, SampleRate};
    pub use crate::texture::{
        LevelSampleMethod, MipmappedTexture, PixelSampleMethod, SampleParams, Texture,
    };
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
