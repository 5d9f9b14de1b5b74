//! Error types for trueno-raster operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-raster operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// PNG decoding error.
    #[error("PNG decoding error: {0}")]
    PngDecoding(#[from] png::DecodingError),

    /// Invalid dimensions for a canvas, framebuffer, or texture.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: usize,
        /// Height value.
        height: usize,
    },

    /// Sample rate is zero or not a perfect square.
    #[error("Invalid sample configuration: sample rate {rate} is not a positive perfect square")]
    InvalidSampleRate {
        /// Rejected samples-per-pixel value.
        rate: u32,
    },

    /// Framebuffer byte slice does not hold `3 * width * height` bytes.
    #[error("Framebuffer size mismatch: expected {expected} bytes, got {actual}")]
    FramebufferSize {
        /// Required length in bytes.
        expected: usize,
        /// Length of the slice provided.
        actual: usize,
    },

    /// Texel count does not match the texture dimensions.
    #[error("Texture size mismatch: expected {expected} texels, got {actual}")]
    TextureSize {
        /// Required texel count.
        expected: usize,
        /// Texel count provided.
        actual: usize,
    },

    /// Image pixel layout the texture loader cannot handle.
    #[error("Unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    /// `resolve_to_framebuffer` was called with no target bound.
    #[error("No framebuffer target bound")]
    MissingFramebufferTarget,

    /// Configuration file could not be parsed.
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// Line number (1-based, 0 if unknown).
        line: usize,
        /// Parser message.
        message: String,
    },
}
