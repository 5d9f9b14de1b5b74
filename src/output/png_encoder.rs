//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate. Framebuffers are tightly
//! packed RGB8, so rows go to the encoder as-is.

use crate::error::{Error, Result};
use crate::framebuffer::FramebufferView;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for framebuffer output.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &FramebufferView<'_>, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        Self::encode(fb, BufWriter::new(file))?;
        log::debug!(
            "wrote {}x{} PNG to {}",
            fb.width(),
            fb.height(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(fb: &FramebufferView<'_>) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode(fb, &mut buffer)?;
        Ok(buffer)
    }

    fn encode<W: Write>(fb: &FramebufferView<'_>, sink: W) -> Result<()> {
        let (width, height) = dimensions(fb)?;
        let mut encoder = png::Encoder::new(sink, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(fb.pixels())?;
        writer.finish()?;
        Ok(())
    }
}

/// PNG stores dimensions as `u32`.
fn dimensions(fb: &FramebufferView<'_>) -> Result<(u32, u32)> {
    match (u32::try_from(fb.width()), u32::try_from(fb.height())) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(Error::InvalidDimensions {
            width: fb.width(),
            height: fb.height(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_png_to_bytes() {
        let mut pixels = vec![0u8; 3 * 10 * 10];
        let mut fb = FramebufferView::new(&mut pixels, 10, 10).unwrap();
        fb.set_pixel(3, 4, Color::RED);

        let bytes = PngEncoder::to_bytes(&fb).unwrap();
        // PNG magic bytes
        assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_png_decodes_as_rgb() {
        let mut pixels = vec![255u8; 3 * 4 * 2];
        let mut fb = FramebufferView::new(&mut pixels, 4, 2).unwrap();
        fb.set_pixel(1, 1, Color::BLUE);
        let bytes = PngEncoder::to_bytes(&fb).unwrap();

        let decoder = png::Decoder::new(bytes.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let mut out = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut out).unwrap();

        assert_eq!((info.width, info.height), (4, 2));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(&out[..info.buffer_size()], fb.pixels());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut pixels = vec![128u8; 3 * 2 * 2];
        let fb = FramebufferView::new(&mut pixels, 2, 2).unwrap();

        PngEncoder::write_to_file(&fb, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 8);
    }
}
