//! Rasterizer configuration.
//!
//! Supports YAML files. Every field is optional and falls back to its
//! default, so an empty document is a valid configuration.
//!
//! ```yaml
//! width: 960
//! height: 640
//! sample_rate: 4
//! pixel_sampling: bilinear
//! level_sampling: linear
//! ```

use crate::error::{Error, Result};
use crate::render::SampleRate;
use crate::texture::{LevelSampleMethod, PixelSampleMethod};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canvas size and sampling settings for a [`Rasterizer`](crate::render::Rasterizer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterizerConfig {
    /// Canvas width in pixels.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Canvas height in pixels.
    #[serde(default = "default_height")]
    pub height: usize,

    /// Samples per pixel; must be a positive perfect square.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Texel filtering within a mip level.
    #[serde(default)]
    pub pixel_sampling: PixelSampleMethod,

    /// Mip level selection.
    #[serde(default)]
    pub level_sampling: LevelSampleMethod,
}

fn default_width() -> usize {
    960
}
fn default_height() -> usize {
    640
}
fn default_sample_rate() -> u32 {
    1
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            sample_rate: default_sample_rate(),
            pixel_sampling: PixelSampleMethod::default(),
            level_sampling: LevelSampleMethod::default(),
        }
    }
}

impl RasterizerConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::debug!(
                    "using default rasterizer config, {} not loaded: {e}",
                    path.as_ref().display()
                );
                Self::default()
            }
        }
    }

    /// Checks the canvas size and sample rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero-sized canvas or
    /// [`Error::InvalidSampleRate`] for a rate that is not a positive
    /// perfect square.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        SampleRate::new(self.sample_rate).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = RasterizerConfig::new();

        assert_eq!((config.width, config.height), (960, 640));
        assert_eq!(config.sample_rate, 1);
        assert_eq!(config.pixel_sampling, PixelSampleMethod::Nearest);
        assert_eq!(config.level_sampling, LevelSampleMethod::Zero);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_minimal() {
        let config = RasterizerConfig::parse("sample_rate: 16").unwrap();

        assert_eq!(config.sample_rate, 16);
        assert_eq!(config.width, 960);
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = r"
width: 320
height: 200
sample_rate: 9
pixel_sampling: bilinear
level_sampling: linear
";

        let config = RasterizerConfig::parse(yaml).unwrap();

        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.sample_rate, 9);
        assert_eq!(config.pixel_sampling, PixelSampleMethod::Bilinear);
        assert_eq!(config.level_sampling, LevelSampleMethod::Linear);
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r"
width: 320
height: 200
pixel_sampling: trilinear
";

        let err = RasterizerConfig::parse(yaml).unwrap_err();
        match err {
            Error::ConfigParse { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_validate() {
        let mut config = RasterizerConfig::new();
        config.sample_rate = 8;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidSampleRate { rate: 8 })
        ));

        config.sample_rate = 4;
        config.height = 0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width: 64\nheight: 48\nsample_rate: 4").unwrap();

        let config = RasterizerConfig::load(file.path()).unwrap();
        assert_eq!((config.width, config.height, config.sample_rate), (64, 48, 4));
    }

    #[test_log::test]
    fn test_config_load_or_default() {
        let config = RasterizerConfig::load_or_default("/nonexistent/path");
        assert_eq!(config, RasterizerConfig::default());
    }

    #[test]
    fn test_config_roundtrips_through_yaml() {
        let config = RasterizerConfig {
            pixel_sampling: PixelSampleMethod::Bilinear,
            ..RasterizerConfig::default()
        };
        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        assert!(yaml.contains("pixel_sampling: bilinear"));
        assert_eq!(RasterizerConfig::parse(&yaml).unwrap(), config);
    }
}
