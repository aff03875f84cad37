//! Parameter types for resize operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides the target dimensions) and the [`backend`](super::backend)
//! (which does the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 85). Clamped on construction.
//! - [`OutputFormat`] — Encoded container written to disk.
//! - [`Compression`] — Effort/size trade-off for formats that expose one.
//! - [`EncodeSettings`] — Format + compression + quality, the process-wide defaults.
//! - [`ResizeRequest`] — What the caller asked for: paths plus requested width/height.
//! - [`ResizeParams`] — What the backend executes: exact output dimensions and encoding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamParseError {
    #[error("unknown output format '{0}' (expected png, jpeg, webp, tiff or avif)")]
    Format(String),
    #[error("unknown compression '{0}' (expected fast, default or best)")]
    Compression(String),
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
    /// Lossless only; the `image` crate has no lossy WebP encoder.
    Webp,
    Tiff,
    Avif,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Webp => "webp",
            Self::Tiff => "tiff",
            Self::Avif => "avif",
        }
    }

    /// Whether the encoder honours [`Quality`].
    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg | Self::Avif)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ParamParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::Webp),
            "tif" | "tiff" => Ok(Self::Tiff),
            "avif" => Ok(Self::Avif),
            _ => Err(ParamParseError::Format(s.to_string())),
        }
    }
}

/// Compression effort.
///
/// - PNG: deflate level (`fast` / `default` / `best`)
/// - AVIF: encoder speed (10 / 6 / 2)
/// - JPEG, WebP, TIFF: ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    Fast,
    #[default]
    Default,
    Best,
}

impl Compression {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Default => "default",
            Self::Best => "best",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compression {
    type Err = ParamParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "default" => Ok(Self::Default),
            "best" => Ok(Self::Best),
            _ => Err(ParamParseError::Compression(s.to_string())),
        }
    }
}

/// How the resized image gets encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeSettings {
    pub format: OutputFormat,
    pub compression: Compression,
    pub quality: Quality,
}

/// A caller's resize request. A zero `height` (or `width`) means "derive
/// proportionally from the other edge".
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeRequest {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Parameters for a resize the backend executes verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub encoding: EncodeSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_85() {
        assert_eq!(Quality::default().value(), 85);
    }

    #[test]
    fn format_parses_common_spellings() {
        assert_eq!("PNG".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert_eq!("jpg".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
        assert_eq!("tif".parse::<OutputFormat>(), Ok(OutputFormat::Tiff));
        assert_eq!(
            "gif".parse::<OutputFormat>(),
            Err(ParamParseError::Format("gif".into()))
        );
    }

    #[test]
    fn compression_parses_and_displays() {
        for c in [Compression::Fast, Compression::Default, Compression::Best] {
            assert_eq!(c.to_string().parse::<Compression>(), Ok(c));
        }
        assert!("zip".parse::<Compression>().is_err());
    }

    #[test]
    fn default_encoding_is_png_at_85() {
        let settings = EncodeSettings::default();
        assert_eq!(settings.format, OutputFormat::Png);
        assert_eq!(settings.compression, Compression::Default);
        assert_eq!(settings.quality.value(), 85);
    }

    #[test]
    fn only_jpeg_and_avif_are_lossy() {
        assert!(OutputFormat::Jpeg.is_lossy());
        assert!(OutputFormat::Avif.is_lossy());
        assert!(!OutputFormat::Png.is_lossy());
        assert!(!OutputFormat::Webp.is_lossy());
    }
}
