//! Pure Rust image processing backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `ImageReader::into_dimensions` (header only, format sniffed) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → PNG | `PngEncoder::new_with_quality` (deflate level from [`Compression`]) |
//! | Encode → JPEG | `JpegEncoder::new_with_quality` |
//! | Encode → WebP | `WebPEncoder::new_lossless` |
//! | Encode → TIFF | `TiffEncoder` |
//! | Encode → AVIF | `AvifEncoder::new_with_speed_quality` (rav1e) |
//!
//! Encoding happens into memory and the output file is only created once the
//! encoder has succeeded, so a failed decode or encode never leaves a file
//! behind. The decoded image lives on the stack of [`ImageBackend::resize`]
//! and is dropped on every return path.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Compression, EncodeSettings, OutputFormat, ResizeParams};
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{self, PngEncoder};
use image::codecs::tiff::TiffEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(|e| decode_error(path, e))?
        .with_guessed_format()
        .map_err(|e| decode_error(path, e))?
        .decode()
        .map_err(|e| decode_error(path, e))
}

fn avif_speed(compression: Compression) -> u8 {
    match compression {
        Compression::Fast => 10,
        Compression::Default => 6,
        Compression::Best => 2,
    }
}

fn png_compression(compression: Compression) -> png::CompressionType {
    match compression {
        Compression::Fast => png::CompressionType::Fast,
        Compression::Default => png::CompressionType::Default,
        Compression::Best => png::CompressionType::Best,
    }
}

/// Encode an image in memory according to `settings`.
fn encode_image(img: &DynamicImage, settings: &EncodeSettings) -> Result<Vec<u8>, BackendError> {
    let mut buffer = Cursor::new(Vec::new());
    let quality = settings.quality.value() as u8;

    let result = match settings.format {
        OutputFormat::Png => img.write_with_encoder(PngEncoder::new_with_quality(
            &mut buffer,
            png_compression(settings.compression),
            png::FilterType::Adaptive,
        )),
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, quality))
        }
        OutputFormat::Webp => {
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            rgba.write_with_encoder(WebPEncoder::new_lossless(&mut buffer))
        }
        OutputFormat::Tiff => img.write_with_encoder(TiffEncoder::new(&mut buffer)),
        OutputFormat::Avif => {
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            rgba.write_with_encoder(AvifEncoder::new_with_speed_quality(
                &mut buffer,
                avif_speed(settings.compression),
                quality,
            ))
        }
    };

    result.map_err(|e| {
        BackendError::Unsupported(format!("{} encode failed: {}", settings.format, e))
    })?;
    Ok(buffer.into_inner())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        ImageReader::open(path)
            .map_err(|e| decode_error(path, e))?
            .with_guessed_format()
            .map_err(|e| decode_error(path, e))?
            .into_dimensions()
            .map(Dimensions::from)
            .map_err(|e| decode_error(path, e))
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        drop(img);

        let bytes = encode_image(&resized, &params.encoding)?;
        std::fs::write(&params.output, bytes).map_err(|source| BackendError::Write {
            path: params.output.clone(),
            source,
        })
    }
}
