//! End-to-end resizes through the public [`Converter`] API with the real
//! `image`-crate backend.

use image::{ImageFormat, RgbImage};
use photofx::config::{self, PhotofxConfig};
use photofx::convert::{ConvertError, Converter, ResizeOptions};
use photofx::imaging::{BackendError, Compression, Dimensions, OutputFormat};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_png(path: &Path, width: u32, height: u32) {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 90])
    })
    .save(path)
    .unwrap();
}

fn converter(root: &Path) -> Converter {
    Converter::new(PhotofxConfig::default(), root)
}

#[test]
fn width_only_derives_proportional_height() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("source.png");
    let output = tmp.path().join("small.png");
    write_png(&input, 400, 300);

    let written = converter(tmp.path()).resize(&input, &output, 200, 0).unwrap();

    assert_eq!(written, Dimensions { width: 200, height: 150 });
    assert_eq!(image::image_dimensions(&output).unwrap(), (200, 150));
}

#[test]
fn input_format_comes_from_contents_not_extension() {
    let tmp = TempDir::new().unwrap();
    let png = tmp.path().join("source.png");
    write_png(&png, 400, 300);

    for name in ["upload", "x.jpg"] {
        let input = tmp.path().join(name);
        fs::copy(&png, &input).unwrap();
        let output = tmp.path().join(format!("{name}.out.png"));

        let written = converter(tmp.path())
            .resize(&input, &output, 200, 0)
            .unwrap_or_else(|e| panic!("{name}: {e}"));

        assert_eq!(written, Dimensions { width: 200, height: 150 });
        assert_eq!(image::image_dimensions(&output).unwrap(), (200, 150));
    }
}

#[test]
fn box_resize_fits_inside_and_keeps_aspect() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("portrait.png");
    let output = tmp.path().join("fit.png");
    write_png(&input, 300, 400);

    converter(tmp.path()).resize(&input, &output, 200, 200).unwrap();

    assert_eq!(image::image_dimensions(&output).unwrap(), (150, 200));
}

#[test]
fn unreadable_input_fails_without_output() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("never.png");

    let err = converter(tmp.path())
        .resize(tmp.path().join("missing.png"), &output, 200, 0)
        .unwrap_err();

    assert!(matches!(err, ConvertError::Imaging(BackendError::Decode { .. })));
    assert!(!output.exists());
}

#[test]
fn corrupt_input_fails_without_output() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("corrupt.png");
    let output = tmp.path().join("never.png");
    // Valid PNG signature, truncated body
    fs::write(&input, [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0]).unwrap();

    let err = converter(tmp.path()).resize(&input, &output, 100, 0).unwrap_err();

    assert!(matches!(err, ConvertError::Imaging(BackendError::Decode { .. })));
    assert!(!output.exists());
}

#[test]
fn zero_by_zero_is_invalid() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("source.png");
    write_png(&input, 40, 30);

    let err = converter(tmp.path())
        .resize(&input, tmp.path().join("o.png"), 0, 0)
        .unwrap_err();

    assert!(matches!(
        err,
        ConvertError::Imaging(BackendError::InvalidDimensions(_))
    ));
}

#[test]
fn oversized_target_is_rejected_without_output() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("source.png");
    let output = tmp.path().join("huge.png");
    write_png(&input, 40, 30);

    let err = converter(tmp.path())
        .resize(&input, &output, 100_000, 0)
        .unwrap_err();

    assert!(matches!(
        err,
        ConvertError::Imaging(BackendError::InvalidDimensions(_))
    ));
    assert!(!output.exists());
}

#[test]
fn per_call_format_overrides_config() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("source.png");
    let output = tmp.path().join("out.bin");
    write_png(&input, 80, 60);

    let options = ResizeOptions {
        format: Some(OutputFormat::Jpeg),
        quality: Some(50),
        ..ResizeOptions::default()
    };
    converter(tmp.path())
        .resize_with(&input, &output, 40, 0, &options)
        .unwrap();

    let bytes = fs::read(&output).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
}

#[test]
fn configured_format_is_used_by_default() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(config::CONFIG_FILE_NAME),
        "[output]\nformat = \"webp\"\ncompression = \"fast\"\n",
    )
    .unwrap();
    let loaded = config::load_config(tmp.path()).unwrap();
    assert_eq!(loaded.output.compression, Compression::Fast);

    let input = tmp.path().join("source.png");
    let output = tmp.path().join("out.img");
    write_png(&input, 64, 64);

    Converter::new(loaded, tmp.path())
        .resize(&input, &output, 32, 0)
        .unwrap();

    let bytes = fs::read(&output).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::WebP);
}

#[test]
fn source_is_left_untouched() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("source.png");
    write_png(&input, 50, 50);
    let before = fs::read(&input).unwrap();

    converter(tmp.path())
        .resize(&input, tmp.path().join("o.png"), 25, 0)
        .unwrap();

    assert_eq!(fs::read(&input).unwrap(), before);
}
