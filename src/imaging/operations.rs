//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take a request, compute exact parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{MAX_TARGET_EDGE, calculate_target_dimensions};
use super::params::{EncodeSettings, ResizeParams, ResizeRequest};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Resize `request.source` into `request.output`.
///
/// The source is identified first so that a missing or unreadable input fails
/// with [`BackendError::Decode`] before anything is written. Returns the
/// dimensions of the written image.
pub fn resize_image(
    backend: &impl ImageBackend,
    request: &ResizeRequest,
    encoding: &EncodeSettings,
) -> Result<Dimensions> {
    let original = get_dimensions(backend, &request.source)?;
    let (width, height) = calculate_target_dimensions(original, (request.width, request.height))
        .ok_or_else(|| {
            BackendError::InvalidDimensions(format!(
                "cannot resize {}x{} to {}x{} (edges are limited to {}px)",
                original.0, original.1, request.width, request.height, MAX_TARGET_EDGE
            ))
        })?;

    backend.resize(&ResizeParams {
        source: request.source.clone(),
        output: request.output.clone(),
        width,
        height,
        encoding: *encoding,
    })?;

    Ok(Dimensions { width, height })
}
