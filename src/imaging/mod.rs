//! Image resizing and re-encoding through the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` after sniffing the format |
//! | **Resize** | Lanczos3 via `DynamicImage::resize_exact` |
//! | **Encode** | PNG / JPEG / WebP / TIFF / AVIF encoders from `image::codecs` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{MAX_TARGET_EDGE, calculate_target_dimensions};
pub use operations::{get_dimensions, resize_image};
pub use params::{
    Compression, EncodeSettings, OutputFormat, ParamParseError, Quality, ResizeParams,
    ResizeRequest,
};
pub use rust_backend::RustBackend;
