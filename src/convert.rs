//! The [`Converter`] façade: one value holding configuration, the process
//! runner and the image backend, exposing the two public operations.
//!
//! ```no_run
//! use photofx::config::PhotofxConfig;
//! use photofx::convert::Converter;
//! use std::path::Path;
//!
//! let converter = Converter::new(PhotofxConfig::default(), Path::new("."));
//! converter.effect("in.jpg", "out.jpg", "sketch")?;
//! converter.resize("in.jpg", "small.png", 200, 0)?;
//! # Ok::<(), photofx::convert::ConvertError>(())
//! ```

use crate::config::PhotofxConfig;
use crate::effects::{
    self, CommandRunner, EffectError, EffectRequest, ExecutionResult, ProcessRunner,
    ToolPaths,
};
use crate::imaging::{
    self, BackendError, Compression, Dimensions, EncodeSettings, ImageBackend, OutputFormat,
    Quality, ResizeRequest, RustBackend,
};
use log::info;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Effect(#[from] EffectError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
}

/// Per-call overrides of the configured encoding defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeOptions {
    pub format: Option<OutputFormat>,
    pub compression: Option<Compression>,
    pub quality: Option<u32>,
}

impl ResizeOptions {
    /// Apply these overrides on top of `defaults`.
    pub fn apply(&self, defaults: EncodeSettings) -> EncodeSettings {
        EncodeSettings {
            format: self.format.unwrap_or(defaults.format),
            compression: self.compression.unwrap_or(defaults.compression),
            quality: self.quality.map(Quality::new).unwrap_or(defaults.quality),
        }
    }
}

/// What a required file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Program,
    Asset,
}

/// Availability of one program or asset the registry depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub kind: ToolKind,
    pub path: PathBuf,
    pub available: bool,
    /// Effects that need it, in registry order.
    pub used_by: Vec<&'static str>,
}

pub struct Converter<R = ProcessRunner, B = RustBackend> {
    config: PhotofxConfig,
    tools: ToolPaths,
    runner: R,
    backend: B,
}

impl Converter {
    /// A converter that spawns real processes and resizes with the `image`
    /// crate. Relative tool directories resolve against `base_dir`.
    pub fn new(config: PhotofxConfig, base_dir: &Path) -> Self {
        Self::with_parts(config, base_dir, ProcessRunner::new(), RustBackend::new())
    }
}

impl<R: CommandRunner, B: ImageBackend> Converter<R, B> {
    pub fn with_parts(config: PhotofxConfig, base_dir: &Path, runner: R, backend: B) -> Self {
        let tools = ToolPaths::from_config(&config.tools, base_dir);
        Self {
            config,
            tools,
            runner,
            backend,
        }
    }

    pub fn config(&self) -> &PhotofxConfig {
        &self.config
    }

    /// Apply the effect called `name` to `input`, writing `output`.
    pub fn effect(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        name: &str,
    ) -> Result<ExecutionResult, ConvertError> {
        let request = EffectRequest::new(input, output, name);
        Ok(effects::apply_effect(&self.runner, &self.tools, &request)?)
    }

    /// Resize with the configured encoding. `height == 0` derives the height
    /// proportionally from `width`.
    pub fn resize(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        width: u32,
        height: u32,
    ) -> Result<Dimensions, ConvertError> {
        self.resize_with(input, output, width, height, &ResizeOptions::default())
    }

    /// Resize with per-call encoding overrides.
    pub fn resize_with(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        width: u32,
        height: u32,
        options: &ResizeOptions,
    ) -> Result<Dimensions, ConvertError> {
        let request = ResizeRequest {
            source: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            width,
            height,
        };
        let encoding = options.apply(self.config.output.encode_settings());
        let written = imaging::resize_image(&self.backend, &request, &encoding)?;
        info!(
            "resize: wrote {} ({}x{} {})",
            request.output.display(),
            written.width,
            written.height,
            encoding.format
        );
        Ok(written)
    }

    /// Report every program and asset the registered effects rely on.
    pub fn check_tools(&self) -> Vec<ToolStatus> {
        let mut found: BTreeMap<(u8, PathBuf), Vec<&'static str>> = BTreeMap::new();

        for def in effects::definitions() {
            let program = self.tools.program(def.executable);
            found.entry((0, program)).or_default().push(def.name);
            for asset in def.assets() {
                found
                    .entry((1, self.tools.asset(asset)))
                    .or_default()
                    .push(def.name);
            }
        }

        found
            .into_iter()
            .map(|((rank, path), used_by)| {
                let kind = if rank == 0 {
                    ToolKind::Program
                } else {
                    ToolKind::Asset
                };
                let available = match kind {
                    ToolKind::Program => program_available(&path),
                    ToolKind::Asset => path.is_file(),
                };
                ToolStatus {
                    kind,
                    path,
                    available,
                    used_by,
                }
            })
            .collect()
    }
}

/// Bare names go through `PATH`; anything with a directory must exist.
fn program_available(path: &Path) -> bool {
    if path.components().count() > 1 {
        path.is_file()
    } else {
        which::which(path).is_ok()
    }
}
