//! Turning an [`EffectDefinition`] plus two paths into an argv vector.
//!
//! Commands are never run through a shell. The program and its arguments are
//! kept as separate `OsString`s and handed to [`std::process::Command`]
//! directly, so paths containing spaces, quotes or `;` reach the tool as one
//! literal argument each. [`EffectCommand::command_line`] renders the same
//! argv with POSIX quoting for logs and error messages; for UTF-8 paths,
//! feeding that string to `sh -c` would execute exactly the same argv.

use super::definition::{EffectDefinition, Executable, Invocation, OptionArg};
use crate::config::ToolsConfig;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Resolved locations of everything an effect may need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// Generic image-convert tool.
    pub convert: PathBuf,
    /// Compositing tool.
    pub composite: PathBuf,
    pub scripts_dir: PathBuf,
    pub assets_dir: PathBuf,
}

impl ToolPaths {
    /// Resolve a tools config. Relative script/asset directories are taken
    /// relative to `base`; tool names without a directory component are left
    /// for `PATH` lookup.
    pub fn from_config(tools: &ToolsConfig, base: &Path) -> Self {
        Self {
            convert: resolve_program(&tools.convert, base),
            composite: resolve_program(&tools.composite, base),
            scripts_dir: base.join(&tools.scripts_dir),
            assets_dir: base.join(&tools.assets_dir),
        }
    }

    /// Program that runs `executable`.
    pub fn program(&self, executable: Executable) -> PathBuf {
        match executable {
            Executable::Convert => self.convert.clone(),
            Executable::Composite { .. } => self.composite.clone(),
            Executable::Script(name) => self.scripts_dir.join(name),
        }
    }

    pub fn asset(&self, file: &str) -> PathBuf {
        self.assets_dir.join(file)
    }
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self::from_config(&ToolsConfig::default(), Path::new(""))
    }
}

fn resolve_program(program: &str, base: &Path) -> PathBuf {
    let path = Path::new(program);
    if path.components().count() > 1 {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}

/// A ready-to-spawn command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl EffectCommand {
    /// Program followed by arguments.
    pub fn argv(&self) -> impl Iterator<Item = &OsStr> {
        std::iter::once(self.program.as_os_str()).chain(self.args.iter().map(OsString::as_os_str))
    }

    /// The argv rendered as a shell-escaped command line.
    ///
    /// Words that are not valid UTF-8 are rendered lossily, so only UTF-8
    /// argv parses back to exactly what ran.
    pub fn command_line(&self) -> String {
        let words: Vec<String> = self
            .argv()
            .map(|word| word.to_string_lossy().into_owned())
            .collect();
        shlex::try_join(words.iter().map(String::as_str)).unwrap_or_else(|_| format!("{words:?}"))
    }
}

/// Assemble the argv for running `definition` on `input`, writing `output`.
pub fn build_command(
    definition: &EffectDefinition,
    tools: &ToolPaths,
    input: &Path,
    output: &Path,
) -> EffectCommand {
    let mut args: Vec<OsString> = Vec::new();

    if let Executable::Composite { overlay } = definition.executable {
        args.push(tools.asset(overlay).into_os_string());
    }

    let options = definition.options.iter().map(|arg| match arg {
        OptionArg::Literal(s) => OsString::from(s),
        OptionArg::Asset(file) => tools.asset(file).into_os_string(),
    });

    match definition.invocation {
        Invocation::InputOptionsOutput => {
            args.push(input.as_os_str().to_owned());
            args.extend(options);
        }
        Invocation::OptionsInputOutput => {
            args.extend(options);
            args.push(input.as_os_str().to_owned());
        }
    }
    args.push(output.as_os_str().to_owned());

    EffectCommand {
        program: tools.program(definition.executable),
        args,
    }
}
