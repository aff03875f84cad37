//! Static description of a single effect.
//!
//! An [`EffectDefinition`] never changes after compilation: it names the
//! executable to run, the order its arguments go in, and the fixed option
//! fragment that gives the effect its look. The only runtime inputs are the
//! tool locations ([`ToolPaths`](super::command::ToolPaths)) and the two file
//! paths of a request.

use serde::Serialize;

/// Which program runs the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum Executable {
    /// The generic image-convert tool (`convert`).
    Convert,
    /// The compositing tool, with an overlay from the assets directory as its
    /// first argument.
    Composite { overlay: &'static str },
    /// An effect-specific executable in the scripts directory.
    Script(&'static str),
}

/// Argument order of the final command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Invocation {
    /// `{command} {input} {options} {output}`
    #[default]
    InputOptionsOutput,
    /// `{command} {options} {input} {output}`
    OptionsInputOutput,
}

impl Invocation {
    pub fn template(self) -> &'static str {
        match self {
            Self::InputOptionsOutput => "{command} {input} {options} {output}",
            Self::OptionsInputOutput => "{command} {options} {input} {output}",
        }
    }
}

/// One fragment of an effect's fixed options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum OptionArg {
    Literal(&'static str),
    /// File name inside the assets directory; expanded to a full path.
    Asset(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectDefinition {
    pub name: &'static str,
    /// Extra spellings accepted by lookup (case-insensitively).
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub executable: Executable,
    pub invocation: Invocation,
    pub options: &'static [OptionArg],
}

impl EffectDefinition {
    /// Whether `name` refers to this effect, ignoring ASCII case.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Asset files this effect reads, whether as overlay or inside its options.
    pub fn assets(&self) -> Vec<&'static str> {
        let overlay = match self.executable {
            Executable::Composite { overlay } => Some(overlay),
            _ => None,
        };
        overlay
            .into_iter()
            .chain(self.options.iter().filter_map(|arg| match arg {
                OptionArg::Asset(file) => Some(*file),
                OptionArg::Literal(_) => None,
            }))
            .collect()
    }
}
