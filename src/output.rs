//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure — no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Effects
//!
//! ```text
//! contrast    Sigmoidal contrast boost
//!     convert {input} {options} {output}
//! sketch      Gray pencil sketch
//!     scripts/sketch {options} {input} {output}
//! ```
//!
//! ## Apply
//!
//! ```text
//! sketch → out.jpg
//!     Command: /srv/fx/scripts/sketch -k gray -c 175 in.jpg out.jpg
//!     | sketch: processing...
//! ```
//!
//! ## Check
//!
//! ```text
//! Programs
//!     ok       convert (contrast, pencil, lines)
//!     missing  scripts/sketch (charcoal, sketch)
//! Assets
//!     ok       assets/pencil_tile.gif (pencil)
//! ```

use crate::convert::{ToolKind, ToolStatus};
use crate::effects::{EffectDefinition, ExecutionResult, Executable};
use crate::imaging::{Dimensions, OutputFormat};
use std::path::Path;

const INDENT: &str = "    ";

fn program_label(executable: Executable) -> String {
    match executable {
        Executable::Convert => "convert".to_string(),
        Executable::Composite { overlay } => format!("composite assets/{overlay}"),
        Executable::Script(name) => format!("scripts/{name}"),
    }
}

/// One header line plus the invocation shape for every effect.
pub fn format_effect_list(definitions: &[EffectDefinition]) -> Vec<String> {
    let width = definitions.iter().map(|d| d.name.len()).max().unwrap_or(0);
    let mut lines = Vec::new();

    for def in definitions {
        let mut header = format!("{:width$}  {}", def.name, def.description);
        if !def.aliases.is_empty() {
            header.push_str(&format!(" (also: {})", def.aliases.join(", ")));
        }
        lines.push(header);

        let shape = def
            .invocation
            .template()
            .replace("{command}", &program_label(def.executable));
        lines.push(format!("{INDENT}{shape}"));
    }

    lines
}

pub fn print_effect_list(definitions: &[EffectDefinition]) {
    for line in format_effect_list(definitions) {
        println!("{}", line);
    }
}

/// Result of one effect run: header, command, then captured tool output.
pub fn format_execution(result: &ExecutionResult, output: &Path) -> Vec<String> {
    let status = if result.success { "→" } else { "✗" };
    let mut lines = vec![
        format!("{} {} {}", result.effect, status, output.display()),
        format!("{INDENT}Command: {}", result.command_line),
    ];
    if let Some(code) = result.exit_code.filter(|c| *c != 0) {
        lines.push(format!("{INDENT}Exit status: {code}"));
    }
    lines.extend(result.output_lines.iter().map(|l| format!("{INDENT}| {l}")));
    lines
}

pub fn print_execution(result: &ExecutionResult, output: &Path) {
    for line in format_execution(result, output) {
        println!("{}", line);
    }
}

pub fn format_resize(output: &Path, written: Dimensions, format: OutputFormat) -> Vec<String> {
    vec![format!(
        "resize → {} ({}x{} {})",
        output.display(),
        written.width,
        written.height,
        format
    )]
}

pub fn print_resize(output: &Path, written: Dimensions, format: OutputFormat) {
    for line in format_resize(output, written, format) {
        println!("{}", line);
    }
}

/// Programs section, then assets section. Empty sections are omitted.
pub fn format_tool_status(statuses: &[ToolStatus]) -> Vec<String> {
    let mut lines = Vec::new();

    for (kind, title) in [(ToolKind::Program, "Programs"), (ToolKind::Asset, "Assets")] {
        let section: Vec<&ToolStatus> = statuses.iter().filter(|s| s.kind == kind).collect();
        if section.is_empty() {
            continue;
        }
        lines.push(title.to_string());
        for status in section {
            let mark = if status.available { "ok" } else { "missing" };
            lines.push(format!(
                "{INDENT}{mark:<8} {} ({})",
                status.path.display(),
                status.used_by.join(", ")
            ));
        }
    }

    lines
}

pub fn print_tool_status(statuses: &[ToolStatus]) {
    for line in format_tool_status(statuses) {
        println!("{}", line);
    }
}

/// Used by `check`: effects whose programs or assets are all present.
pub fn count_ready_effects(definitions: &[EffectDefinition], statuses: &[ToolStatus]) -> usize {
    definitions
        .iter()
        .filter(|def| {
            statuses
                .iter()
                .filter(|s| s.used_by.contains(&def.name))
                .all(|s| s.available)
        })
        .count()
}
