//! Resolve → build → run → classify.

use super::command::{ToolPaths, build_command};
use super::definition::EffectDefinition;
use super::registry::lookup;
use super::runner::CommandRunner;
use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EffectError {
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),
    #[error("Could not run {program}: {source}")]
    ProcessSpawnFailure {
        program: PathBuf,
        command_line: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{effect} failed ({}): {}", describe_exit(.result.exit_code), .result.command_line)]
    ExternalToolFailure {
        effect: &'static str,
        result: ExecutionResult,
    },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Diagnostics of one effect invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub effect: &'static str,
    pub success: bool,
    pub exit_code: Option<i32>,
    /// Merged stdout and stderr, one entry per line, in output order.
    pub output_lines: Vec<String>,
    /// Shell-escaped rendering of the argv that was run.
    pub command_line: String,
}

/// One effect application.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub effect: String,
}

impl EffectRequest {
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>, effect: impl Into<String>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            effect: effect.into(),
        }
    }
}

/// Look up an effect, failing with [`EffectError::UnknownEffect`].
pub fn resolve(name: &str) -> Result<&'static EffectDefinition, EffectError> {
    lookup(name).ok_or_else(|| EffectError::UnknownEffect(name.to_string()))
}

/// Apply one effect: exactly one child process, no retries.
///
/// The effect name is validated before anything is spawned. A process that
/// starts but exits non-zero (or dies on a signal) is reported as
/// [`EffectError::ExternalToolFailure`] carrying everything it printed.
pub fn apply_effect(
    runner: &impl CommandRunner,
    tools: &ToolPaths,
    request: &EffectRequest,
) -> Result<ExecutionResult, EffectError> {
    let definition = resolve(&request.effect)?;
    let command = build_command(definition, tools, &request.input, &request.output);
    let command_line = command.command_line();
    debug!("{}: {}", definition.name, command_line);

    let output = runner.run(&command).map_err(|source| {
        warn!("{}: could not start {}: {}", definition.name, command.program.display(), source);
        EffectError::ProcessSpawnFailure {
            program: command.program.clone(),
            command_line: command_line.clone(),
            source,
        }
    })?;

    let result = ExecutionResult {
        effect: definition.name,
        success: output.succeeded(),
        exit_code: output.exit_code,
        output_lines: output.lines,
        command_line,
    };

    if result.success {
        info!("{}: wrote {}", definition.name, request.output.display());
        Ok(result)
    } else {
        warn!("{}: {}", definition.name, describe_exit(result.exit_code));
        for line in &result.output_lines {
            warn!("{}: | {}", definition.name, line);
        }
        Err(EffectError::ExternalToolFailure {
            effect: definition.name,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::runner::ProcessOutput;
    use crate::effects::runner::tests::MockRunner;
    use std::ffi::OsString;

    fn tools() -> ToolPaths {
        ToolPaths {
            convert: "convert".into(),
            composite: "composite".into(),
            scripts_dir: "/fx/scripts".into(),
            assets_dir: "/fx/assets".into(),
        }
    }

    #[test]
    fn unknown_effect_spawns_nothing() {
        let runner = MockRunner::new();
        let result = apply_effect(&runner, &tools(), &EffectRequest::new("a.jpg", "b.jpg", "posterize"));

        assert!(matches!(result, Err(EffectError::UnknownEffect(ref n)) if n == "posterize"));
        assert!(runner.get_commands().is_empty());
    }

    #[test]
    fn successful_run_reports_command_and_output() {
        let runner = MockRunner::with_results(vec![Ok(ProcessOutput {
            exit_code: Some(0),
            lines: vec!["done".into()],
        })]);

        let result = apply_effect(&runner, &tools(), &EffectRequest::new("in.jpg", "out.jpg", "contrast"))
            .unwrap();

        assert!(result.success);
        assert_eq!(result.effect, "contrast");
        assert_eq!(result.output_lines, ["done"]);
        assert!(result.command_line.starts_with("convert in.jpg -sigmoidal-contrast"));
        assert_eq!(runner.get_commands().len(), 1);
    }

    #[test]
    fn capitalised_name_dispatches_to_registered_effect() {
        let runner = MockRunner::new();
        let result = apply_effect(&runner, &tools(), &EffectRequest::new("in.jpg", "out.jpg", "Sketch"))
            .unwrap();

        assert_eq!(result.effect, "sketch");
        assert_eq!(runner.get_commands()[0].program, PathBuf::from("/fx/scripts/sketch"));
    }

    #[test]
    fn non_zero_exit_is_external_tool_failure() {
        let runner = MockRunner::with_results(vec![Ok(ProcessOutput {
            exit_code: Some(1),
            lines: vec!["convert: unable to open image".into()],
        })]);

        let err = apply_effect(&runner, &tools(), &EffectRequest::new("in.jpg", "out.jpg", "lines"))
            .unwrap_err();

        match err {
            EffectError::ExternalToolFailure { effect, result } => {
                assert_eq!(effect, "lines");
                assert!(!result.success);
                assert_eq!(result.exit_code, Some(1));
                assert_eq!(result.output_lines, ["convert: unable to open image"]);
            }
            other => panic!("expected ExternalToolFailure, got {other:?}"),
        }
    }

    #[test]
    fn signal_death_is_external_tool_failure() {
        let runner = MockRunner::with_results(vec![Ok(ProcessOutput {
            exit_code: None,
            lines: vec![],
        })]);
        let err = apply_effect(&runner, &tools(), &EffectRequest::new("i", "o", "border")).unwrap_err();
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn spawn_error_is_process_spawn_failure() {
        let runner = MockRunner::with_results(vec![Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ))]);

        let err = apply_effect(&runner, &tools(), &EffectRequest::new("in.jpg", "out.jpg", "vintage2"))
            .unwrap_err();

        match err {
            EffectError::ProcessSpawnFailure { program, command_line, .. } => {
                assert_eq!(program, PathBuf::from("/fx/scripts/vintage2"));
                assert_eq!(command_line, "/fx/scripts/vintage2 in.jpg out.jpg");
            }
            other => panic!("expected ProcessSpawnFailure, got {other:?}"),
        }
    }

    #[test]
    fn sequential_effects_are_independent() {
        let runner = MockRunner::new();
        let t = tools();

        let first = apply_effect(&runner, &t, &EffectRequest::new("in.jpg", "a.jpg", "sketch")).unwrap();
        let second = apply_effect(&runner, &t, &EffectRequest::new("in.jpg", "b.jpg", "charcoal")).unwrap();

        assert_ne!(first.command_line, second.command_line);
        let commands = runner.get_commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].args.last(), Some(&OsString::from("a.jpg")));
        assert_eq!(commands[1].args.last(), Some(&OsString::from("b.jpg")));
        // charcoal's extra flag must not leak into a later sketch run
        let again = apply_effect(&runner, &t, &EffectRequest::new("in.jpg", "c.jpg", "sketch")).unwrap();
        assert_eq!(
            again.command_line.replace("c.jpg", "a.jpg"),
            first.command_line
        );
    }
}
