//! Process execution seam.
//!
//! [`CommandRunner`] is to the effect dispatcher what
//! [`ImageBackend`](crate::imaging::ImageBackend) is to the resizer: the one
//! place that touches the outside world, replaceable by a recording mock in
//! tests.

use super::command::EffectCommand;
use std::io::Read;
use std::process::{Command, Stdio};

/// What came back from a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Everything the process printed to stdout and stderr, one entry per
    /// line in the order it was written.
    pub lines: Vec<String>,
}

impl ProcessOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs one command to completion.
pub trait CommandRunner: Sync {
    /// Spawn `command`, wait for it, and capture its output. An `Err` means
    /// the process could not be started at all.
    fn run(&self, command: &EffectCommand) -> std::io::Result<ProcessOutput>;
}

/// Runs commands as real child processes. Blocking; no timeout.
///
/// stdout and stderr are the same pipe, like `2>&1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

/// Split merged output into lines. Empty lines are kept; the final newline
/// and `\r` of CRLF endings are not.
fn collect_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &EffectCommand) -> std::io::Result<ProcessOutput> {
        let (mut reader, writer) = std::io::pipe()?;

        // The Command owns the parent's copies of the write end; it has to be
        // dropped before reading or EOF never arrives.
        let mut child = {
            let mut cmd = Command::new(&command.program);
            cmd.args(&command.args)
                .stdin(Stdio::null())
                .stdout(writer.try_clone()?)
                .stderr(writer);
            cmd.spawn()?
        };

        let mut merged = Vec::new();
        let read = reader.read_to_end(&mut merged);
        let status = child.wait()?;
        read?;

        Ok(ProcessOutput {
            exit_code: status.code(),
            lines: collect_lines(&merged),
        })
    }
}
