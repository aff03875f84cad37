//! Named effects backed by external command-line tools.
//!
//! | Piece | Role |
//! |---|---|
//! | [`definition`] | [`EffectDefinition`]: executable, argument order, fixed options |
//! | [`registry`] | The static table of built-in effects and name lookup |
//! | [`command`] | [`ToolPaths`] + [`build_command`]: definition → argv |
//! | [`runner`] | [`CommandRunner`] trait + [`ProcessRunner`] |
//! | [`dispatch`] | [`apply_effect`]: resolve, build, run once, classify |
//!
//! Effects run in one of two argument orders:
//!
//! ```text
//! convert   <input> <options> <output>          (contrast, pencil, lines)
//! composite <overlay> <input> <options> <output> (composite)
//! scripts/X <options> <input> <output>          (everything else)
//! ```

pub mod command;
pub mod definition;
pub mod dispatch;
pub mod registry;
pub mod runner;

pub use command::{EffectCommand, ToolPaths, build_command};
pub use definition::{EffectDefinition, Executable, Invocation, OptionArg};
pub use dispatch::{EffectError, EffectRequest, ExecutionResult, apply_effect, resolve};
pub use registry::{definitions, lookup};
pub use runner::{CommandRunner, ProcessOutput, ProcessRunner};
