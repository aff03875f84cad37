//! # photofx
//!
//! Photographic effects (vintage, sketch, charcoal, split-tone, ...) and
//! proportional resizing for image files.
//!
//! # Architecture: Two Paths
//!
//! ```text
//! effect  name ─▶ registry ─▶ argv ─▶ external tool ─▶ output file
//! resize  w×h  ─▶ image crate decode ─▶ Lanczos3 ─▶ encode ─▶ output file
//! ```
//!
//! Effects are data, not code: each one is a row in a static table naming the
//! program to run, the order of its arguments, and a fixed option fragment.
//! The actual pixel work happens in ImageMagick or in effect scripts living in
//! a scripts directory. Resizing needs nothing external.
//!
//! Every call is synchronous and self-contained. There is no shared mutable
//! state, so callers are free to run conversions in parallel themselves.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`effects`] | Effect registry, argv construction, process execution |
//! | [`imaging`] | Pure-Rust resize and re-encode via the `image` crate |
//! | [`convert`] | [`Converter`](convert::Converter) façade over both paths |
//! | [`config`] | `photofx.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## No Shell
//!
//! Commands are spawned from argv vectors, never from an interpolated shell
//! string, so a file named `x; rm -rf ~.jpg` is just a file name. The
//! shell-quoted command line stored in
//! [`ExecutionResult`](effects::ExecutionResult) is for humans; parsing it
//! back yields the exact argv that ran, as long as every path is UTF-8.
//!
//! ## Exit Status Matters
//!
//! An effect only succeeds when its tool exits with status 0. A tool that
//! starts but fails reports
//! [`ExternalToolFailure`](effects::EffectError::ExternalToolFailure) with its
//! captured output attached.
//!
//! ## Explicit Registry
//!
//! Effect names resolve against a compile-time table only. Lookup is
//! case-insensitive and honours aliases, so `Sketch` and `Line` work, but
//! nothing is discovered from the filesystem at runtime.

pub mod config;
pub mod convert;
pub mod effects;
pub mod imaging;
pub mod output;
