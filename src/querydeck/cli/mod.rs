//! # CLI Layer
//!
//! One possible UI client for querydeck. This is the only place that reads
//! stdin, writes to stdout/stderr, or exits the process.
//!
//! - `setup`: clap definitions for the binary and for shell lines
//! - `commands`: context setup, the interactive shell, per-command handlers
//! - `print`: output formatting for `CmdResult`s and query lists

mod commands;
mod print;
mod setup;

pub use commands::run;
