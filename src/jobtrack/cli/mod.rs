//! # CLI Layer
//!
//! This module is **one possible UI client** for jobtrack. It is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdin, stdout, stderr)
//! - Handles argument and session-line parsing
//! - Formats output for human consumption
//!
//! ## Session Model
//!
//! `jobtrack` starts one session with an empty store (optionally seeded from a
//! JSON file) and reads commands line by line from stdin. Each line is split
//! shell-style with `shell_words`, parsed with clap and dispatched to
//! [`jobtrack::api::TrackerApi`]; the returned `CmdResult` is printed. Nothing outlives the session except
//! configuration and explicit exports.
//!
//! ## Structure
//!
//! - `commands`: session loop, context setup and per-command handlers
//! - `setup`: clap definitions for the process arguments and session lines
//! - `print`: output formatting

mod commands;
mod print;
mod setup;

pub use commands::run;
