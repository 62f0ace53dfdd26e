//! Command-line interface module
//!
//! Provides argument parsing and command execution.

pub mod args;
pub mod commands;

pub use args::{Args, Invocation, parse_args, parse_invocation, usage, version_line};
pub use commands::{Outcome, execute_transform, prompter_for, render_error, run};
