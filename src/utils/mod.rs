//! Utility modules for common functionality
//!
//! Provides reusable utilities for file operations, environment lookup
//! and console prompts.

pub mod env;
pub mod fs;
pub mod prompt;

pub use env::{EnvLookup, MapEnv, ProcessEnv, TEMPLATE_PATH_VAR};
pub use fs::FileSystemUtils;
pub use prompt::{AssumeDefaults, ConsolePrompter, Prompter, ScriptedPrompter};
