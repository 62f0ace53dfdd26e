//! Core functionality for the transformer
//!
//! Contains the transform invocation, result serialization and the
//! overwrite guard protecting existing output files.

pub mod output;
pub mod overwrite;
pub mod transform;

pub use output::{OutputMethod, OutputSettings};
pub use overwrite::{OverwriteDecision, OverwriteGuard};
pub use transform::{
    CompiledTemplate, RenderedOutput, TransformOptions, TransformReport, Transformer,
};
