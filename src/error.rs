//! Error types for the transformer
//!
//! Every failure of a single invocation maps onto one variant. None of them
//! are retried; the top level prints the message and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit code used for every failed invocation (`-1` on the console).
pub const FAILURE_EXIT_CODE: u8 = 255;

/// Main error type for the transformer
#[derive(Error, Debug)]
pub enum TransformerError {
    /// No input file was given on the command line
    #[error("Please provide an input file, either as the first argument or with -i|--input.")]
    MissingInput,

    /// The input path does not point at an existing file
    #[error("Input file {} does not exist.", .path.display())]
    InputNotFound { path: PathBuf },

    /// Neither `-t|--template` nor the environment variable yielded a template
    #[error(
        "Please either provide a -t|--template argument or set up a {variable} environment variable."
    )]
    MissingTemplate { variable: String },

    /// The template is missing, unreadable or not valid XSLT
    #[error("Failed to load template {}: {message}", .path.display())]
    TemplateLoad { message: String, path: PathBuf },

    /// Unrecognized or malformed command line
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// The input is not well-formed XML
    #[error("Failed to parse {} as XML: {message}", .path.display())]
    XmlParse { message: String, path: PathBuf },

    /// The engine failed while applying the template
    #[error("Transformation failed: {message}")]
    TransformExecution { message: String },

    /// The result could not be written to the output path
    #[error("Failed to write output file {}: {message}", .path.display())]
    OutputWrite {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Reading from the console or the input file failed
    #[error("I/O error: {operation} failed on {}: {source}", .path.display())]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransformerError {
    /// Create a new input-not-found error
    pub fn input_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create a new missing-template error naming the consulted variable
    pub fn missing_template(variable: impl Into<String>) -> Self {
        Self::MissingTemplate {
            variable: variable.into(),
        }
    }

    /// Create a new template loading error
    pub fn template_load<P: Into<PathBuf>>(message: impl Into<String>, path: P) -> Self {
        Self::TemplateLoad {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a new invalid-arguments error
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a new XML parsing error
    pub fn xml_parse<P: Into<PathBuf>>(message: impl Into<String>, path: P) -> Self {
        Self::XmlParse {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a new transform execution error
    pub fn transform_execution(message: impl Into<String>) -> Self {
        Self::TransformExecution {
            message: message.into(),
        }
    }

    /// Create a new output write error without an underlying I/O cause
    pub fn output_write<P: Into<PathBuf>>(message: impl Into<String>, path: P) -> Self {
        Self::OutputWrite {
            message: message.into(),
            path: path.into(),
            source: None,
        }
    }

    /// Create a new output write error caused by an I/O failure
    pub fn output_io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::OutputWrite {
            message: source.to_string(),
            path: path.into(),
            source: Some(source),
        }
    }

    /// Create a new generic I/O error
    pub fn io<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Whether the usage text should be reprinted next to this error
    #[must_use]
    pub const fn shows_usage(&self) -> bool {
        matches!(
            self,
            Self::InvalidArguments { .. } | Self::MissingInput | Self::MissingTemplate { .. }
        )
    }

    /// Process exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        FAILURE_EXIT_CODE
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TransformerError>;
