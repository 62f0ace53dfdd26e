//! # XSLT Transformer
//!
//! Converts an XML data file, typically an IIS Failed Request Event
//! Buffering (FREB) log, into a readable document by applying an XSLT 1.0
//! template. The transformation itself is done by libxslt; this crate
//! resolves the input, template and output paths, guards existing output
//! files and reports the result.
//!
//! ## Features
//!
//! - Template from `-t|--template` or the `XSLT_TEMPLATE_PATH` environment variable
//! - Interactive output name and overwrite prompts, skipped when not on a terminal
//! - Output serialized according to the template's `xsl:output` declaration
//! - Output written atomically, never left half-finished
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use xslt_transformer::core::{TransformOptions, Transformer};
//!
//! let xml = std::fs::read("fr000001.xml")?;
//! let report = Transformer::new(TransformOptions::default()).transform(
//!     &xml,
//!     Path::new("fr000001.xml"),
//!     Path::new("freb.xsl"),
//!     Path::new("transformed.html"),
//! )?;
//! println!("File {} successfully generated.", report.output_path.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
///
/// Logs go to stderr so they never mix with generated output on stdout.
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
