//! Command-line argument parsing and validation

use crate::error::{Result, TransformerError};
use clap::{ArgAction, CommandFactory, Parser};
use std::{ffi::OsString, path::PathBuf};

/// Name the binary is installed under
pub const BIN_NAME: &str = "xslt";

/// Tokens that print the usage text when given as the first argument
pub const HELP_TOKENS: [&str; 3] = ["-h", "--help", "/?"];

/// Optional leading verb, accepted for compatibility with `xslt transform ...`
pub const TRANSFORM_VERB: &str = "transform";

const ABOUT: &str = "\
Transforms a given data file (usually in .XML format, e.g an IIS failed request log file) \
into a human or browser readable file (e.g HTML, XLS, etc.).

You can control the template by either using one of the available flags or by setting an \
environment variable in your system. Just set the environment variable XSLT_TEMPLATE_PATH to \
be the full path to the template file.";

const EXAMPLES: &str = "\
Examples:
  xslt data.xml -o transformed.html
  xslt data.xml -t template.xslt -o transformed.html
  xslt data.xml --template template.xslt --output transformed.html";

/// XSLT Transformer - renders XML data files through an XSL template
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(name = BIN_NAME, version, about = ABOUT, long_about = None, after_help = EXAMPLES)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Full path to the file to transform
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Full path to the file to transform (alternative to the positional form)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILENAME",
        conflicts_with = "input"
    )]
    pub input_flag: Option<PathBuf>,

    /// Full path to an XSL template file; can be skipped when XSLT_TEMPLATE_PATH is set
    #[arg(short = 't', long = "template", value_name = "FILENAME")]
    pub template: Option<PathBuf>,

    /// Full path or name of the file to generate (an existing file is overwritten after confirmation)
    #[arg(short = 'o', long = "output", value_name = "FILENAME")]
    pub output: Option<PathBuf>,

    /// Answer every prompt with its default instead of asking
    #[arg(short = 'y', long = "yes")]
    pub assume_yes: bool,

    /// Enable debug output and engine diagnostics
    #[arg(long)]
    pub debug: bool,

    /// Print this help (also `/?`)
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,

    /// Print version
    #[arg(short = 'V', long = "version", action = ArgAction::SetTrue)]
    pub version: bool,
}

impl Args {
    /// Input path from either the positional or the flag form
    #[must_use]
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().or(self.input_flag.as_ref())
    }
}

/// What the command line asks the program to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Print usage and exit successfully
    Help,
    /// Print the version and exit successfully
    Version,
    /// Run a transformation
    Run(Args),
}

/// Parse the process command line
pub fn parse_args() -> Result<Invocation> {
    parse_invocation(std::env::args_os())
}

/// Parse a full argument vector, program name first
pub fn parse_invocation<I, T>(argv: I) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    if argv.is_empty() {
        argv.push(BIN_NAME.into());
    }

    if argv.get(1).is_some_and(|first| first == TRANSFORM_VERB) {
        argv.remove(1);
    }

    match argv.get(1) {
        None => return Ok(Invocation::Help),
        Some(first) if HELP_TOKENS.iter().any(|token| first == *token) => {
            return Ok(Invocation::Help);
        }
        Some(_) => {}
    }

    let args = Args::try_parse_from(argv)
        .map_err(|e| TransformerError::invalid_arguments(describe_clap_error(&e)))?;

    if args.help {
        Ok(Invocation::Help)
    } else if args.version {
        Ok(Invocation::Version)
    } else {
        Ok(Invocation::Run(args))
    }
}

/// Usage text: description, flags and example invocations
#[must_use]
pub fn usage() -> String {
    Args::command().render_help().to_string()
}

/// Version line printed for `-V|--version`
#[must_use]
pub fn version_line() -> String {
    format!("{BIN_NAME} {}", env!("CARGO_PKG_VERSION"))
}

/// First line of a clap error, without clap's own `error:` prefix
fn describe_clap_error(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.trim_start_matches("error:").trim().to_string()
}
