//! Command implementations for the CLI

use crate::{
    cli::{Args, usage},
    config::ResolvedConfig,
    core::{OverwriteDecision, OverwriteGuard, TransformOptions, TransformReport, Transformer},
    error::{Result, TransformerError},
    utils::{AssumeDefaults, ConsolePrompter, EnvLookup, FileSystemUtils, Prompter},
};
use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{info, instrument};

/// How a run ended, when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The output file was written
    Generated(TransformReport),
    /// The user declined to overwrite an existing output file
    Cancelled { output_path: PathBuf },
}

/// Resolve the configuration and run the transformation
#[instrument(skip(env, prompter))]
pub fn run<E, P>(args: &Args, env: &E, prompter: &P) -> Result<Outcome>
where
    E: EnvLookup + ?Sized,
    P: Prompter + ?Sized,
{
    let config = ResolvedConfig::resolve(args, env, prompter)?;
    execute_transform(&config, prompter)
}

/// Execute the transformation for an already resolved configuration
#[instrument(skip(prompter))]
pub fn execute_transform<P: Prompter + ?Sized>(
    config: &ResolvedConfig,
    prompter: &P,
) -> Result<Outcome> {
    info!(
        "Transforming {} with {} into {}",
        config.input_path.display(),
        config.template_path.display(),
        config.output_path.display()
    );

    let guard = OverwriteGuard::new(prompter);
    let decision = guard.check(&config.output_path)?;
    if decision == OverwriteDecision::Cancel {
        return Ok(Outcome::Cancelled {
            output_path: config.output_path.clone(),
        });
    }

    let input_xml = FileSystemUtils::new()
        .read_file(&config.input_path)
        .map_err(|e| TransformerError::io("read input", &config.input_path, e))?;

    let transformer = Transformer::new(TransformOptions {
        debug_diagnostics: config.debug,
    });
    let rendered = transformer.render(&input_xml, &config.input_path, &config.template_path)?;

    guard.clear(&config.output_path, decision)?;
    let report = transformer.write_output(rendered, &config.output_path)?;

    Ok(Outcome::Generated(report))
}

/// Prompter matching the session: scripted runs and pipes never block
#[must_use]
pub fn prompter_for(assume_yes: bool) -> Box<dyn Prompter> {
    if assume_yes || !io::stdin().is_terminal() {
        Box::new(AssumeDefaults)
    } else {
        Box::new(ConsolePrompter)
    }
}

/// Print an error in red, followed by the usage text for argument errors
pub fn render_error<W: Write>(err: &TransformerError, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", err.to_string().red())?;
    if err.shows_usage() {
        writeln!(out)?;
        write!(out, "{}", usage())?;
    }
    Ok(())
}
