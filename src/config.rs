//! Configuration resolution for a single transformation
//!
//! Sources, highest precedence first: explicit flags, the
//! `XSLT_TEMPLATE_PATH` environment variable (template only), an interactive
//! prompt (output only), and the built-in default output name.

use crate::{
    cli::Args,
    error::{Result, TransformerError},
    utils::{EnvLookup, FileSystemUtils, Prompter, TEMPLATE_PATH_VAR},
};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Output file name used when none is given and the prompt is left empty
pub const DEFAULT_OUTPUT: &str = "transformed.html";

/// Question asked when no `-o|--output` was given
pub const OUTPUT_QUESTION: &str = "Please choose an output file name (default transformed.html)";

/// Fully resolved paths and switches for one run
///
/// Only [`ResolvedConfig::resolve`] builds this, so every field is populated
/// and the input file is known to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// XML data file to transform
    pub input_path: PathBuf,
    /// XSLT template to apply
    pub template_path: PathBuf,
    /// File to generate
    pub output_path: PathBuf,
    /// Enable debug logging and engine diagnostics
    pub debug: bool,
}

impl ResolvedConfig {
    /// Resolve the configuration from parsed arguments, the environment and the user
    ///
    /// The input is checked before the template is looked up, and both are
    /// settled before the user is asked anything.
    #[instrument(skip(env, prompter))]
    pub fn resolve<E, P>(args: &Args, env: &E, prompter: &P) -> Result<Self>
    where
        E: EnvLookup + ?Sized,
        P: Prompter + ?Sized,
    {
        let fs_utils = FileSystemUtils::new();

        let input_path = args
            .input_path()
            .cloned()
            .ok_or(TransformerError::MissingInput)?;
        if !fs_utils.is_file(&input_path) {
            return Err(TransformerError::input_not_found(input_path));
        }

        let template_path = match &args.template {
            Some(template) => template.clone(),
            None => {
                let from_env = env
                    .get_non_empty(TEMPLATE_PATH_VAR)
                    .ok_or_else(|| TransformerError::missing_template(TEMPLATE_PATH_VAR))?;
                debug!("Using template from {}: {}", TEMPLATE_PATH_VAR, from_env);
                PathBuf::from(from_env)
            }
        };
        if !fs_utils.is_file(&template_path) {
            return Err(TransformerError::template_load(
                "file does not exist",
                template_path,
            ));
        }

        let output_path = match &args.output {
            Some(output) => output.clone(),
            None => Self::ask_output_path(prompter)?,
        };

        let config = Self {
            input_path,
            template_path,
            output_path,
            debug: args.debug,
        };
        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    fn ask_output_path<P: Prompter + ?Sized>(prompter: &P) -> Result<PathBuf> {
        let reply = prompter
            .ask(OUTPUT_QUESTION)
            .map_err(|e| TransformerError::io("prompt for output file", "<console>", e))?;

        Ok(PathBuf::from(
            reply.unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
        ))
    }
}
