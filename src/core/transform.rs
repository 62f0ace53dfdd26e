//! XSLT transform invocation
//!
//! Thin wrapper over libxml2/libxslt: parse the input, compile the template,
//! apply it with no parameters and serialize the result tree.

use crate::{
    core::output::{self, OutputMethod, OutputSettings},
    error::{Result, TransformerError},
    utils::FileSystemUtils,
};
use libxml::error::{StructuredError, XmlErrorLevel};
use libxml::parser::{Parser, ParserOptions, XmlParseFailure};
use libxml::tree::Document;
use libxslt::stylesheet::Stylesheet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Switches for a single transformation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Let libxml2 report its own errors and warnings, and log result details
    pub debug_diagnostics: bool,
}

/// Outcome of a successful transformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformReport {
    /// Where the result was written
    pub output_path: PathBuf,
    /// Size of the written result
    pub bytes_written: u64,
    /// Serialization method used
    pub method: OutputMethod,
}

/// Serialized result, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub bytes: Vec<u8>,
    pub method: OutputMethod,
}

/// A compiled stylesheet together with its output declarations
pub struct CompiledTemplate {
    stylesheet: Stylesheet,
    settings: OutputSettings,
    path: PathBuf,
}

/// Runs XSLT transformations
pub struct Transformer {
    options: TransformOptions,
    parser: Parser,
    fs_utils: FileSystemUtils,
}

impl Transformer {
    /// Create a transformer with the given options
    #[must_use]
    pub fn new(options: TransformOptions) -> Self {
        Self {
            options,
            parser: Parser::default(),
            fs_utils: FileSystemUtils::new(),
        }
    }

    /// Transform `input_xml` with the template at `template_path` into `output_path`
    ///
    /// The input is raw file content; libxml2 picks the encoding from the byte
    /// order mark or the XML declaration. `input_path` only names the input in
    /// diagnostics.
    #[instrument(skip(self, input_xml))]
    pub fn transform(
        &self,
        input_xml: &[u8],
        input_path: &Path,
        template_path: &Path,
        output_path: &Path,
    ) -> Result<TransformReport> {
        let rendered = self.render(input_xml, input_path, template_path)?;
        self.write_output(rendered, output_path)
    }

    /// Parse, compile and apply, returning the serialized result
    #[instrument(skip(self, input_xml))]
    pub fn render(
        &self,
        input_xml: &[u8],
        input_path: &Path,
        template_path: &Path,
    ) -> Result<RenderedOutput> {
        let document = self.parse_input(input_xml, input_path)?;
        let mut template = self.load_template(template_path)?;
        self.apply(&mut template, document)
    }

    /// Parse the input, rejecting anything that is not well-formed
    pub fn parse_input(&self, input_xml: &[u8], input_path: &Path) -> Result<Document> {
        self.parse_document(input_xml)
            .map_err(|message| TransformerError::xml_parse(message, input_path))
    }

    /// Load and compile the template at `path`
    #[instrument(skip(self))]
    pub fn load_template(&self, path: &Path) -> Result<CompiledTemplate> {
        let path_str = path
            .to_str()
            .ok_or_else(|| TransformerError::template_load("path is not valid UTF-8", path))?;

        if !self.fs_utils.is_file(path) {
            return Err(TransformerError::template_load("file does not exist", path));
        }

        let source = self
            .fs_utils
            .read_file(path)
            .map_err(|e| TransformerError::template_load(e.to_string(), path))?;
        let source_doc = self
            .parse_document(&source)
            .map_err(|message| TransformerError::template_load(message, path))?;
        let settings = OutputSettings::from_stylesheet(&source_doc);

        let stylesheet = libxslt::parser::parse_file(path_str).map_err(|e| {
            TransformerError::template_load(format!("not a valid XSLT stylesheet ({e})"), path)
        })?;

        debug!("Compiled template {}", path.display());
        Ok(CompiledTemplate {
            stylesheet,
            settings,
            path: path.to_path_buf(),
        })
    }

    /// Apply a compiled template to a parsed document, with no parameters
    ///
    /// The document is consumed, since libxslt may strip whitespace from it.
    pub fn apply(
        &self,
        template: &mut CompiledTemplate,
        document: Document,
    ) -> Result<RenderedOutput> {
        let started = Instant::now();

        let result = template
            .stylesheet
            .transform(document, Vec::new())
            .map_err(|e| TransformerError::transform_execution(e.to_string()))?;

        let method = template.settings.method_for(&result);
        let bytes = output::serialize(&result, method, &template.settings);

        if self.options.debug_diagnostics {
            let root = result.get_root_element().map(|node| node.get_name());
            debug!(
                "Applied {} in {:?}: method={}, root element={:?}, {} bytes",
                template.path.display(),
                started.elapsed(),
                method,
                root,
                bytes.len()
            );
        }

        Ok(RenderedOutput { bytes, method })
    }

    /// Write a rendered result to `output_path`, replacing whatever is there
    #[instrument(skip(self, rendered))]
    pub fn write_output(
        &self,
        rendered: RenderedOutput,
        output_path: &Path,
    ) -> Result<TransformReport> {
        let bytes_written = self
            .fs_utils
            .write_file_atomic(output_path, &rendered.bytes)
            .map_err(|e| TransformerError::output_io(output_path, e))?;

        info!(
            "Wrote {} bytes of {} output to {}",
            bytes_written,
            rendered.method,
            output_path.display()
        );

        Ok(TransformReport {
            output_path: output_path.to_path_buf(),
            bytes_written,
            method: rendered.method,
        })
    }

    /// Parse `bytes` as XML, describing the first fatal problem on failure
    fn parse_document(&self, bytes: &[u8]) -> std::result::Result<Document, String> {
        match self
            .parser
            .parse_string_with_diagnostics(bytes, self.parser_options())
        {
            Ok((document, diagnostics)) => {
                for diagnostic in &diagnostics {
                    debug!("libxml2: {}", describe_diagnostic(diagnostic));
                }
                Ok(document)
            }
            Err(XmlParseFailure::ParseFailed(diagnostics)) => {
                Err(describe_parse_failure(bytes, &diagnostics))
            }
            Err(other) => Err(other.to_string()),
        }
    }

    fn parser_options(&self) -> ParserOptions {
        let quiet = !self.options.debug_diagnostics;
        ParserOptions {
            recover: false,
            no_error: quiet,
            no_warning: quiet,
            ..ParserOptions::default()
        }
    }
}

/// Human-readable reason why `bytes` failed to parse
///
/// Prefers the first error over any warnings libxml2 emitted before it.
fn describe_parse_failure(bytes: &[u8], diagnostics: &[StructuredError]) -> String {
    let first_error = diagnostics
        .iter()
        .find(|d| matches!(d.level, XmlErrorLevel::Error | XmlErrorLevel::Fatal))
        .or_else(|| diagnostics.first());

    match first_error {
        Some(diagnostic) => describe_diagnostic(diagnostic),
        None if bytes.iter().all(u8::is_ascii_whitespace) => "document is empty".to_string(),
        None => "document is not well-formed".to_string(),
    }
}

fn describe_diagnostic(diagnostic: &StructuredError) -> String {
    let message = diagnostic
        .message
        .as_deref()
        .map_or("document is not well-formed", str::trim_end);

    match (diagnostic.line, diagnostic.col) {
        (Some(line), Some(column)) => format!("line {line}, column {column}: {message}"),
        (Some(line), None) => format!("line {line}: {message}"),
        _ => message.to_string(),
    }
}
