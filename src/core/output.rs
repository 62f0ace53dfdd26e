//! Serialization of transform results
//!
//! The engine hands back a result tree; how it becomes bytes is governed by
//! the template's top-level `xsl:output` elements.

use libxml::tree::{Document, SaveOptions};
use std::fmt;
use tracing::debug;

/// Namespace of XSLT instructions
pub const XSL_NAMESPACE: &str = "http://www.w3.org/1999/XSL/Transform";

/// Serialization method of a result tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMethod {
    Xml,
    Html,
    Text,
}

impl OutputMethod {
    /// Parse the value of an `xsl:output/@method` attribute
    ///
    /// Qualified names select extension methods, which are not supported;
    /// those yield `None` and the default rule applies.
    #[must_use]
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value.trim() {
            "xml" => Some(Self::Xml),
            "html" => Some(Self::Html),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

impl fmt::Display for OutputMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml => write!(f, "xml"),
            Self::Html => write!(f, "html"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Output settings declared by a stylesheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSettings {
    /// Explicit `method`, if declared
    pub method: Option<OutputMethod>,
    /// `indent="yes"`
    pub indent: bool,
    /// `omit-xml-declaration="yes"`
    pub omit_xml_declaration: bool,
}

impl OutputSettings {
    /// Collect the `xsl:output` declarations of a parsed stylesheet
    ///
    /// Several declarations are merged, later ones overriding earlier ones
    /// attribute by attribute.
    #[must_use]
    pub fn from_stylesheet(stylesheet: &Document) -> Self {
        let mut settings = Self::default();

        let Some(root) = stylesheet.get_root_element() else {
            return settings;
        };

        for child in root.get_child_elements() {
            let is_xsl_output = child.get_name() == "output"
                && child
                    .get_namespace()
                    .is_some_and(|ns| ns.get_href() == XSL_NAMESPACE);
            if !is_xsl_output {
                continue;
            }

            if let Some(method) = child.get_attribute("method") {
                settings.method = OutputMethod::from_attribute(&method);
            }
            if let Some(indent) = child.get_attribute("indent") {
                settings.indent = is_yes(&indent);
            }
            if let Some(omit) = child.get_attribute("omit-xml-declaration") {
                settings.omit_xml_declaration = is_yes(&omit);
            }
        }

        debug!("Stylesheet output settings: {:?}", settings);
        settings
    }

    /// Method to serialize `result` with
    ///
    /// Without an explicit method the result is HTML when its root element
    /// is an un-namespaced `html` element, and XML otherwise.
    #[must_use]
    pub fn method_for(&self, result: &Document) -> OutputMethod {
        if let Some(method) = self.method {
            return method;
        }

        match result.get_root_element() {
            Some(root)
                if root.get_name().eq_ignore_ascii_case("html")
                    && root.get_namespace().is_none() =>
            {
                OutputMethod::Html
            }
            _ => OutputMethod::Xml,
        }
    }
}

fn is_yes(value: &str) -> bool {
    value.trim() == "yes"
}

/// Serialize a result tree with the given method and settings
#[must_use]
pub fn serialize(result: &Document, method: OutputMethod, settings: &OutputSettings) -> Vec<u8> {
    let text = match method {
        OutputMethod::Html => result.to_string_with_options(SaveOptions {
            as_html: true,
            format: settings.indent,
            ..SaveOptions::default()
        }),
        OutputMethod::Xml => result.to_string_with_options(SaveOptions {
            format: settings.indent,
            no_declaration: settings.omit_xml_declaration,
            ..SaveOptions::default()
        }),
        OutputMethod::Text => result.as_node().get_content(),
    };

    text.into_bytes()
}
