//! Template registry and metadata

use super::embedded;
use crate::compiler::errors::RenderError;

const URI_PREFIX: &str = "typst://templates/";

/// Name of the plagiarism report template
pub const REPORT_TEMPLATE: &str = "plagiarism_report";

/// Get the source code for a template by name
pub fn get_template_source(name: &str) -> Result<String, RenderError> {
    embedded::get_embedded_template(name)
        .map(str::to_string)
        .ok_or_else(|| RenderError::TemplateNotFound(name.to_string()))
}

pub fn template_uri(name: &str) -> String {
    format!("{}{}", URI_PREFIX, name)
}

/// Parse a template URI and return the template name
pub fn parse_template_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(URI_PREFIX)
}
