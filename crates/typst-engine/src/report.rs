//! [`RenderBackend`] implementation backed by the embedded Typst template

use std::collections::HashMap;

use report_core::RenderBackend;
use report_types::{AnnotatedDocument, Artifact};

use crate::compiler::{compile_pdf, RenderError, RenderRequest};
use crate::templates::{template_uri, REPORT_TEMPLATE};

/// Input key under which the document is exposed to the template
pub const REPORT_INPUT: &str = "report";

/// Renders annotated documents to PDF with the plagiarism report template
#[derive(Debug, Clone)]
pub struct TypstBackend {
    template: String,
}

impl TypstBackend {
    pub fn new() -> Self {
        Self {
            template: template_uri(REPORT_TEMPLATE),
        }
    }

    #[cfg(test)]
    fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl Default for TypstBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for TypstBackend {
    type Error = RenderError;

    fn render(&self, document: &AnnotatedDocument) -> Result<Artifact, Self::Error> {
        let mut inputs = HashMap::new();
        inputs.insert(REPORT_INPUT.to_string(), serde_json::to_value(document)?);

        let output = compile_pdf(RenderRequest {
            source: self.template.clone(),
            inputs,
        })?;

        if !output.warnings.is_empty() {
            tracing::debug!("Report template raised {} warnings", output.warnings.len());
        }

        Ok(output.artifact)
    }
}
