//! Core rendering logic
//!
//! Compilation is synchronous and CPU bound; callers that serve requests run
//! it on a blocking thread with their own timeout.

use typst::diag::{Severity, SourceDiagnostic};
use typst::model::Document;

use report_types::Artifact;

use super::errors::{CompileError, RenderError};
use super::{RenderOutput, RenderRequest, PDF_MIME_TYPE};
use crate::templates;
use crate::world::VirtualWorld;

/// Compile a Typst document and export it as PDF
pub fn compile_pdf(request: RenderRequest) -> Result<RenderOutput, RenderError> {
    // Resolve source - template URI or raw source
    let source = match templates::parse_template_uri(&request.source) {
        Some(name) => templates::get_template_source(name)?,
        None => request.source,
    };

    let world = VirtualWorld::new(source, request.inputs);
    let warned = typst::compile(&world);

    let (_, warnings) = categorize_diagnostics(&warned.warnings);
    for warning in &warnings {
        tracing::warn!("Typst warning: {}", warning.message);
    }

    let document = warned.output.map_err(|diagnostics| {
        let (errors, _) = categorize_diagnostics(&diagnostics);
        if errors.is_empty() {
            RenderError::Compile(vec![CompileError::new(
                "Compilation failed with unknown error",
            )])
        } else {
            RenderError::Compile(errors)
        }
    })?;

    let artifact = export_pdf(&document)?;
    tracing::debug!(
        "Rendered PDF: {} pages, {} bytes",
        artifact.page_count,
        artifact.bytes.len()
    );

    Ok(RenderOutput { artifact, warnings })
}

fn export_pdf(document: &Document) -> Result<Artifact, RenderError> {
    if document.pages.is_empty() {
        return Err(RenderError::EmptyDocument);
    }

    let bytes = typst_pdf::pdf(document, &typst_pdf::PdfOptions::default())
        .map_err(|e| RenderError::Export(format!("{:?}", e)))?;

    Ok(Artifact {
        bytes,
        mime_type: PDF_MIME_TYPE.to_string(),
        page_count: document.pages.len(),
    })
}

/// Categorize diagnostics into errors and warnings
fn categorize_diagnostics(
    diagnostics: &[SourceDiagnostic],
) -> (Vec<CompileError>, Vec<CompileError>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for diag in diagnostics {
        let mut compile_error = CompileError::new(diag.message.to_string());

        if !diag.hints.is_empty() {
            let hint = diag
                .hints
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            compile_error = compile_error.with_hint(hint);
        }

        match diag.severity {
            Severity::Error => errors.push(compile_error),
            Severity::Warning => warnings.push(compile_error.as_warning()),
        }
    }

    (errors, warnings)
}
