//! Typst compilation to PDF with diagnostic extraction

pub mod errors;
pub mod render;

pub use errors::{CompileError, ErrorSeverity, RenderError};
pub use render::compile_pdf;

use report_types::Artifact;
use std::collections::HashMap;

/// MIME type of every artifact this engine produces
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Request to render a document
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Raw Typst source code or a `typst://templates/<name>` URI
    pub source: String,
    /// Variables injected into sys.inputs
    pub inputs: HashMap<String, serde_json::Value>,
}

/// A rendered PDF and the warnings raised while compiling it
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub artifact: Artifact,
    pub warnings: Vec<CompileError>,
}
