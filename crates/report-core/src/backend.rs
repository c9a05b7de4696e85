//! Rendering backend seam

use report_types::{AnnotatedDocument, Artifact};

/// A document-layout sink turning an [`AnnotatedDocument`] into a
/// fixed-layout artifact.
///
/// Implementations must be deterministic: the composer never retries.
pub trait RenderBackend: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn render(&self, document: &AnnotatedDocument) -> Result<Artifact, Self::Error>;
}

