//! Error and omission types for report assembly
//!
//! Only a backend failure aborts a report. Spans that cannot be placed are
//! recorded as [`Omission`]s and the report is still produced.

use serde::Serialize;
use thiserror::Error;

/// Failure to produce a report artifact
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Rendering failed: {source}")]
    Rendering {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Why a matched span was left out of the annotated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OmissionReason {
    /// The span text does not occur anywhere in the content
    NotFound,
    /// The span text is empty or whitespace only
    EmptySpan,
    /// The span could not be turned into a literal pattern (e.g. size limits)
    PatternRejected,
}

/// A matched span dropped from the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Omission {
    pub span: String,
    pub reason: OmissionReason,
}

impl ReportError {
    pub fn rendering<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ReportError::Rendering {
            source: Box::new(source),
        }
    }
}

impl Omission {
    pub fn new(span: impl Into<String>, reason: OmissionReason) -> Self {
        Self {
            span: span.into(),
            reason,
        }
    }
}

impl std::fmt::Display for OmissionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OmissionReason::NotFound => write!(f, "not found in content"),
            OmissionReason::EmptySpan => write!(f, "empty span"),
            OmissionReason::PatternRejected => write!(f, "pattern rejected"),
        }
    }
}
