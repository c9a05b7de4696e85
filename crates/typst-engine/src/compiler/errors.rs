//! Error types for compilation and export

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A compilation diagnostic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileError {
    /// Human-readable error message
    pub message: String,
    /// Helpful hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub severity: ErrorSeverity,
}

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    Error,
    Warning,
}

/// Rendering failures
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Compilation failed: {}", join_messages(.0))]
    Compile(Vec<CompileError>),

    #[error("PDF export failed: {0}")]
    Export(String),

    #[error("Document has no pages")]
    EmptyDocument,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
            severity: ErrorSeverity::Error,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn as_warning(mut self) -> Self {
        self.severity = ErrorSeverity::Warning;
        self
    }
}

fn join_messages(errors: &[CompileError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
