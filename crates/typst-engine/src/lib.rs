//! Typst rendering backend
//!
//! Compiles the embedded report template entirely in memory and exports PDF:
//! - [`world`]: in-memory Typst `World` with an embedded font cache
//! - [`templates`]: embedded template sources and `typst://templates/` URIs
//! - [`compiler`]: compilation, diagnostics and PDF export
//! - [`report`]: [`TypstBackend`], the `RenderBackend` used by report-core

pub mod compiler;
pub mod report;
pub mod templates;
pub mod world;

pub use compiler::{compile_pdf, RenderError, RenderOutput, RenderRequest};
pub use report::TypstBackend;
