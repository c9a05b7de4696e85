//! Plagiarism report assembly
//!
//! Turns a block of content and a [`DetectionResult`] into an ordered
//! [`AnnotatedDocument`] and hands it to a [`RenderBackend`]:
//!
//! - [`normalize`]: de-duplicate matched spans and order them longest first
//! - [`annotate`]: mark every matched span in the content
//! - [`table`]: one summary row per source
//! - [`compose`]: assemble blocks and render
//!
//! Everything here is synchronous and free of I/O.
//!
//! [`DetectionResult`]: report_types::DetectionResult
//! [`AnnotatedDocument`]: report_types::AnnotatedDocument

pub mod annotate;
pub mod backend;
pub mod compose;
pub mod error;
pub mod layout;
pub mod normalize;
pub mod table;

pub use annotate::{annotate, escape_markup, AnnotatedText, Annotation};
pub use backend::RenderBackend;
pub use compose::{Composition, GeneratedReport, ReportComposer};
pub use error::{Omission, OmissionReason, ReportError};
pub use normalize::normalize_spans;
pub use table::{build_match_table, format_score};
