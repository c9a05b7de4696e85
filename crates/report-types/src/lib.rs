pub mod detection;
pub mod document;

pub use detection::{DetectionResult, MatchSpan, Source};
pub use document::{AnnotatedDocument, Artifact, Block, Column, MatchRow, MatchTable, Segment};
