//! Report composition
//!
//! Block order is fixed:
//!
//! 1. title
//! 2. "Original Content:" heading, annotated text, spacing (only with content
//!    and at least one source that has matches)
//! 3. overall score heading (only when the result carries one)
//! 4. match table (always, header-only when empty)

use report_types::{AnnotatedDocument, Artifact, Block, DetectionResult};

use crate::annotate::annotate;
use crate::backend::RenderBackend;
use crate::error::{Omission, ReportError};
use crate::layout::{
    overall_score_heading, CONTENT_HEADING, REPORT_TITLE, SECTION_SPACING,
};
use crate::normalize::normalize_spans;
use crate::table::build_match_table;

/// Assembles reports and hands them to a rendering backend
#[derive(Debug, Clone)]
pub struct ReportComposer<B> {
    backend: B,
}

/// A composed document before rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub document: AnnotatedDocument,
    /// Matched spans that were dropped from the annotated text
    pub omissions: Vec<Omission>,
}

/// A rendered report and the spans it had to leave out
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub artifact: Artifact,
    pub omissions: Vec<Omission>,
}

impl<B: RenderBackend> ReportComposer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Build the ordered document for `content` and `result` without rendering
    pub fn compose(&self, content: &str, result: &DetectionResult) -> Composition {
        let mut blocks = vec![
            Block::Title {
                text: REPORT_TITLE.to_string(),
            },
            spacer(),
        ];
        let mut omissions = Vec::new();

        if !content.is_empty() && result.has_matches() {
            let spans = normalize_spans(result.span_texts());
            let annotation = annotate(content, &spans);
            omissions = annotation.omissions;

            blocks.push(Block::Heading {
                text: CONTENT_HEADING.to_string(),
                level: 2,
            });
            blocks.push(Block::Annotated {
                markup: annotation.text.to_markup(),
                segments: annotation.text.into_segments(),
            });
            blocks.push(spacer());
        }

        if let Some(score) = result.overall_score {
            blocks.push(Block::Heading {
                text: overall_score_heading(score),
                level: 3,
            });
            blocks.push(spacer());
        }

        blocks.push(Block::Table(build_match_table(result)));

        Composition {
            document: AnnotatedDocument { blocks },
            omissions,
        }
    }

    /// Compose and render a report.
    ///
    /// Any backend failure aborts the whole report; no partial artifact is
    /// returned.
    pub fn generate(
        &self,
        content: &str,
        result: &DetectionResult,
    ) -> Result<GeneratedReport, ReportError> {
        let composition = self.compose(content, result);

        let artifact = self
            .backend
            .render(&composition.document)
            .map_err(ReportError::rendering)?;

        if !composition.omissions.is_empty() {
            tracing::warn!(
                "Report generated with {} matched spans omitted",
                composition.omissions.len()
            );
        }

        Ok(GeneratedReport {
            artifact,
            omissions: composition.omissions,
        })
    }
}

impl GeneratedReport {
    /// True when every matched span made it into the annotated text
    pub fn is_complete(&self) -> bool {
        self.omissions.is_empty()
    }
}

fn spacer() -> Block {
    Block::Spacer {
        points: SECTION_SPACING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OmissionReason;
    use pretty_assertions::assert_eq;
    use report_types::{MatchRow, Segment, Source};
    use std::sync::Mutex;

    /// Backend that records what it was given
    #[derive(Default)]
    struct RecordingBackend {
        rendered: Mutex<Vec<AnnotatedDocument>>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("backend exploded")]
    struct Exploded;

    struct FailingBackend;

    impl RenderBackend for RecordingBackend {
        type Error = Exploded;

        fn render(&self, document: &AnnotatedDocument) -> Result<Artifact, Self::Error> {
            self.rendered.lock().unwrap().push(document.clone());
            Ok(Artifact {
                bytes: b"%PDF-fake".to_vec(),
                mime_type: "application/pdf".to_string(),
                page_count: 1,
            })
        }
    }

    impl RenderBackend for FailingBackend {
        type Error = Exploded;

        fn render(&self, _document: &AnnotatedDocument) -> Result<Artifact, Self::Error> {
            Err(Exploded)
        }
    }

    const LOREM: &str = "Lorem Ipsum is simply dummy text of the printing and typesetting \
        industry. It has been the industry's standard dummy text ever since the 1500s, when \
        an unknown printer took a galley of type and scrambled it to make a type specimen \
        book. It has survived not only five centuries, but also the leap into electronic \
        typesetting, remaining essentially unchanged.";

    fn kinds(document: &AnnotatedDocument) -> Vec<&'static str> {
        document
            .blocks
            .iter()
            .map(|block| match block {
                Block::Title { .. } => "title",
                Block::Heading { .. } => "heading",
                Block::Annotated { .. } => "annotated",
                Block::Spacer { .. } => "spacer",
                Block::Table(_) => "table",
            })
            .collect()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let result = DetectionResult::new(
            Some(42.0),
            vec![Source::new(
                Some("https://example.com"),
                Some(87.0),
                &["Lorem Ipsum is simply dummy text"],
            )],
        );
        let composer = ReportComposer::new(RecordingBackend::default());

        let report = composer.generate(LOREM, &result).unwrap();
        assert!(report.is_complete());

        let rendered = composer.backend().rendered.lock().unwrap();
        let document = &rendered[0];

        assert_eq!(
            kinds(document),
            vec!["title", "spacer", "heading", "annotated", "spacer", "heading", "spacer", "table"]
        );
        assert_eq!(
            document.headings(),
            vec!["Original Content:", "Overall Plagiarism: 42%"]
        );

        let Some(Block::Annotated { segments, .. }) = document.blocks.get(3) else {
            panic!("expected annotated block");
        };
        let marked: Vec<&Segment> = segments.iter().filter(|s| s.marked).collect();
        assert_eq!(marked, vec![&Segment::marked("Lorem Ipsum is simply dummy text")]);

        assert_eq!(
            document.table().unwrap().rows,
            vec![MatchRow {
                matched_text: "Lorem Ipsum is simply dummy text".to_string(),
                similarity: "87%".to_string(),
                reference: "https://example.com".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_result_has_title_and_header_only_table() {
        let composer = ReportComposer::new(RecordingBackend::default());
        let composition = composer.compose(LOREM, &DetectionResult::default());

        assert_eq!(kinds(&composition.document), vec!["title", "spacer", "table"]);
        assert!(composition.document.table().unwrap().rows.is_empty());
        assert!(!composition.document.has_annotated_text());
        assert!(composition.document.headings().is_empty());
    }

    #[test]
    fn test_sources_without_matches_skip_content_block() {
        let result = DetectionResult::new(
            Some(0.0),
            vec![Source::new(Some("https://example.com"), Some(0.0), &[])],
        );
        let composer = ReportComposer::new(RecordingBackend::default());

        let composition = composer.compose(LOREM, &result);

        assert_eq!(
            kinds(&composition.document),
            vec!["title", "spacer", "heading", "spacer", "table"]
        );
        assert_eq!(composition.document.headings(), vec!["Overall Plagiarism: 0%"]);
    }

    #[test]
    fn test_empty_content_skips_content_block() {
        let result = DetectionResult::new(None, vec![Source::new(None, None, &["Lorem"])]);
        let composer = ReportComposer::new(RecordingBackend::default());

        let composition = composer.compose("", &result);

        assert!(!composition.document.has_annotated_text());
        assert_eq!(composition.document.table().unwrap().rows.len(), 1);
    }

    #[test]
    fn test_spans_from_all_sources_are_annotated() {
        let result = DetectionResult::new(
            None,
            vec![
                Source::new(None, None, &["Lorem Ipsum"]),
                Source::new(None, None, &["galley of type", "five centuries"]),
            ],
        );
        let composer = ReportComposer::new(RecordingBackend::default());

        let composition = composer.compose(LOREM, &result);

        let Some(Block::Annotated { segments, markup }) = composition
            .document
            .blocks
            .iter()
            .find(|b| matches!(b, Block::Annotated { .. }))
        else {
            panic!("expected annotated block");
        };
        let marked: Vec<&str> = segments
            .iter()
            .filter(|s| s.marked)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(marked, vec!["Lorem Ipsum", "galley of type", "five centuries"]);
        assert!(markup.contains(r#"<font color="red"><b>galley of type</b></font>"#));
    }

    #[test]
    fn test_unlocated_span_reported_as_omission() {
        let result = DetectionResult::new(
            Some(12.0),
            vec![Source::new(
                Some("https://example.com"),
                Some(12.0),
                &["not in the content at all", "dummy text"],
            )],
        );
        let composer = ReportComposer::new(RecordingBackend::default());

        let report = composer.generate(LOREM, &result).unwrap();

        assert!(!report.is_complete());
        assert_eq!(
            report.omissions,
            vec![Omission::new("not in the content at all", OmissionReason::NotFound)]
        );
        // The table still reports what the service found
        let rendered = composer.backend().rendered.lock().unwrap();
        assert_eq!(
            rendered[0].table().unwrap().rows[0].matched_text,
            "not in the content at all"
        );
    }

    #[test]
    fn test_backend_failure_is_report_error() {
        let composer = ReportComposer::new(FailingBackend);
        let result = DetectionResult::new(Some(1.0), vec![]);

        let err = composer.generate(LOREM, &result).unwrap_err();

        assert!(matches!(err, ReportError::Rendering { .. }));
        assert_eq!(err.to_string(), "Rendering failed: backend exploded");
    }
}
