//! Text annotation
//!
//! Marks every occurrence of each normalized span in the content. Spans are
//! matched literally and case-insensitively against the unescaped content.
//! Each span may only claim text no earlier (longer) span has claimed, so
//! marked regions never nest or overlap. The result is a list of plain and
//! marked segments; markup escaping is applied once, per segment, when the
//! rich-text form is requested.

use std::borrow::Cow;
use std::ops::Range;

use regex::{Regex, RegexBuilder};
use report_types::Segment;

use crate::error::{Omission, OmissionReason};

/// Opening and closing tags around a marked span in rich-text markup
const MARK_OPEN: &str = r#"<font color="red"><b>"#;
const MARK_CLOSE: &str = "</b></font>";

/// Content split into plain and marked runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedText {
    segments: Vec<Segment>,
}

/// Outcome of annotating one piece of content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub text: AnnotatedText,
    /// Spans that could not be placed anywhere in the content
    pub omissions: Vec<Omission>,
}

/// Mark every occurrence of `spans` in `content`.
///
/// `spans` must already be in normalized (longest first) order; see
/// [`crate::normalize_spans`]. Occurrences keep the casing found in the
/// content, not the casing of the span.
pub fn annotate(content: &str, spans: &[&str]) -> Annotation {
    let mut claimed: Vec<Range<usize>> = Vec::new();
    let mut omissions = Vec::new();

    for span in spans {
        if span.trim().is_empty() {
            omissions.push(Omission::new(*span, OmissionReason::EmptySpan));
            continue;
        }

        let pattern = match literal_pattern(span) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::debug!("Span rejected as pattern: {}", e);
                omissions.push(Omission::new(*span, OmissionReason::PatternRejected));
                continue;
            }
        };

        let found = find_unclaimed(content, &pattern, &claimed);
        if found.is_empty() {
            if pattern.is_match(content) {
                // Every occurrence sits inside a longer marked span
                tracing::debug!("Span already covered by a longer match: {:?}", span);
            } else {
                omissions.push(Omission::new(*span, OmissionReason::NotFound));
            }
            continue;
        }

        claimed.extend(found);
        claimed.sort_by_key(|region| region.start);
    }

    tracing::debug!(
        "Annotated content: {} regions marked, {} spans omitted",
        claimed.len(),
        omissions.len()
    );

    Annotation {
        text: AnnotatedText::from_regions(content, &claimed),
        omissions,
    }
}

/// Escape the characters that are significant in rich-text markup.
///
/// Applied exactly once to any text; already-escaped entities are escaped
/// again like any other text.
pub fn escape_markup(text: &str) -> Cow<'_, str> {
    if !text.contains(|c: char| matches!(c, '&' | '<' | '>')) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Build a case-insensitive pattern matching `span` literally
fn literal_pattern(span: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(span))
        .case_insensitive(true)
        .build()
}

/// Find occurrences of `pattern` lying entirely in text not yet claimed.
///
/// `claimed` must be sorted and non-overlapping.
fn find_unclaimed(content: &str, pattern: &Regex, claimed: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let mut cursor = 0;
    let end = content.len()..content.len();

    for region in claimed.iter().chain(std::iter::once(&end)) {
        let gap = &content[cursor..region.start];
        for m in pattern.find_iter(gap) {
            if !m.is_empty() {
                found.push(cursor + m.start()..cursor + m.end());
            }
        }
        cursor = region.end;
    }

    found
}

impl AnnotatedText {
    /// Interleave plain and marked runs from sorted, disjoint regions
    fn from_regions(content: &str, regions: &[Range<usize>]) -> Self {
        let mut segments = Vec::with_capacity(regions.len() * 2 + 1);
        let mut cursor = 0;

        for region in regions {
            if region.start > cursor {
                segments.push(Segment::plain(&content[cursor..region.start]));
            }
            segments.push(Segment::marked(&content[region.clone()]));
            cursor = region.end;
        }
        if cursor < content.len() {
            segments.push(Segment::plain(&content[cursor..]));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Texts of the marked runs, in content order
    pub fn marked(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter(|segment| segment.marked)
            .map(|segment| segment.text.as_str())
    }

    /// The content with no markup, exactly as given
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|segment| segment.text.as_str()).collect()
    }

    /// Markup-safe rich text: escaped content with marked runs wrapped
    pub fn to_markup(&self) -> String {
        let mut markup = String::new();
        for segment in &self.segments {
            let escaped = escape_markup(&segment.text);
            if segment.marked {
                markup.push_str(MARK_OPEN);
                markup.push_str(&escaped);
                markup.push_str(MARK_CLOSE);
            } else {
                markup.push_str(&escaped);
            }
        }
        markup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize_spans;
    use pretty_assertions::assert_eq;

    fn mark(text: &str) -> String {
        format!("{}{}{}", MARK_OPEN, text, MARK_CLOSE)
    }

    #[test]
    fn test_no_spans_returns_escaped_content() {
        let annotation = annotate("a < b && c > d", &[]);

        assert_eq!(annotation.text.to_markup(), "a &lt; b &amp;&amp; c &gt; d");
        assert!(annotation.omissions.is_empty());
    }

    #[test]
    fn test_existing_entities_escaped_once() {
        let annotation = annotate("Fish &amp; Chips", &[]);
        assert_eq!(annotation.text.to_markup(), "Fish &amp;amp; Chips");
    }

    #[test]
    fn test_longest_first_precedence() {
        let spans = normalize_spans(["brown", "quick brown"]);
        let annotation = annotate("the quick brown fox", &spans);

        assert_eq!(
            annotation.text.segments(),
            &[
                Segment::plain("the "),
                Segment::marked("quick brown"),
                Segment::plain(" fox"),
            ]
        );
        assert_eq!(
            annotation.text.to_markup(),
            format!("the {} fox", mark("quick brown"))
        );
        // "brown" was covered, not dropped
        assert!(annotation.omissions.is_empty());
    }

    #[test]
    fn test_shorter_span_still_marks_outside_longer_region() {
        let spans = normalize_spans(["brown", "quick brown"]);
        let annotation = annotate("the quick brown fox and the brown dog", &spans);

        let marked: Vec<&str> = annotation.text.marked().collect();
        assert_eq!(marked, vec!["quick brown", "brown"]);
    }

    #[test]
    fn test_case_insensitive_keeps_content_casing() {
        let annotation = annotate("The quick brown fox", &["FOX"]);
        let marked: Vec<&str> = annotation.text.marked().collect();
        assert_eq!(marked, vec!["fox"]);
    }

    #[test]
    fn test_span_matches_literally() {
        let content = "The cost (approx.) is listed; the cost approx is not.";
        let annotation = annotate(content, &["cost (approx.)"]);

        let marked: Vec<&str> = annotation.text.marked().collect();
        assert_eq!(marked, vec!["cost (approx.)"]);
    }

    #[test]
    fn test_regex_metacharacters_do_not_widen_match() {
        let annotation = annotate("axb and a.b", &["a.b"]);
        let marked: Vec<&str> = annotation.text.marked().collect();
        assert_eq!(marked, vec!["a.b"]);
    }

    #[test]
    fn test_every_occurrence_marked() {
        let annotation = annotate("echo, echo, echo", &["echo"]);
        assert_eq!(annotation.text.marked().count(), 3);
    }

    #[test]
    fn test_markup_characters_in_span() {
        let annotation = annotate("if a<b & c then stop", &["a<b & c"]);

        assert_eq!(
            annotation.text.to_markup(),
            format!("if {} then stop", mark("a&lt;b &amp; c"))
        );
    }

    #[test]
    fn test_span_cannot_match_inside_entity() {
        // Matching against escaped text would find "amp" inside "&amp;"
        let annotation = annotate("salt & pepper", &["amp"]);

        assert_eq!(annotation.text.to_markup(), "salt &amp; pepper");
        assert_eq!(
            annotation.omissions,
            vec![Omission::new("amp", OmissionReason::NotFound)]
        );
    }

    #[test]
    fn test_unlocated_span_is_omitted_not_fatal() {
        let annotation = annotate("some content here", &["missing phrase", "content"]);

        assert_eq!(
            annotation.omissions,
            vec![Omission::new("missing phrase", OmissionReason::NotFound)]
        );
        assert_eq!(annotation.text.marked().collect::<Vec<_>>(), vec!["content"]);
    }

    #[test]
    fn test_empty_span_is_omitted() {
        let annotation = annotate("some content", &["", "  "]);

        assert_eq!(annotation.omissions.len(), 2);
        assert!(annotation
            .omissions
            .iter()
            .all(|o| o.reason == OmissionReason::EmptySpan));
        assert_eq!(annotation.text.segments(), &[Segment::plain("some content")]);
    }

    #[test]
    fn test_plain_text_round_trips_content() {
        let content = "Ünïcödé text with ünïcödé repeated";
        let annotation = annotate(content, &["ÜNÏCÖDÉ"]);

        assert_eq!(annotation.text.plain_text(), content);
        assert_eq!(annotation.text.marked().count(), 2);
    }

    #[test]
    fn test_adjacent_regions_are_separate_segments() {
        let spans = normalize_spans(["abc", "def"]);
        let annotation = annotate("abcdef", &spans);

        assert_eq!(
            annotation.text.segments(),
            &[Segment::marked("abc"), Segment::marked("def")]
        );
    }

    #[test]
    fn test_empty_content() {
        let annotation = annotate("", &["x"]);
        assert!(annotation.text.segments().is_empty());
        assert_eq!(annotation.omissions.len(), 1);
    }

    #[test]
    fn test_escape_markup_borrows_when_clean() {
        assert!(matches!(escape_markup("plain"), Cow::Borrowed(_)));
        assert_eq!(escape_markup("<&>"), "&lt;&amp;&gt;");
    }
}
