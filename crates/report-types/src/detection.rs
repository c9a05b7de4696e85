//! Detection results as consumed by the report core
//!
//! These mirror the shape the detection collaborator hands over after mapping
//! the upstream service response. Scores are passed through verbatim.

use serde::{Deserialize, Serialize};

/// Complete outcome of one plagiarism-detection invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Overall plagiarism score (0-100 when the service behaves)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    /// Sources in the order the service reported them
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// One externally-identified document considered a potential origin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default)]
    pub matches: Vec<MatchSpan>,
}

/// A substring of the content reported as matching a source.
///
/// Matching is always case-insensitive; no offsets are carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub text: String,
}

impl DetectionResult {
    pub fn new(overall_score: Option<f64>, sources: Vec<Source>) -> Self {
        Self {
            overall_score,
            sources,
        }
    }

    /// True when at least one source carries a matched span
    pub fn has_matches(&self) -> bool {
        self.sources.iter().any(|source| !source.matches.is_empty())
    }

    /// Every matched text across all sources, in source then match order
    pub fn span_texts(&self) -> impl Iterator<Item = &str> {
        self.sources
            .iter()
            .flat_map(|source| source.matches.iter().map(|m| m.text.as_str()))
    }
}

impl Source {
    pub fn new(url: Option<&str>, score: Option<f64>, matches: &[&str]) -> Self {
        Self {
            url: url.map(str::to_string),
            score,
            matches: matches.iter().map(|text| MatchSpan::new(*text)).collect(),
        }
    }

    /// The first reported match, used for the summary table
    pub fn first_match(&self) -> Option<&MatchSpan> {
        self.matches.first()
    }
}

impl MatchSpan {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
