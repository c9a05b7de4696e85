//! Match table construction

use report_types::{Column, DetectionResult, MatchRow, MatchTable};

use crate::layout::{NOT_AVAILABLE, TABLE_COLUMNS};

/// Project a detection result into the summary table.
///
/// One row per source that has at least one match, in source order. Only the
/// first match of each source is shown.
pub fn build_match_table(result: &DetectionResult) -> MatchTable {
    let rows = result
        .sources
        .iter()
        .filter_map(|source| {
            let first = source.first_match()?;
            Some(MatchRow {
                matched_text: or_not_available(Some(first.text.as_str())),
                similarity: format_score(source.score),
                reference: or_not_available(source.url.as_deref()),
            })
        })
        .collect();

    MatchTable {
        columns: TABLE_COLUMNS
            .iter()
            .map(|(title, width)| Column::new(title, *width))
            .collect(),
        rows,
    }
}

/// Render a score with a trailing percent sign, or "N/A" when absent.
///
/// Values are not clamped: 87.0 renders as "87%", 112.5 as "112.5%".
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{}%", score),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn or_not_available(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
