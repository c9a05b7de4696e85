//! Span normalization
//!
//! Highlighting claims text longest span first, so a short span never splits
//! or re-marks a region a longer span already owns.

use std::collections::HashSet;

/// De-duplicate span texts and order them by character length, longest first.
///
/// Equal-length spans keep their first-seen order. Exact duplicates are
/// dropped before sorting; spans differing only in case are kept, the later
/// one simply finds nothing left to claim.
pub fn normalize_spans<'a, I>(spans: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut distinct: Vec<&'a str> = spans.into_iter().filter(|span| seen.insert(*span)).collect();

    // sort_by_key is stable
    distinct.sort_by_key(|span| std::cmp::Reverse(span.chars().count()));
    distinct
}
