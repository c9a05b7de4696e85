//! Fixed report layout: titles, headings and table columns

/// Title shown at the top of every report
pub const REPORT_TITLE: &str = "Plagiarism Report";

/// Heading above the annotated content
pub const CONTENT_HEADING: &str = "Original Content:";

/// Vertical gap after the title and each section, in points
pub const SECTION_SPACING: u32 = 12;

/// Token substituted for missing scores, references and match texts
pub const NOT_AVAILABLE: &str = "N/A";

/// Table columns as (title, width in inches). Consumers rely on this order.
pub const TABLE_COLUMNS: [(&str, f64); 3] = [
    ("Matched Text", 3.5),
    ("Similarity (%)", 1.0),
    ("Source URL", 3.5),
];

/// Heading line for the overall score, e.g. "Overall Plagiarism: 42%"
pub fn overall_score_heading(score: f64) -> String {
    format!("Overall Plagiarism: {}%", score)
}
