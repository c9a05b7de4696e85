//! Templates compiled into the binary

/// Plagiarism report layout - loaded from templates/plagiarism_report.typ
const PLAGIARISM_REPORT_TEMPLATE: &str = include_str!("../../templates/plagiarism_report.typ");

/// Get an embedded template by name
pub fn get_embedded_template(name: &str) -> Option<&'static str> {
    match name {
        "plagiarism_report" => Some(PLAGIARISM_REPORT_TEMPLATE),
        _ => None,
    }
}
