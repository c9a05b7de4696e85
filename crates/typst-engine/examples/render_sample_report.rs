//! Example: Render a sample plagiarism report
//!
//! Run with:
//!   cargo run -p typst-engine --example render_sample_report
//!
//! The PDF is written to `output/sample_plagiarism_report.pdf`.

use std::fs;
use std::path::Path;

use report_core::ReportComposer;
use report_types::{DetectionResult, Source};
use typst_engine::TypstBackend;

const CONTENT: &str = "Lorem Ipsum is simply dummy text of the printing and typesetting \
industry. Lorem Ipsum has been the industry's standard dummy text ever since the 1500s, \
when an unknown printer took a galley of type and scrambled it to make a type specimen \
book. It has survived not only five centuries, but also the leap into electronic \
typesetting, remaining essentially unchanged.";

fn main() {
    let output_dir = Path::new("output");
    fs::create_dir_all(output_dir).expect("Failed to create output directory");

    let result = DetectionResult::new(
        Some(64.0),
        vec![
            Source::new(
                Some("https://www.lipsum.com/"),
                Some(87.0),
                &["Lorem Ipsum is simply dummy text", "galley of type"],
            ),
            Source::new(
                Some("https://en.wikipedia.org/wiki/Lorem_ipsum"),
                Some(41.5),
                &["survived not only five centuries"],
            ),
            Source::new(None, None, &["a passage that is not in the text"]),
        ],
    );

    let composer = ReportComposer::new(TypstBackend::new());
    let report = composer
        .generate(CONTENT, &result)
        .expect("Failed to render report");

    let path = output_dir.join("sample_plagiarism_report.pdf");
    fs::write(&path, &report.artifact.bytes).expect("Failed to write PDF");

    println!(
        "Wrote {} ({} pages, {} bytes)",
        path.display(),
        report.artifact.page_count,
        report.artifact.bytes.len()
    );
    for omission in &report.omissions {
        println!("  omitted {:?}: {}", omission.span, omission.reason);
    }
}
