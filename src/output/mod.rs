//! Output formatting and display for pdftoolkit.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Operation and document summaries
//! - Quiet and verbose modes
//!
//! Diagnostic logging is separate and goes through `tracing`.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::config::Config;
use crate::ops::OperationReport;
use crate::validation::DocumentInfo;

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Display the outcome of a document operation.
pub fn display_report(formatter: &OutputFormatter, report: &OperationReport) {
    formatter.debug(&format!(
        "Loaded {} file(s) in {:.2}s ({})",
        report.sources.len(),
        report.load_time.as_secs_f64(),
        report.format_input_size()
    ));

    match &report.output {
        Some(stats) => {
            formatter.success(&format!(
                "{}: wrote {} page(s) to {} ({})",
                capitalize(&report.kind.to_string()),
                report.page_count,
                stats.output_path.display(),
                stats.format_file_size()
            ));
            formatter.detail(
                "Write time",
                &format!("{:.2}s", stats.write_time.as_secs_f64()),
            );
        }
        None => {
            formatter.success(&format!(
                "Dry run: {} would produce {} page(s)",
                report.kind, report.page_count
            ));
        }
    }

    formatter.detail("Total time", &format!("{:.2}s", report.elapsed.as_secs_f64()));
}

/// Display the metadata summary of one document.
pub fn display_document_info(formatter: &OutputFormatter, info: &DocumentInfo) {
    formatter.info(&format!("{}: {}", info.path.display(), info.preview()));

    if let Some((major, minor)) = info.version {
        formatter.detail("Version", &format!("{major}.{minor}"));
    }
    if let Some((width, height)) = info.page_dimensions {
        formatter.detail("Page size", &format!("{width:.0} x {height:.0} pt"));
    }
    formatter.detail("Objects", &info.object_count.to_string());
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
