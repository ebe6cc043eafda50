//! Output formatting for harness reports

mod formatter;

pub use formatter::{write_report_to_file, OutputFormat, ReportFormatter};
