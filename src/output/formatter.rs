//! Report formatters
//!
//! Provides table, JSON, CSV, and brief output formats for run
//! reports.

#![allow(dead_code)]

use std::io::Write;

use crate::models::TestOutcome;
use crate::runner::RunReport;

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Report formatter
pub struct ReportFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ReportFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a single outcome as a console line
    pub fn format_outcome(&self, outcome: &TestOutcome) -> String {
        if self.colorize {
            if outcome.passed {
                format!("\x1b[32m✓ {}: {}\x1b[0m", outcome.name, outcome.message)
            } else {
                format!("\x1b[31m✗ {}: {}\x1b[0m", outcome.name, outcome.message)
            }
        } else {
            format!("{} {}: {}", outcome.symbol(), outcome.name, outcome.message)
        }
    }

    /// Format a full run report
    pub fn format_report(&self, report: &RunReport) -> String {
        match self.format {
            OutputFormat::Table => self.format_report_table(report),
            OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
            OutputFormat::Csv => self.format_report_csv(report),
            OutputFormat::Summary => self.format_report_brief(report),
        }
    }

    fn format_report_table(&self, report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        for outcome in &report.outcomes {
            output.push_str("  ");
            output.push_str(&self.format_outcome(outcome));
            output.push('\n');
        }
        output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", report.summary.passed)
        } else {
            report.summary.passed.to_string()
        };
        let fail_str = if self.colorize && report.summary.failed > 0 {
            format!("\x1b[31m{}\x1b[0m", report.summary.failed)
        } else {
            report.summary.failed.to_string()
        };

        output.push_str(&format!(
            "  Total: {} | Pass: {} | Fail: {}\n",
            report.summary.total, pass_str, fail_str
        ));
        output.push_str(&format!(
            "  Pass Rate: {:.1}% | Duration: {}ms\n",
            report.summary.pass_rate(),
            report.duration_ms
        ));

        output
    }

    fn format_report_csv(&self, report: &RunReport) -> String {
        let mut output = String::new();
        output.push_str("name,passed,message\n");
        for outcome in &report.outcomes {
            output.push_str(&format!(
                "\"{}\",{},\"{}\"\n",
                outcome.name.replace('"', "\"\""),
                outcome.passed,
                outcome.message.replace('"', "\"\"")
            ));
        }
        output
    }

    fn format_report_brief(&self, report: &RunReport) -> String {
        format!(
            "{}/{} passed ({:.1}%) in {}ms",
            report.summary.passed,
            report.summary.total,
            report.summary.pass_rate(),
            report.duration_ms
        )
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

/// Write a report to a file
pub fn write_report_to_file(
    path: &str,
    report: &RunReport,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let formatter = ReportFormatter::new(format).no_color();
    let content = formatter.format_report(report);

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
