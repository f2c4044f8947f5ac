//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use concall_pipeline::{EntryOutcome, RunSummary};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the result of a run.
    pub fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_summary_json(summary),
            OutputFormat::Table => Ok(self.format_summary_table(summary)),
            OutputFormat::Quiet => Ok(self.format_summary_quiet(summary)),
        }
    }

    fn format_summary_json(&self, summary: &RunSummary) -> Result<String> {
        let entries: Vec<serde_json::Value> = summary
            .reports
            .iter()
            .map(|report| {
                serde_json::json!({
                    "subject": report.subject_id,
                    "outcome": report.outcome.kind(),
                    "detail": report.outcome.to_string(),
                    "artifact": report.outcome.artifact().map(|p| p.display().to_string()),
                })
            })
            .collect();

        let value = serde_json::json!({
            "total": summary.total,
            "completed": summary.completed,
            "already_processed": summary.already_processed,
            "unsupported": summary.unsupported,
            "resolution_failed": summary.resolution_failed,
            "extraction_failed": summary.extraction_failed,
            "persist_failed": summary.persist_failed,
            "mark_failed": summary.mark_failed,
            "forward_failed": summary.forward_failed,
            "elapsed_secs": summary.elapsed.as_secs_f64(),
            "entries": entries,
        });

        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        if summary.reports.is_empty() {
            return self.colorize("No entries to process.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Subject", "Outcome", "Detail"]);
        for report in &summary.reports {
            builder.push_record([
                report.subject_id.clone(),
                report.outcome.kind().to_string(),
                report.outcome.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let tally = if summary.total_failed() > 0 {
            self.warning(&summary.tally())
        } else {
            self.success(&summary.tally())
        };

        format!("{}\n{}", table, tally)
    }

    /// Subjects completed in this run, one per line.
    fn format_summary_quiet(&self, summary: &RunSummary) -> String {
        summary
            .reports
            .iter()
            .filter(|report| matches!(report.outcome, EntryOutcome::Completed { .. }))
            .map(|report| report.subject_id.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the processed set.
    pub fn format_subjects(&self, subjects: &[&str]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(subjects)?),
            OutputFormat::Quiet => Ok(subjects.join("\n")),
            OutputFormat::Table => {
                if subjects.is_empty() {
                    return Ok(self.colorize("No processed subjects.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Subject"]);
                for (idx, subject) in subjects.iter().enumerate() {
                    builder.push_record([(idx + 1).to_string(), subject.to_string()]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// A stderr notice when entries failed, for the table format only
    pub fn failure_notice(&self, summary: &RunSummary) -> Option<String> {
        if self.format != OutputFormat::Table || summary.total_failed() == 0 {
            return None;
        }
        Some(self.error(&format!(
            "{} of {} entries failed; see the log for details",
            summary.total_failed(),
            summary.total
        )))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
