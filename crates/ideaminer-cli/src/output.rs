//! Output formatting for the CLI.

use colored::*;
use ideaminer_pipeline::RunStats;
use ideaminer_validator::{ValidationReport, ValidationStatus};
use std::path::Path;

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Summary printed after an extraction run.
    pub fn format_run_summary(&self, stats: &RunStats, output_file: &Path) -> String {
        let mut out = String::new();
        out.push_str(&self.heading("Extraction complete!"));
        out.push('\n');
        out.push_str(&format!("Processed {} sources", stats.total_sources));
        if stats.sources_pending > 0 {
            out.push_str(&format!(" ({} still pending)", stats.sources_pending));
        }
        out.push('\n');
        out.push_str(&format!(
            "Extracted {} ideas ({} new)\n",
            stats.total_ideas, stats.new_ideas
        ));
        if stats.total_ideas > 0 {
            out.push_str(&format!(
                "Average confidence: {:.1}/10\n",
                stats.average_confidence
            ));
        }
        out.push_str(&format!(
            "Processing time: {:.2} seconds\n",
            stats.elapsed.as_secs_f64()
        ));
        out.push_str(&format!("Results saved to {}", output_file.display()));
        out
    }

    /// One-line verdict for a validation report.
    pub fn format_validation(&self, report: &ValidationReport) -> String {
        let verdict = match report.status() {
            ValidationStatus::Passed => "Validation passed".to_string(),
            ValidationStatus::PassedWithWarnings => format!(
                "Validation passed with {} duplicate title warning(s)",
                report.duplicate_titles.len()
            ),
            ValidationStatus::Failed => format!(
                "Validation failed: {} duplicate id(s), {} idea(s) without id",
                report.duplicate_ids.len(),
                report.missing_ids.len()
            ),
        };

        if !self.color_enabled {
            return verdict;
        }
        match report.status() {
            ValidationStatus::Passed => verdict.green().to_string(),
            ValidationStatus::PassedWithWarnings => verdict.yellow().to_string(),
            ValidationStatus::Failed => verdict.red().to_string(),
        }
    }

    /// Message for a run or validation that could not complete.
    pub fn format_error(&self, message: &str) -> String {
        let text = format!("Error: {}", message);
        if self.color_enabled {
            text.red().to_string()
        } else {
            text
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().green().to_string()
        } else {
            text.to_string()
        }
    }
}
