//! Run reporting for anonymization
//!
//! An [`AnonymizationReport`] summarizes one run: the parameters used, what
//! cleaning removed, and per column what class it got and how many cells were
//! changed by each stage. Reports never contain cell values.

use crate::anonymization::{
    classifier::ColumnClass,
    config::{PipelineParams, RedactionStrength},
    engine::{AnonymizationOutcome, ColumnAction},
    transform::KRedactionSummary,
};
use crate::domain::ElementKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Report of a single anonymization run
#[derive(Debug, Clone, Serialize)]
pub struct AnonymizationReport {
    /// When the run finished
    pub timestamp: DateTime<Utc>,

    /// Name of the input file
    pub source: String,

    /// Redaction strength the sensitivity minimum came from
    pub redaction_strength: RedactionStrength,

    /// Parameters the pipeline ran with
    pub params: Option<PipelineParams>,

    /// Rows before cleaning
    pub rows_before_cleaning: usize,

    /// Rows after cleaning (and in the output)
    pub rows_after_cleaning: usize,

    /// Rows removed for missing values
    pub missing_rows_removed: usize,

    /// Repeated rows removed
    pub duplicates_removed: usize,

    /// Columns in the output
    pub column_count: usize,

    /// Per-column results, in column order
    pub columns: Vec<ColumnReport>,

    /// k-redaction totals
    pub k_redaction: KRedactionSummary,

    /// Columns converted back to nullable integers
    pub type_repairs: Vec<String>,

    /// Columns no transform could process
    pub unprocessed: Vec<String>,

    /// Wall-clock time of the run (ms)
    pub processing_time_ms: u64,
}

/// Per-column section of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    pub name: String,
    pub original_kind: Option<ElementKind>,
    pub final_kind: ElementKind,
    pub class: ColumnClass,
    pub action: ColumnAction,
    pub cells_suppressed: usize,
    pub bins: usize,
    pub cells_k_redacted: usize,
}

impl AnonymizationReport {
    /// Start building a report for `source`
    pub fn builder(source: &str) -> ReportBuilder {
        ReportBuilder {
            report: AnonymizationReport {
                timestamp: Utc::now(),
                source: source.to_string(),
                redaction_strength: RedactionStrength::default(),
                params: None,
                rows_before_cleaning: 0,
                rows_after_cleaning: 0,
                missing_rows_removed: 0,
                duplicates_removed: 0,
                column_count: 0,
                columns: Vec::new(),
                k_redaction: KRedactionSummary::default(),
                type_repairs: Vec::new(),
                unprocessed: Vec::new(),
                processing_time_ms: 0,
            },
        }
    }

    /// Cells nulled by suppression across all columns
    pub fn total_cells_suppressed(&self) -> usize {
        self.columns.iter().map(|c| c.cells_suppressed).sum()
    }

    /// Cells nulled by any stage
    pub fn total_cells_nulled(&self) -> usize {
        self.total_cells_suppressed() + self.k_redaction.cells_redacted
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    ANONYMIZATION REPORT                       \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  Source:                {}\n", self.source));
        output.push_str(&format!(
            "  Redaction strength:    {}\n",
            self.redaction_strength
        ));
        if let Some(params) = self.params {
            output.push_str(&format!(
                "  Sensitivity minimum:   {}\n",
                params.sensitivity_minimum
            ));
            output.push_str(&format!(
                "  Max categorical size:  {}\n",
                params.max_categorical_size
            ));
            output.push_str(&format!("  Bin size:              {}\n", params.bin_size));
            output.push_str(&format!("  k:                     {}\n", params.k));
        }
        output.push_str(&format!(
            "  Rows:                  {} -> {}\n",
            self.rows_before_cleaning, self.rows_after_cleaning
        ));
        output.push_str(&format!("  Columns:               {}\n", self.column_count));
        output.push_str(&format!(
            "  Missing rows removed:  {}\n",
            self.missing_rows_removed
        ));
        output.push_str(&format!(
            "  Duplicates removed:    {}\n",
            self.duplicates_removed
        ));
        output.push_str(&format!(
            "  Cells suppressed:      {}\n",
            self.total_cells_suppressed()
        ));
        output.push_str(&format!(
            "  Cells k-redacted:      {}\n",
            self.k_redaction.cells_redacted
        ));
        output.push_str(&format!(
            "  Processing time:       {} ms\n",
            self.processing_time_ms
        ));
        output.push('\n');

        if !self.columns.is_empty() {
            output.push_str("🔍 COLUMNS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            output.push_str(&format!(
                "  {:24} {:13} {:12} {:>10} {:>6} {:>9}\n",
                "Column", "Class", "Action", "Suppressed", "Bins", "Redacted"
            ));
            for column in &self.columns {
                output.push_str(&format!(
                    "  {:24} {:13} {:12} {:>10} {:>6} {:>9}\n",
                    column.name,
                    column.class.to_string(),
                    format!("{:?}", column.action).to_lowercase(),
                    column.cells_suppressed,
                    column.bins,
                    column.cells_k_redacted
                ));
            }
            output.push('\n');
        }

        if !self.unprocessed.is_empty() || !self.type_repairs.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for name in &self.unprocessed {
                output.push_str(&format!("  • Column '{name}' was left unprocessed\n"));
            }
            for name in &self.type_repairs {
                output.push_str(&format!(
                    "  • Column '{name}' converted to nullable integers\n"
                ));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write report to file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.format_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Step-by-step construction of an [`AnonymizationReport`]
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    report: AnonymizationReport,
}

impl ReportBuilder {
    /// Record the pipeline parameters
    pub fn parameters(mut self, params: PipelineParams, strength: RedactionStrength) -> Self {
        self.report.params = Some(params);
        self.report.redaction_strength = strength;
        self
    }

    /// Record row counts before and after cleaning
    pub fn rows(mut self, before: usize, after: usize) -> Self {
        self.report.rows_before_cleaning = before;
        self.report.rows_after_cleaning = after;
        self
    }

    /// Record what cleaning removed
    pub fn cleaning(mut self, missing_rows_removed: usize, duplicates_removed: usize) -> Self {
        self.report.missing_rows_removed = missing_rows_removed;
        self.report.duplicates_removed = duplicates_removed;
        self
    }

    /// Record the pipeline outcome
    pub fn outcome(mut self, outcome: &AnonymizationOutcome) -> Self {
        let by_column = &outcome.k_redaction.cells_by_column;
        self.report.column_count = outcome.dataset.width();
        self.report.columns = outcome
            .columns
            .iter()
            .zip(outcome.dataset.columns())
            .map(|(result, column)| ColumnReport {
                name: result.name.clone(),
                original_kind: outcome.original_kinds.kind_of(&result.name),
                final_kind: column.kind(),
                class: result.class,
                action: result.action,
                cells_suppressed: result.change.cells_suppressed,
                bins: result.change.bins,
                cells_k_redacted: by_column.get(&result.name).copied().unwrap_or(0),
            })
            .collect();
        self.report.k_redaction = outcome.k_redaction.clone();
        self.report.type_repairs = outcome.type_repairs.clone();
        self.report.unprocessed = outcome.unprocessed.clone();
        self
    }

    /// Record how long the run took
    pub fn elapsed(mut self, elapsed: Duration) -> Self {
        self.report.processing_time_ms = elapsed.as_millis() as u64;
        self
    }

    /// Finish the report
    pub fn build(self) -> AnonymizationReport {
        self.report
    }
}
