//! Audit logger for anonymization runs

use crate::anonymization::report::AnonymizationReport;
use crate::domain::{KredactError, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    source: String,
    /// SHA-256 of the input file bytes
    input_sha256: Option<String>,
    rows_before: usize,
    rows_after: usize,
    column_count: usize,
    redaction_strength: String,
    k: Option<usize>,
    cells_suppressed: usize,
    cells_k_redacted: usize,
    processing_time_ms: u64,
    columns: Vec<AuditColumn>,
    unprocessed: Vec<String>,
}

/// Audit column entry (names and counts only, never cell values)
#[derive(Debug, Serialize)]
struct AuditColumn {
    name: String,
    class: String,
    action: String,
    cells_nulled: usize,
}

/// Hash input bytes using SHA-256
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Audit logger for anonymization runs
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
}

impl AuditLogger {
    /// Create a new audit logger, creating the log directory if needed
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                KredactError::Io(format!(
                    "Failed to create audit log directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        Ok(Self {
            log_path,
            json_format,
        })
    }

    /// Append one entry describing a finished run
    ///
    /// `input_digest` is the SHA-256 of the input bytes when known.
    pub fn log_run(&self, report: &AnonymizationReport, input_digest: Option<&str>) -> Result<()> {
        let entry = AuditLogEntry {
            timestamp: report.timestamp.to_rfc3339(),
            source: report.source.clone(),
            input_sha256: input_digest.map(str::to_string),
            rows_before: report.rows_before_cleaning,
            rows_after: report.rows_after_cleaning,
            column_count: report.column_count,
            redaction_strength: report.redaction_strength.to_string(),
            k: report.params.map(|p| p.k),
            cells_suppressed: report.total_cells_suppressed(),
            cells_k_redacted: report.k_redaction.cells_redacted,
            processing_time_ms: report.processing_time_ms,
            columns: report
                .columns
                .iter()
                .map(|c| AuditColumn {
                    name: c.name.clone(),
                    class: c.class.to_string(),
                    action: format!("{:?}", c.action).to_lowercase(),
                    cells_nulled: c.cells_suppressed + c.cells_k_redacted,
                })
                .collect(),
            unprocessed: report.unprocessed.clone(),
        };

        self.write_entry(&entry)
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                KredactError::Io(format!(
                    "Failed to open audit log {}: {e}",
                    self.log_path.display()
                ))
            })?;

        if self.json_format {
            let json_line = serde_json::to_string(entry)?;
            writeln!(file, "{json_line}")?;
        } else {
            writeln!(
                file,
                "[{}] Source: {} | SHA-256: {} | Rows: {} -> {} | Columns: {} | Strength: {} | Suppressed: {} | k-redacted: {} | Unprocessed: [{}] | Time: {}ms",
                entry.timestamp,
                entry.source,
                entry.input_sha256.as_deref().unwrap_or("-"),
                entry.rows_before,
                entry.rows_after,
                entry.column_count,
                entry.redaction_strength,
                entry.cells_suppressed,
                entry.cells_k_redacted,
                entry.unprocessed.join(", "),
                entry.processing_time_ms
            )?;
        }

        Ok(())
    }
}
