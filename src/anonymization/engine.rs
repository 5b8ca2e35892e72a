//! Anonymization pipeline
//!
//! This module provides the pipeline stages and the [`AnonymizationEngine`]
//! that runs them end to end.
//!
//! # Stages
//!
//! 1. Every column is classified once ([`classify`]).
//! 2. Text columns, then categorical columns, are suppressed.
//! 3. Numeric columns are binned; a binning failure leaves the column
//!    unprocessed.
//! 4. Whatever is left is reported unprocessed.
//! 5. k-redaction runs over the whole dataset.
//! 6. Integer columns that gained nulls are reported as type repairs, using
//!    the kinds recorded before step 1.
//!
//! # Examples
//!
//! ```
//! use kredact::anonymization::engine::anonymize_dataset;
//! use kredact::anonymization::config::AnonymizationConfig;
//! use kredact::domain::{Column, Dataset};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = Dataset::new(vec![
//!     Column::text("city", ["Oslo", "Oslo", "Rome"]),
//!     Column::integers("age", [30, 30, 41]),
//! ])?;
//!
//! let outcome = anonymize_dataset(dataset, &AnonymizationConfig::default().params());
//! assert!(outcome.unprocessed.is_empty());
//! # Ok(())
//! # }
//! ```

use crate::adapters::FileMetadata;
use crate::anonymization::{
    audit::AuditLogger,
    classifier::{classify, ColumnClass},
    cleaner::clean_dataset,
    config::{AnonymizationConfig, CleaningConfig, PipelineParams},
    report::AnonymizationReport,
    transform::{
        k_redact, ColumnChange, ColumnTransform, KRedactionSummary, NumericBinning, Suppression,
    },
};
use crate::domain::{Dataset, ElementKind, KindManifest, Result};
use crate::{log_run_complete, log_run_start};
use serde::Serialize;
use std::time::Instant;

/// What the pipeline did to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAction {
    /// Rare values suppressed
    Suppressed,
    /// Generalized into bins
    Binned,
    /// Left untouched
    Unprocessed,
}

/// Per-column result of the classify-and-transform stages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnOutcome {
    /// Column name
    pub name: String,
    /// Classification computed before any transform
    pub class: ColumnClass,
    /// Transform applied
    pub action: ColumnAction,
    /// Cells and bins changed
    pub change: ColumnChange,
}

/// Result of the classify-and-transform stages
#[derive(Debug, Clone)]
pub struct StageOutcome {
    /// Transformed dataset
    pub dataset: Dataset,
    /// Columns left untouched, in column order
    pub unprocessed: Vec<String>,
    /// Per-column results, in column order
    pub columns: Vec<ColumnOutcome>,
}

/// Result of the full anonymizer
#[derive(Debug, Clone)]
pub struct AnonymizationOutcome {
    /// Anonymized dataset
    pub dataset: Dataset,
    /// Columns left untouched by the column stages, in column order
    pub unprocessed: Vec<String>,
    /// Per-column results of the column stages
    pub columns: Vec<ColumnOutcome>,
    /// k-redaction totals
    pub k_redaction: KRedactionSummary,
    /// Columns converted back to nullable integers
    pub type_repairs: Vec<String>,
    /// Kinds recorded before anonymization
    pub original_kinds: KindManifest,
}

/// Classify every column and apply its transform
///
/// Each column is claimed by at most one transform. Empty datasets are
/// returned unchanged with nothing unprocessed.
pub fn anonymize(dataset: Dataset, params: &PipelineParams) -> StageOutcome {
    if dataset.is_empty() {
        return StageOutcome {
            dataset,
            unprocessed: Vec::new(),
            columns: Vec::new(),
        };
    }

    let mut dataset = dataset;
    let classes: Vec<ColumnClass> = dataset
        .columns()
        .iter()
        .map(|column| classify(column, params.max_categorical_size))
        .collect();

    let suppression = Suppression::new(params.sensitivity_minimum);
    let binning = NumericBinning::new(params.bin_size, params.sensitivity_minimum);
    let mut outcomes: Vec<Option<ColumnOutcome>> = vec![None; classes.len()];

    for stage in [ColumnClass::Text, ColumnClass::Categorical, ColumnClass::Numeric] {
        let transform: &dyn ColumnTransform = match stage {
            ColumnClass::Numeric => &binning,
            _ => &suppression,
        };
        for (index, class) in classes.iter().enumerate() {
            if *class != stage {
                continue;
            }
            let column = &mut dataset.columns_mut()[index];
            let (action, change) = match transform.apply(column) {
                Ok(change) if stage == ColumnClass::Numeric => (ColumnAction::Binned, change),
                Ok(change) => (ColumnAction::Suppressed, change),
                Err(e) => {
                    tracing::warn!(column = %column.name(), error = %e, "Column left unprocessed");
                    (ColumnAction::Unprocessed, ColumnChange::default())
                }
            };
            tracing::debug!(
                column = %column.name(),
                class = %class,
                transform = transform.name(),
                cells = change.cells_suppressed,
                "Column processed"
            );
            outcomes[index] = Some(ColumnOutcome {
                name: column.name().to_string(),
                class: *class,
                action,
                change,
            });
        }
    }

    let columns: Vec<ColumnOutcome> = outcomes
        .into_iter()
        .zip(dataset.columns())
        .zip(&classes)
        .map(|((outcome, column), class)| {
            outcome.unwrap_or_else(|| ColumnOutcome {
                name: column.name().to_string(),
                class: *class,
                action: ColumnAction::Unprocessed,
                change: ColumnChange::default(),
            })
        })
        .collect();

    let unprocessed = columns
        .iter()
        .filter(|c| c.action == ColumnAction::Unprocessed)
        .map(|c| c.name.clone())
        .collect();

    StageOutcome {
        dataset,
        unprocessed,
        columns,
    }
}

/// Report integer columns that gained gaps
///
/// Columns recorded as `Integer` are relabelled `NullableInteger` when a
/// cell is nulled; cell values are never touched. Returns the names of
/// those columns.
pub fn repair_types(dataset: &Dataset, original: &KindManifest) -> Vec<String> {
    let mut repaired = Vec::new();
    for column in dataset.columns() {
        if original.kind_of(column.name()) != Some(ElementKind::Integer) {
            continue;
        }
        if column.kind() == ElementKind::NullableInteger {
            repaired.push(column.name().to_string());
        }
    }
    repaired
}

/// Run the column stages, k-redaction and type repair
pub fn anonymize_dataset(dataset: Dataset, params: &PipelineParams) -> AnonymizationOutcome {
    let original_kinds = dataset.kind_manifest();

    let stage = anonymize(dataset, params);
    let (dataset, k_redaction) = k_redact(stage.dataset, params.k);
    let type_repairs = repair_types(&dataset, &original_kinds);

    AnonymizationOutcome {
        dataset,
        unprocessed: stage.unprocessed,
        columns: stage.columns,
        k_redaction,
        type_repairs,
        original_kinds,
    }
}

/// Dataset produced by [`AnonymizationEngine::process`]
#[derive(Debug, Clone)]
pub struct ProcessedDataset {
    /// Cleaned and anonymized dataset
    pub dataset: Dataset,
    /// Columns left untouched
    pub unprocessed: Vec<String>,
    /// Run report
    pub report: AnonymizationReport,
}

/// Main anonymization engine
///
/// Runs cleaning, the anonymization pipeline and audit logging.
///
/// # Examples
///
/// ```no_run
/// use kredact::anonymization::{AnonymizationEngine, config::{AnonymizationConfig, CleaningConfig}};
/// use kredact::adapters::{load_dataset};
///
/// # fn example() -> kredact::domain::Result<()> {
/// let bytes = std::fs::read("people.csv")?;
/// let loaded = load_dataset(&bytes, "people.csv")?;
///
/// let engine = AnonymizationEngine::new(AnonymizationConfig::default(), CleaningConfig::default())?;
/// let processed = engine.process(loaded.dataset, &loaded.metadata)?;
/// println!("{}", processed.report.format_console());
/// # Ok(())
/// # }
/// ```
pub struct AnonymizationEngine {
    config: AnonymizationConfig,
    cleaning: CleaningConfig,
    audit_logger: Option<AuditLogger>,
}

impl AnonymizationEngine {
    /// Create a new anonymization engine
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the audit log
    /// directory cannot be created.
    pub fn new(config: AnonymizationConfig, cleaning: CleaningConfig) -> Result<Self> {
        config.validate()?;

        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
            )?)
        } else {
            None
        };

        Ok(Self {
            config,
            cleaning,
            audit_logger,
        })
    }

    /// Pipeline parameters in use
    pub fn params(&self) -> PipelineParams {
        self.config.params()
    }

    /// Clean and anonymize a dataset
    ///
    /// # Errors
    ///
    /// Returns an error if cleaning hits a malformed dataset or the audit
    /// entry cannot be written.
    pub fn process(&self, dataset: Dataset, source: &FileMetadata) -> Result<ProcessedDataset> {
        let start = Instant::now();
        let params = self.params();
        let rows_before = dataset.height();
        log_run_start!(&source.file_name, rows_before, dataset.width());

        let cleaning = clean_dataset(dataset, &self.cleaning)?;
        let rows_after = cleaning.dataset.height();
        let missing_rows_removed = cleaning.missing_rows_removed;
        let duplicates_removed = cleaning.duplicates_removed;

        let outcome = anonymize_dataset(cleaning.dataset, &params);
        if !outcome.unprocessed.is_empty() {
            tracing::warn!(columns = ?outcome.unprocessed, "Columns left unprocessed");
        }

        let report = AnonymizationReport::builder(&source.file_name)
            .parameters(params, self.config.redaction_strength)
            .rows(rows_before, rows_after)
            .cleaning(missing_rows_removed, duplicates_removed)
            .outcome(&outcome)
            .elapsed(start.elapsed())
            .build();

        if let Some(ref logger) = self.audit_logger {
            logger.log_run(&report, source.digest.as_deref())?;
        }

        log_run_complete!(report.total_cells_nulled(), start.elapsed());

        Ok(ProcessedDataset {
            dataset: outcome.dataset,
            unprocessed: outcome.unprocessed,
            report,
        })
    }
}
