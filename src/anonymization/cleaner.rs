//! Row cleaning ahead of anonymization

use crate::anonymization::config::CleaningConfig;
use crate::domain::{Dataset, Result};
use std::collections::HashSet;

/// Dataset after cleaning plus what was removed
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningOutcome {
    /// Cleaned dataset
    pub dataset: Dataset,
    /// Rows removed as empty (or, with `drop_missing`, incomplete)
    pub missing_rows_removed: usize,
    /// Repeated rows removed
    pub duplicates_removed: usize,
}

/// Drop empty and duplicate rows
///
/// Rows are dropped when every cell is null, or when any cell is null if
/// `drop_missing` is set. Duplicate removal keeps the first occurrence.
///
/// # Errors
///
/// Only fails if the dataset's row mask cannot be applied, which indicates a
/// corrupted dataset.
pub fn clean_dataset(dataset: Dataset, config: &CleaningConfig) -> Result<CleaningOutcome> {
    let mut dataset = dataset;

    let keep: Vec<bool> = dataset
        .rows()
        .map(|row| {
            if config.drop_missing {
                !row.iter().any(|v| v.is_null())
            } else {
                !row.iter().all(|v| v.is_null())
            }
        })
        .collect();
    let missing_rows_removed = dataset.retain_rows(&keep)?;

    let duplicates_removed = if config.remove_duplicates {
        let keep: Vec<bool> = {
            let mut seen = HashSet::new();
            dataset.rows().map(|row| seen.insert(row)).collect()
        };
        dataset.retain_rows(&keep)?
    } else {
        0
    };

    tracing::debug!(
        missing_rows_removed,
        duplicates_removed,
        rows = dataset.height(),
        "Dataset cleaned"
    );

    Ok(CleaningOutcome {
        dataset,
        missing_rows_removed,
        duplicates_removed,
    })
}
