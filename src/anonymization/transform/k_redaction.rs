//! Column-set redaction
//!
//! For every combination of `k` columns, rows whose value tuple occurs exactly
//! once are jointly identifying; those `k` cells are nulled in that row.
//!
//! All combinations are evaluated against the dataset as it was before the
//! pass, so redactions made for one combination never hide or create unique
//! tuples for another. Rows holding a null in any of a combination's columns
//! do not take part in that combination.

use crate::domain::{Dataset, Value};
use itertools::Itertools;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Outcome of a k-redaction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KRedactionSummary {
    /// Column combinations examined
    pub combinations_checked: usize,
    /// (combination, row) pairs found unique
    pub unique_tuples: usize,
    /// Cells changed from a value to null
    pub cells_redacted: usize,
    /// Cells changed per column
    pub cells_by_column: BTreeMap<String, usize>,
}

/// Every combination of `k` column indices in lexicographic order
pub fn column_combinations(width: usize, k: usize) -> Vec<Vec<usize>> {
    if k == 0 || k > width {
        return Vec::new();
    }
    (0..width).combinations(k).collect()
}

/// Rows whose tuple over `columns` occurs exactly once, ascending
pub fn unique_rows(dataset: &Dataset, columns: &[usize]) -> Vec<usize> {
    let selected: Vec<&[Value]> = columns
        .iter()
        .map(|&c| dataset.columns()[c].values())
        .collect();

    let mut counts: HashMap<Vec<&Value>, (usize, usize)> = HashMap::new();
    for row in 0..dataset.height() {
        let tuple: Vec<&Value> = selected.iter().map(|values| &values[row]).collect();
        if tuple.iter().any(|v| v.is_null()) {
            continue;
        }
        counts
            .entry(tuple)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, row));
    }

    counts
        .into_values()
        .filter(|(count, _)| *count == 1)
        .map(|(_, row)| row)
        .sorted()
        .collect()
}

/// Null the cells of every jointly unique `k`-column tuple
///
/// Shape is preserved. `k` of zero, or larger than the column count, leaves
/// the dataset unchanged.
pub fn k_redact(dataset: Dataset, k: usize) -> (Dataset, KRedactionSummary) {
    let mut summary = KRedactionSummary::default();
    if dataset.height() == 0 {
        return (dataset, summary);
    }

    let mut plan: Vec<(usize, Vec<usize>)> = Vec::new();
    for combination in column_combinations(dataset.width(), k) {
        summary.combinations_checked += 1;
        let rows = unique_rows(&dataset, &combination);
        if rows.is_empty() {
            continue;
        }

        let names: Vec<&str> = combination
            .iter()
            .map(|&c| dataset.columns()[c].name())
            .collect();
        tracing::trace!(
            columns = ?names,
            rows = rows.len(),
            "Found jointly unique rows"
        );
        summary.unique_tuples += rows.len();
        plan.extend(rows.into_iter().map(|row| (row, combination.clone())));
    }

    let mut dataset = dataset;
    for (row, combination) in plan {
        for c in combination {
            let column = &mut dataset.columns_mut()[c];
            if column.set_null(row) {
                summary.cells_redacted += 1;
                *summary
                    .cells_by_column
                    .entry(column.name().to_string())
                    .or_insert(0) += 1;
            }
        }
    }

    tracing::debug!(
        k,
        combinations = summary.combinations_checked,
        unique_tuples = summary.unique_tuples,
        cells = summary.cells_redacted,
        "k-redaction finished"
    );

    (dataset, summary)
}
