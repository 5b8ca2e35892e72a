//! Rare value suppression

use super::{ColumnChange, ColumnTransform, TransformError};
use crate::domain::{Column, Value};
use std::collections::HashSet;

/// Suppression strategy - nulls values seen fewer than `threshold` times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suppression {
    /// Sensitivity threshold
    pub threshold: usize,
}

impl Suppression {
    /// Create a new suppression strategy
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }
}

impl ColumnTransform for Suppression {
    fn name(&self) -> &'static str {
        "suppression"
    }

    fn apply(&self, column: &mut Column) -> Result<ColumnChange, TransformError> {
        Ok(ColumnChange {
            cells_suppressed: suppress(column, self.threshold),
            bins: 0,
        })
    }
}

/// Values occurring strictly fewer than `threshold` times
pub fn sensitive_values(column: &Column, threshold: usize) -> HashSet<Value> {
    column
        .value_counts()
        .into_iter()
        .filter(|(_, count)| *count < threshold)
        .map(|(value, _)| value.clone())
        .collect()
}

/// Null every value occurring fewer than `threshold` times
///
/// Nulls are never counted. Returns the number of cells nulled.
pub fn suppress(column: &mut Column, threshold: usize) -> usize {
    let targets = sensitive_values(column, threshold);
    let suppressed = column.null_matching(&targets);

    if suppressed > 0 {
        tracing::debug!(
            column = %column.name(),
            threshold,
            distinct_values = targets.len(),
            cells = suppressed,
            "Suppressed rare values"
        );
    }

    suppressed
}
