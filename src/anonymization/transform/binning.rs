//! Numeric generalization into bins
//!
//! The sorted non-null values of a column are split into `rows / bin_size`
//! contiguous, nearly equal partitions; the first `n % bins` partitions get
//! one extra value. Each partition's `(min, max)` becomes a [`Bin`] and every
//! value is replaced by the bin containing it. A value sitting on the shared
//! boundary of two bins goes to the lower one.
//!
//! When `rows < bin_size` the column becomes a single bin. The bin count is
//! also capped at the number of non-null values, so every bin is non-empty.
//! Nulls (and NaN) are never binned and come out as nulls.

use super::suppression::suppress;
use super::{ColumnChange, ColumnTransform, TransformError};
use crate::domain::{Bin, Column, ElementKind, Value};

/// Binning strategy - generalizes numbers, then suppresses sparse bins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericBinning {
    /// Target rows per bin
    pub bin_size: usize,
    /// Sensitivity threshold applied to bin labels
    pub threshold: usize,
}

impl NumericBinning {
    /// Create a new binning strategy
    pub fn new(bin_size: usize, threshold: usize) -> Self {
        Self {
            bin_size,
            threshold,
        }
    }
}

impl ColumnTransform for NumericBinning {
    fn name(&self) -> &'static str {
        "binning"
    }

    fn apply(&self, column: &mut Column) -> Result<ColumnChange, TransformError> {
        bin_numeric(column, self.bin_size, self.threshold)
    }
}

/// Number of bins for a column of `rows` rows, never zero
pub fn bin_count(rows: usize, bin_size: usize) -> usize {
    (rows / bin_size.max(1)).max(1)
}

/// Split sorted values into `num_bins` nearly equal contiguous bins
///
/// Returns no bins for empty input; `num_bins` is clamped to `1..=len`.
pub fn build_bins(sorted: &[f64], num_bins: usize) -> Vec<Bin> {
    if sorted.is_empty() {
        return Vec::new();
    }
    let num_bins = num_bins.clamp(1, sorted.len());
    let base = sorted.len() / num_bins;
    let extra = sorted.len() % num_bins;

    let mut bins = Vec::with_capacity(num_bins);
    let mut start = 0;
    for i in 0..num_bins {
        let size = base + usize::from(i < extra);
        let chunk = &sorted[start..start + size];
        bins.push(Bin::new(chunk[0], chunk[size - 1]));
        start += size;
    }
    bins
}

/// Lowest bin containing `value`
///
/// `bins` must come from [`build_bins`], so their maxima are sorted.
fn assign(bins: &[Bin], value: f64) -> Option<Bin> {
    let index = bins.partition_point(|bin| bin.max < value);
    bins.get(index).filter(|bin| bin.contains(value)).copied()
}

/// Replace each number with its bin, then suppress sparse bins
///
/// # Errors
///
/// Returns [`TransformError::NotNumeric`] for non-numeric columns; the column
/// is left untouched.
pub fn bin_numeric(
    column: &mut Column,
    bin_size: usize,
    threshold: usize,
) -> Result<ColumnChange, TransformError> {
    if !column.kind().is_numeric() {
        return Err(TransformError::NotNumeric {
            column: column.name().to_string(),
            kind: column.kind(),
        });
    }

    let mut sorted: Vec<f64> = column
        .values()
        .iter()
        .filter_map(Value::as_f64)
        .filter(|v| !v.is_nan())
        .collect();
    if sorted.is_empty() {
        return Ok(ColumnChange::default());
    }
    sorted.sort_by(f64::total_cmp);

    let bins = build_bins(&sorted, bin_count(column.len(), bin_size));
    let binned: Vec<Value> = column
        .values()
        .iter()
        .map(|value| {
            value
                .as_f64()
                .and_then(|v| assign(&bins, v))
                .map_or(Value::Null, Value::Range)
        })
        .collect();
    column.replace(ElementKind::Range, binned);

    tracing::debug!(
        column = %column.name(),
        bins = bins.len(),
        bin_size,
        "Generalized numeric column"
    );

    Ok(ColumnChange {
        cells_suppressed: suppress(column, threshold),
        bins: bins.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_count_never_zero() {
        assert_eq!(bin_count(20, 5), 4);
        assert_eq!(bin_count(22, 5), 4);
        assert_eq!(bin_count(3, 5), 1);
        assert_eq!(bin_count(0, 5), 1);
    }

    #[test]
    fn test_build_bins_extra_values_go_first() {
        let sorted: Vec<f64> = (1..=7).map(f64::from).collect();
        let bins = build_bins(&sorted, 3);
        assert_eq!(
            bins,
            vec![Bin::new(1.0, 3.0), Bin::new(4.0, 5.0), Bin::new(6.0, 7.0)]
        );
    }

    #[test]
    fn test_twenty_values_four_bins() {
        let mut column = Column::integers("age", 1..=20);
        let change = bin_numeric(&mut column, 5, 2).unwrap();

        assert_eq!(change.bins, 4);
        assert_eq!(change.cells_suppressed, 0);
        assert_eq!(column.kind(), ElementKind::Range);
        for (i, value) in column.values().iter().enumerate() {
            let start = (i / 5) * 5 + 1;
            let expected = Bin::new(start as f64, (start + 4) as f64);
            assert_eq!(value, &Value::Range(expected));
        }
    }

    #[test]
    fn test_bins_cover_original_values() {
        let original = [42.0, 3.5, 17.0, 8.25, 99.0, 3.5, 61.0, 25.0, 12.0, 70.0];
        let mut column = Column::floats("income", original);
        bin_numeric(&mut column, 3, 1).unwrap();

        for (value, input) in column.values().iter().zip(original) {
            match value {
                Value::Range(bin) => assert!(bin.contains(input)),
                other => panic!("expected a bin, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_bins_are_sorted_and_contiguous() {
        let sorted: Vec<f64> = [1.0, 1.0, 2.0, 5.0, 5.0, 5.0, 9.0, 12.0].to_vec();
        let bins = build_bins(&sorted, 3);
        for pair in bins.windows(2) {
            assert!(pair[0].min <= pair[0].max);
            assert!(pair[0].max <= pair[1].min);
        }
    }

    #[test]
    fn test_shared_boundary_goes_to_lower_bin() {
        // Partitions [1, 5] and [5, 9] share the value 5
        let mut column = Column::integers("n", [5, 1, 9, 5]);
        bin_numeric(&mut column, 2, 1).unwrap();

        let lower = Value::Range(Bin::new(1.0, 5.0));
        assert_eq!(column.get(0), Some(&lower));
        assert_eq!(column.get(3), Some(&lower));
        assert_eq!(column.get(2), Some(&Value::Range(Bin::new(5.0, 9.0))));
    }

    #[test]
    fn test_fewer_rows_than_bin_size_makes_one_bin() {
        let mut column = Column::integers("n", [4, 2, 8]);
        let change = bin_numeric(&mut column, 20, 2).unwrap();

        assert_eq!(change.bins, 1);
        let all = Value::Range(Bin::new(2.0, 8.0));
        assert!(column.values().iter().all(|v| v == &all));
    }

    #[test]
    fn test_sparse_bins_are_suppressed() {
        // Seven values, bin size 2: bins of sizes 3/2/2, then threshold 3
        let mut column = Column::integers("n", [1, 2, 3, 4, 5, 6, 7]);
        let change = bin_numeric(&mut column, 2, 3).unwrap();

        assert_eq!(change.bins, 3);
        assert_eq!(change.cells_suppressed, 4);
        assert_eq!(column.null_count(), 4);
    }

    #[test]
    fn test_nulls_stay_null() {
        let mut column = Column::new(
            "n",
            ElementKind::Float,
            vec![Value::Float(1.0), Value::Null, Value::Float(2.0), Value::Float(f64::NAN)],
        );
        bin_numeric(&mut column, 1, 1).unwrap();
        assert_eq!(column.get(1), Some(&Value::Null));
        assert_eq!(column.get(3), Some(&Value::Null));
        assert!(matches!(column.get(0), Some(Value::Range(_))));
    }

    #[test]
    fn test_text_column_is_rejected() {
        let mut column = Column::text("name", ["a", "b"]);
        let before = column.clone();
        let result = bin_numeric(&mut column, 2, 2);
        assert!(matches!(result, Err(TransformError::NotNumeric { .. })));
        assert_eq!(column, before);
    }
}
