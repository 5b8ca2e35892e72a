//! Column classification
//!
//! Every column is assigned exactly one [`ColumnClass`] before any transform
//! runs. The class decides which transform claims the column.

use crate::domain::{Column, ElementKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transform path chosen for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnClass {
    /// Text column: suppressed regardless of cardinality
    Text,
    /// Low-cardinality column: suppressed
    Categorical,
    /// High-cardinality numeric column: binned
    Numeric,
    /// Matches no transform; left untouched
    Unclassified,
}

impl fmt::Display for ColumnClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnClass::Text => "text",
            ColumnClass::Categorical => "categorical",
            ColumnClass::Numeric => "numeric",
            ColumnClass::Unclassified => "unclassified",
        };
        f.write_str(label)
    }
}

/// Classify a column
///
/// Checks run in priority order: text kind, then distinct count against
/// `max_categorical_size`, then numeric kind.
pub fn classify(column: &Column, max_categorical_size: usize) -> ColumnClass {
    if column.kind() == ElementKind::Text {
        ColumnClass::Text
    } else if column.distinct_count() <= max_categorical_size {
        ColumnClass::Categorical
    } else if column.kind().is_numeric() {
        ColumnClass::Numeric
    } else {
        ColumnClass::Unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bin, Value};

    #[test]
    fn test_text_ignores_cardinality() {
        let column = Column::text("name", ["a", "b", "c", "d"]);
        assert_eq!(classify(&column, 2), ColumnClass::Text);
    }

    #[test]
    fn test_low_cardinality_numeric_is_categorical() {
        let column = Column::integers("rating", [1, 2, 1, 2, 1]);
        assert_eq!(classify(&column, 2), ColumnClass::Categorical);
    }

    #[test]
    fn test_high_cardinality_numeric() {
        let column = Column::floats("income", [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(classify(&column, 3), ColumnClass::Numeric);
    }

    #[test]
    fn test_nulls_do_not_count_as_distinct() {
        let column = Column::new(
            "score",
            ElementKind::Float,
            vec![Value::Float(1.0), Value::Null, Value::Float(2.0), Value::Null],
        );
        assert_eq!(classify(&column, 2), ColumnClass::Categorical);
    }

    #[test]
    fn test_high_cardinality_ranges_are_unclassified() {
        let values = (0..5)
            .map(|i| Value::Range(Bin::new(i as f64, i as f64 + 1.0)))
            .collect();
        let column = Column::new("binned", ElementKind::Range, values);
        assert_eq!(classify(&column, 2), ColumnClass::Unclassified);
    }
}
