//! Tabular dataset model
//!
//! A [`Dataset`] is an ordered list of named [`Column`]s of equal length.
//! Row `i` of every column belongs to the same record.
//!
//! # Integer storage
//!
//! [`ElementKind::Integer`] columns carry no gaps. Nulling a cell of such a
//! column relabels it [`ElementKind::NullableInteger`]; the surviving
//! [`Value::Int`] cells are kept as they are, so integers beyond the exact
//! range of `f64` are never altered.

use super::errors::DatasetError;
use super::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Declared element kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Integers without gaps
    Integer,
    /// Integers with gaps
    NullableInteger,
    /// Floating point numbers
    Float,
    /// Booleans
    Boolean,
    /// Text / object values
    Text,
    /// Generalized `(min, max)` ranges
    Range,
}

impl ElementKind {
    /// Whether values of this kind can be binned
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ElementKind::Integer | ElementKind::NullableInteger | ElementKind::Float
        )
    }

    /// Infer the kind of a sequence of raw values
    ///
    /// All-integer columns are `Integer` (or `NullableInteger` with gaps),
    /// numeric mixes are `Float`, all-boolean columns are `Boolean`. Anything
    /// else, including a column with no values at all, is `Text`.
    pub fn infer(values: &[Value]) -> ElementKind {
        let mut has_null = false;
        let mut seen_any = false;
        let (mut ints, mut floats, mut bools, mut ranges, mut other) = (false, false, false, false, false);

        for value in values {
            match value {
                Value::Null => has_null = true,
                Value::Int(_) => ints = true,
                Value::Float(_) => floats = true,
                Value::Bool(_) => bools = true,
                Value::Range(_) => ranges = true,
                Value::Text(_) => other = true,
            }
            seen_any |= !value.is_null();
        }

        if !seen_any || other {
            return ElementKind::Text;
        }
        match (ints, floats, bools, ranges) {
            (true, false, false, false) if has_null => ElementKind::NullableInteger,
            (true, false, false, false) => ElementKind::Integer,
            (_, true, false, false) => ElementKind::Float,
            (false, false, true, false) => ElementKind::Boolean,
            (false, false, false, true) => ElementKind::Range,
            _ => ElementKind::Text,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ElementKind::Integer => "integer",
            ElementKind::NullableInteger => "nullable_integer",
            ElementKind::Float => "float",
            ElementKind::Boolean => "boolean",
            ElementKind::Text => "text",
            ElementKind::Range => "range",
        };
        f.write_str(label)
    }
}

/// A named, typed column of values
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ElementKind,
    values: Vec<Value>,
}

impl Column {
    /// Create a column with a declared kind
    ///
    /// An `Integer` column that already holds nulls is stored as
    /// `NullableInteger`.
    pub fn new(name: impl Into<String>, kind: ElementKind, values: Vec<Value>) -> Self {
        let kind = if kind == ElementKind::Integer && values.iter().any(Value::is_null) {
            ElementKind::NullableInteger
        } else {
            kind
        };
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Create a column whose kind is inferred from its values
    ///
    /// Integers in a float column are converted to floats and every non-null
    /// value of a text column is rendered as text.
    pub fn infer(name: impl Into<String>, values: Vec<Value>) -> Self {
        let kind = ElementKind::infer(&values);
        let values = match kind {
            ElementKind::Float => values
                .into_iter()
                .map(|v| match v {
                    Value::Int(i) => Value::Float(i as f64),
                    other => other,
                })
                .collect(),
            ElementKind::Text => values
                .into_iter()
                .map(|v| match v {
                    Value::Null | Value::Text(_) => v,
                    other => Value::Text(other.to_string()),
                })
                .collect(),
            _ => values,
        };
        Self::new(name, kind, values)
    }

    /// Integer column without gaps
    pub fn integers(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::new(
            name,
            ElementKind::Integer,
            values.into_iter().map(Value::Int).collect(),
        )
    }

    /// Float column
    pub fn floats(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(
            name,
            ElementKind::Float,
            values.into_iter().map(Value::Float).collect(),
        )
    }

    /// Text column
    pub fn text<'a>(name: impl Into<String>, values: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(
            name,
            ElementKind::Text,
            values.into_iter().map(Value::from).collect(),
        )
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current element kind
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// All values in row order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at `row`
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of null cells
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Occurrence count of every non-null value
    pub fn value_counts(&self) -> HashMap<&Value, usize> {
        let mut counts = HashMap::new();
        for value in self.values.iter().filter(|v| !v.is_null()) {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    /// Number of distinct non-null values
    pub fn distinct_count(&self) -> usize {
        self.values
            .iter()
            .filter(|v| !v.is_null())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Null the cell at `row`
    ///
    /// Returns `true` if the cell held a value before.
    pub fn set_null(&mut self, row: usize) -> bool {
        match self.values.get(row) {
            Some(value) if !value.is_null() => {}
            _ => return false,
        }
        if self.kind == ElementKind::Integer {
            self.kind = ElementKind::NullableInteger;
        }
        self.values[row] = Value::Null;
        true
    }

    /// Null every cell holding one of `targets`, returning how many changed
    pub fn null_matching(&mut self, targets: &HashSet<Value>) -> usize {
        if targets.is_empty() {
            return 0;
        }
        let rows: Vec<usize> = self
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| targets.contains(*v))
            .map(|(i, _)| i)
            .collect();
        rows.into_iter().filter(|&row| self.set_null(row)).count()
    }

    /// Replace all values and the kind at once
    ///
    /// The replacement must keep the column length.
    pub(crate) fn replace(&mut self, kind: ElementKind, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.values.len());
        self.kind = kind;
        self.values = values;
    }

    fn retain_rows(&mut self, keep: &[bool]) {
        let mut flags = keep.iter();
        self.values.retain(|_| flags.next().copied().unwrap_or(false));
    }
}

/// Element kinds of every column, captured at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KindManifest {
    entries: Vec<(String, ElementKind)>,
}

impl KindManifest {
    /// Recorded kind of `column`
    pub fn kind_of(&self, column: &str) -> Option<ElementKind> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, kind)| *kind)
    }

    /// Iterate over `(column, kind)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, ElementKind)> {
        self.entries.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

/// An ordered set of equal-length, uniquely named columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Create a dataset, checking column names and lengths
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if two columns share a name or the columns
    /// differ in length.
    pub fn new(columns: Vec<Column>) -> std::result::Result<Self, DatasetError> {
        let mut names = HashSet::new();
        for column in &columns {
            if !names.insert(column.name()) {
                return Err(DatasetError::DuplicateColumn(column.name().to_string()));
            }
        }
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(DatasetError::LengthMismatch {
                    column: bad.name().to_string(),
                    expected,
                    actual: bad.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Whether the dataset has no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    /// Columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Mutable access to the columns; lengths cannot change through it
    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Values of row `index` across all columns
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.height() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.height()).map(move |i| self.columns.iter().map(|c| &c.values[i]).collect())
    }

    /// Keep the rows whose mask entry is `true`, returning how many were removed
    pub fn retain_rows(&mut self, keep: &[bool]) -> std::result::Result<usize, DatasetError> {
        let height = self.height();
        if keep.len() != height {
            return Err(DatasetError::MaskLength {
                expected: height,
                actual: keep.len(),
            });
        }
        for column in &mut self.columns {
            column.retain_rows(keep);
        }
        Ok(height - self.height())
    }

    /// Record the current kind of every column
    pub fn kind_manifest(&self) -> KindManifest {
        KindManifest {
            entries: self
                .columns
                .iter()
                .map(|c| (c.name().to_string(), c.kind()))
                .collect(),
        }
    }
}
