//! Column and dataset transforms
//!
//! Column-level transforms implement [`ColumnTransform`]:
//! - [`Suppression`] nulls values that occur too rarely
//! - [`NumericBinning`] generalizes numbers into `(min, max)` bins
//!
//! Cross-column redaction lives in [`k_redaction`].

pub mod binning;
pub mod k_redaction;
pub mod suppression;

pub use binning::{bin_numeric, NumericBinning};
pub use k_redaction::{k_redact, KRedactionSummary};
pub use suppression::{suppress, Suppression};

use crate::domain::{Column, ElementKind};
use serde::Serialize;
use thiserror::Error;

/// What a column transform changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnChange {
    /// Cells set to null
    pub cells_suppressed: usize,
    /// Bins built (zero for suppression)
    pub bins: usize,
}

/// Column transform failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Binning needs a numeric column
    #[error("column '{column}' has kind {kind}, binning needs a numeric column")]
    NotNumeric { column: String, kind: ElementKind },
}

/// Trait for column transform implementations
pub trait ColumnTransform {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Transform the column in place
    fn apply(&self, column: &mut Column) -> Result<ColumnChange, TransformError>;
}
