//! Domain error types
//!
//! This module defines the error hierarchy for Kredact. Errors stay
//! domain-specific and don't expose third-party parser types.

use thiserror::Error;

/// Main Kredact error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum KredactError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The input could not be parsed into a dataset
    #[error("Unable to read file '{file}' ({reason})")]
    Load { file: String, reason: String },

    /// No loader/exporter exists for the extension
    #[error("Invalid extension '{0}'")]
    UnsupportedFormat(String),

    /// Export/serialization of a dataset failed
    #[error("Export error: {0}")]
    Export(String),

    /// Dataset shape invariants were violated
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Dataset construction errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// Two columns share a name
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// A column's length differs from the first column's
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A row mask did not match the dataset height
    #[error("row mask has {actual} entries, dataset has {expected} rows")]
    MaskLength { expected: usize, actual: usize },
}

impl KredactError {
    /// Build a load error for `file`
    pub fn load(file: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        KredactError::Load {
            file: file.into(),
            reason: reason.to_string(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for KredactError {
    fn from(err: std::io::Error) -> Self {
        KredactError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for KredactError {
    fn from(err: serde_json::Error) -> Self {
        KredactError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for KredactError {
    fn from(err: toml::de::Error) -> Self {
        KredactError::Configuration(format!("TOML parse error: {err}"))
    }
}
