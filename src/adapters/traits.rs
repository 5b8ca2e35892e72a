//! Table codec traits
//!
//! This module defines the trait every file format adapter implements to
//! turn bytes into a [`Dataset`] and back.

use super::Format;
use crate::domain::{Dataset, DatasetError};
use thiserror::Error;

/// Failures inside a single codec
///
/// These are mapped to [`KredactError`](crate::domain::KredactError) load or
/// export errors at the adapter boundary.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Spreadsheet(String),

    /// The input parsed but does not describe a table
    #[error("{0}")]
    Shape(String),

    #[error("{0}")]
    Dataset(#[from] DatasetError),
}

/// Reader/writer for one file format
pub trait TableCodec {
    /// Format handled by this codec
    fn format(&self) -> Format;

    /// Parse a dataset from raw file bytes
    fn read(&self, bytes: &[u8]) -> Result<Dataset, CodecError>;

    /// Serialize a dataset to file bytes
    fn write(&self, dataset: &Dataset) -> Result<Vec<u8>, CodecError>;
}
