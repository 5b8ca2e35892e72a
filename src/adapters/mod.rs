//! File format integrations for Kredact.
//!
//! This module provides the loader and exporter around the anonymizer:
//!
//! - [`delimited`] - CSV files
//! - [`json`] - JSON files (column-oriented objects or record arrays)
//! - [`spreadsheet`] - Excel workbooks (`.xlsx`)
//!
//! # Design Pattern
//!
//! Formats follow the **Adapter Pattern**: each implements
//! [`TableCodec`](traits::TableCodec) and [`factory::create_codec`] picks one
//! from a [`Format`]. Callers normally go through [`load_dataset`] and
//! [`export_dataset`].
//!
//! ```rust,no_run
//! use kredact::adapters::{export_dataset, load_dataset, output_file_name, Format};
//!
//! # fn example() -> kredact::domain::Result<()> {
//! let bytes = std::fs::read("patients.csv")?;
//! let loaded = load_dataset(&bytes, "patients.csv")?;
//! println!("{}", loaded.message);
//!
//! let out = export_dataset(&loaded.dataset, Format::Json)?;
//! std::fs::write(output_file_name("patients.csv", Format::Json), out)?;
//! # Ok(())
//! # }
//! ```

pub mod cells;
pub mod delimited;
pub mod factory;
pub mod json;
pub mod spreadsheet;
pub mod traits;

pub use factory::create_codec;
pub use traits::{CodecError, TableCodec};

use crate::anonymization::audit::sha256_hex;
use crate::domain::{Dataset, KredactError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Csv,
    Json,
    Xlsx,
}

impl Format {
    /// Every supported format
    pub const ALL: [Format; 3] = [Format::Csv, Format::Json, Format::Xlsx];

    /// Parse a file extension, case-insensitive, leading dot optional
    pub fn from_extension(extension: &str) -> Result<Self> {
        let trimmed = extension.trim_start_matches('.');
        match trimmed.to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            "xlsx" => Ok(Format::Xlsx),
            _ => Err(KredactError::UnsupportedFormat(trimmed.to_string())),
        }
    }

    /// Format of a file, from its name
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }

    /// Canonical extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = KredactError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s)
    }
}

/// Where a dataset came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    /// File name as given by the caller
    pub file_name: String,
    /// Format the file was parsed as
    pub format: Format,
    /// SHA-256 of the file bytes, hex encoded
    pub digest: Option<String>,
}

impl FileMetadata {
    /// Metadata for a dataset that was not read from bytes
    ///
    /// The format is taken from the name, defaulting to CSV.
    pub fn in_memory(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let format = Format::from_path(&file_name).unwrap_or(Format::Csv);
        Self {
            file_name,
            format,
            digest: None,
        }
    }

    /// File stem used for output naming
    pub fn stem(&self) -> &str {
        file_stem(&self.file_name)
    }
}

/// A parsed input file
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub metadata: FileMetadata,
    /// Human readable load summary
    pub message: String,
}

/// Parse `bytes` according to the extension of `file_name`
///
/// # Errors
///
/// Returns [`KredactError::UnsupportedFormat`] for unknown extensions and
/// [`KredactError::Load`] when the bytes cannot be parsed.
pub fn load_dataset(bytes: &[u8], file_name: &str) -> Result<LoadedDataset> {
    let format = Format::from_path(file_name)?;
    let dataset = create_codec(format)
        .read(bytes)
        .map_err(|e| KredactError::load(file_name, e))?;

    let message = format!(
        "File '{}' loaded successfully.\nFound {} rows, {} columns.",
        file_name,
        dataset.height(),
        dataset.width()
    );
    tracing::info!(
        file = file_name,
        format = %format,
        rows = dataset.height(),
        columns = dataset.width(),
        "Dataset loaded"
    );

    Ok(LoadedDataset {
        dataset,
        metadata: FileMetadata {
            file_name: file_name.to_string(),
            format,
            digest: Some(sha256_hex(bytes)),
        },
        message,
    })
}

/// Serialize a dataset in `format`
///
/// # Errors
///
/// Returns [`KredactError::Export`] if the writer fails.
pub fn export_dataset(dataset: &Dataset, format: Format) -> Result<Vec<u8>> {
    create_codec(format)
        .write(dataset)
        .map_err(|e| KredactError::Export(format!("{format}: {e}")))
}

/// `<stem>-clean.<ext>` for an input file name
///
/// The stem is the part of the file name before its first dot.
pub fn output_file_name(input: &str, format: Format) -> String {
    format!("{}-clean.{}", file_stem(input), format.extension())
}

fn file_stem(input: &str) -> &str {
    let name = Path::new(input)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(input);
    name.split('.').next().unwrap_or(name)
}
