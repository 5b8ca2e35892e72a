//! Inspect command implementation
//!
//! Loads a file and shows, per column, the inferred kind and the transform
//! the anonymizer would pick. Nothing is modified or written.

use crate::adapters::load_dataset;
use crate::anonymization::classifier::{classify, ColumnClass};
use crate::cli::exit_code;
use crate::config::KredactConfig;
use crate::domain::Dataset;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input file (.csv, .json or .xlsx)
    pub input: PathBuf,

    /// Columns with at most this many distinct values are categorical
    #[arg(long)]
    pub max_categorical_size: Option<usize>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self, config: &KredactConfig) -> anyhow::Result<i32> {
        let max_categorical_size = self
            .max_categorical_size
            .unwrap_or(config.anonymization.max_categorical_size);

        let file_name = self
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string());

        let loaded = match fs::read(&self.input)
            .map_err(|e| crate::domain::KredactError::load(&file_name, e))
            .and_then(|bytes| load_dataset(&bytes, &file_name))
        {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("{e}");
                return Ok(exit_code::LOAD_ERROR);
            }
        };

        println!("{}", loaded.message);
        println!();
        print!("{}", format_columns(&loaded.dataset, max_categorical_size));
        Ok(exit_code::SUCCESS)
    }
}

/// Column overview table
pub fn format_columns(dataset: &Dataset, max_categorical_size: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "  {:24} {:17} {:>8} {:>9} {:13} {}\n",
        "Column", "Kind", "Nulls", "Distinct", "Class", "Action"
    ));
    output.push_str("───────────────────────────────────────────────────────────────────────────────────\n");

    for column in dataset.columns() {
        let class = classify(column, max_categorical_size);
        let action = match class {
            ColumnClass::Text | ColumnClass::Categorical => "suppress",
            ColumnClass::Numeric => "bin",
            ColumnClass::Unclassified => "none",
        };
        output.push_str(&format!(
            "  {:24} {:17} {:>8} {:>9} {:13} {}\n",
            column.name(),
            column.kind().to_string(),
            column.null_count(),
            column.distinct_count(),
            class.to_string(),
            action
        ));
    }
    output
}
