//! Anonymize command implementation
//!
//! This module implements the `anonymize` command: load a file, clean and
//! anonymize it, print the run report and write `<stem>-clean.<ext>`.

use crate::adapters::{export_dataset, load_dataset, output_file_name, Format};
use crate::anonymization::config::RedactionStrength;
use crate::anonymization::AnonymizationEngine;
use crate::cli::exit_code;
use crate::config::KredactConfig;
use anyhow::Context;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Notice printed after every run
pub const DISCLAIMER: &str = "Disclaimer: this data was processed using 2-anonymity, an implementation \
of the k-anonymity framework. While this is a great start to anonymizing your data, it is by no \
means perfect, and should be used with caution. For example, some sets of sensitive features \
which may clearly be identified by a human could be missed by the algorithm.";

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Input file (.csv, .json or .xlsx)
    pub input: PathBuf,

    /// Output file path (defaults to <stem>-clean.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (csv, json, xlsx); defaults to the input format
    #[arg(short, long)]
    pub format: Option<Format>,

    /// Redaction strength (low, medium, high, extreme)
    #[arg(short, long)]
    pub strength: Option<RedactionStrength>,

    /// Columns with at most this many distinct values are categorical (2-200)
    #[arg(long)]
    pub max_categorical_size: Option<usize>,

    /// Target rows per numeric bin (2-200)
    #[arg(long)]
    pub bin_size: Option<usize>,

    /// Keep duplicate rows
    #[arg(long)]
    pub keep_duplicates: bool,

    /// Remove rows with any missing value
    #[arg(long)]
    pub drop_missing: bool,

    /// Report only, don't write the output file
    #[arg(long)]
    pub dry_run: bool,

    /// Also write the run report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub fn execute(&self, config: &KredactConfig) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting anonymize command");

        let config = self.apply_overrides(config.clone());
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(exit_code::CONFIG_ERROR);
        }

        let file_name = self
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string());

        let bytes = match fs::read(&self.input) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Unable to read file '{}' ({e})", self.input.display());
                return Ok(exit_code::LOAD_ERROR);
            }
        };
        let loaded = match load_dataset(&bytes, &file_name) {
            Ok(loaded) => loaded,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load input");
                eprintln!("{e}");
                return Ok(exit_code::LOAD_ERROR);
            }
        };
        println!("{}", loaded.message);

        let engine = AnonymizationEngine::new(config.anonymization.clone(), config.cleaning)?;
        let processed = engine
            .process(loaded.dataset, &loaded.metadata)
            .context("Anonymization failed")?;

        print!("{}", processed.report.format_console());

        if !processed.unprocessed.is_empty() {
            println!(
                "Error encountered when processing columns {}",
                format_column_list(&processed.unprocessed)
            );
        }

        if let Some(ref path) = self.report_json {
            processed
                .report
                .write_to_file(path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("📝 Report written to {}", path.display());
        }

        if config.application.dry_run {
            println!("🔍 Dry run: no output file written");
        } else {
            let format = self
                .format
                .or(config.output.format)
                .unwrap_or(loaded.metadata.format);
            let path = self.output_path(&config, &file_name, format);
            let output = export_dataset(&processed.dataset, format)?;
            fs::write(&path, output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            tracing::info!(output = %path.display(), format = %format, "Output written");
            println!("✅ Anonymized data written to {}", path.display());
        }

        println!();
        println!("{DISCLAIMER}");

        Ok(exit_code::SUCCESS)
    }

    /// Layer command-line flags over the loaded configuration
    fn apply_overrides(&self, mut config: KredactConfig) -> KredactConfig {
        if let Some(strength) = self.strength {
            config.anonymization.redaction_strength = strength;
        }
        if let Some(size) = self.max_categorical_size {
            config.anonymization.max_categorical_size = size;
        }
        if let Some(size) = self.bin_size {
            config.anonymization.bin_size = size;
        }
        if self.keep_duplicates {
            config.cleaning.remove_duplicates = false;
        }
        if self.drop_missing {
            config.cleaning.drop_missing = true;
        }
        if self.dry_run {
            config.application.dry_run = true;
        }
        config
    }

    fn output_path(&self, config: &KredactConfig, file_name: &str, format: Format) -> PathBuf {
        if let Some(ref output) = self.output {
            return output.clone();
        }
        let directory = config
            .output
            .directory
            .clone()
            .or_else(|| self.input.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        directory.join(output_file_name(file_name, format))
    }
}

/// `['a', 'b']` style list of column names
pub fn format_column_list(columns: &[String]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| format!("'{c}'")).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str) -> AnonymizeArgs {
        AnonymizeArgs {
            input: PathBuf::from(input),
            output: None,
            format: None,
            strength: None,
            max_categorical_size: None,
            bin_size: None,
            keep_duplicates: false,
            drop_missing: false,
            dry_run: false,
            report_json: None,
        }
    }

    #[test]
    fn test_format_column_list() {
        assert_eq!(
            format_column_list(&["a".to_string(), "b c".to_string()]),
            "['a', 'b c']"
        );
        assert_eq!(format_column_list(&[]), "[]");
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut args = args("people.csv");
        args.strength = Some(RedactionStrength::Medium);
        args.bin_size = Some(8);
        args.keep_duplicates = true;
        args.drop_missing = true;

        let config = args.apply_overrides(KredactConfig::default());
        assert_eq!(
            config.anonymization.redaction_strength,
            RedactionStrength::Medium
        );
        assert_eq!(config.anonymization.bin_size, 8);
        assert!(!config.cleaning.remove_duplicates);
        assert!(config.cleaning.drop_missing);
    }

    #[test]
    fn test_default_output_path_next_to_input() {
        let args = args("data/people.csv");
        let path = args.output_path(&KredactConfig::default(), "people.csv", Format::Json);
        assert_eq!(path, PathBuf::from("data/people-clean.json"));
    }

    #[test]
    fn test_output_directory_from_config() {
        let args = args("data/people.csv");
        let mut config = KredactConfig::default();
        config.output.directory = Some(PathBuf::from("out"));
        let path = args.output_path(&config, "people.csv", Format::Csv);
        assert_eq!(path, PathBuf::from("out/people-clean.csv"));
    }
}
