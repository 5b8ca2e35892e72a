// Kredact - Tabular data anonymizer
// Copyright (c) 2025 Kredact Contributors
// Licensed under the MIT License

//! # Kredact - Tabular data anonymizer
//!
//! Kredact applies a heuristic form of k-anonymity to tabular data loaded
//! from CSV, JSON or XLSX files.
//!
//! ## Overview
//!
//! A run goes through these steps:
//! - **Cleaning** drops empty (or incomplete) rows and duplicates
//! - **Classification** labels each column as text, categorical or numeric
//! - **Suppression** nulls values seen fewer times than the sensitivity minimum
//! - **Binning** replaces numbers with `(min, max)` ranges of roughly equal size
//! - **k-redaction** nulls one cell of every row that is unique on a
//!   combination of `k` columns
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Cleaning, classification, transforms and reporting
//! - [`adapters`] - CSV, JSON and XLSX readers and writers
//! - [`domain`] - Dataset model and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kredact::adapters::{export_dataset, load_dataset, Format};
//! use kredact::anonymization::{anonymize_dataset, AnonymizationConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("people.csv")?;
//! let loaded = load_dataset(&bytes, "people.csv")?;
//!
//! let params = AnonymizationConfig::default().params();
//! let outcome = anonymize_dataset(loaded.dataset, &params);
//!
//! println!("Unprocessed columns: {:?}", outcome.unprocessed);
//! std::fs::write("people-clean.csv", export_dataset(&outcome.dataset, Format::Csv)?)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], built on [`domain::KredactError`].
//! Column transforms that fail do not abort a run: the column is left as it
//! was and reported as unprocessed.

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
