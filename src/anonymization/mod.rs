//! Anonymization module for Kredact
//!
//! This module turns a loaded [`Dataset`](crate::domain::Dataset) into a
//! less identifying one using heuristics only: rare values are suppressed,
//! numbers are generalized into bins and jointly unique column combinations
//! are redacted.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Cleaning**: empty and duplicate rows are dropped
//! - **Classification**: each column is labelled text, categorical, numeric or unclassified
//! - **Transforms**: suppression and numeric binning, one per column
//! - **k-redaction**: nulls cells of unique `k`-column tuples
//! - **Audit**: structured run log with an input digest
//!
//! # Usage
//!
//! ```rust,ignore
//! use kredact::anonymization::{AnonymizationEngine, config::{AnonymizationConfig, CleaningConfig}};
//!
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default(), CleaningConfig::default())?;
//! let processed = engine.process(dataset, &metadata)?;
//! ```

pub mod audit;
pub mod classifier;
pub mod cleaner;
pub mod config;
pub mod engine;
pub mod report;
pub mod transform;

// Re-export main types
pub use classifier::{classify, ColumnClass};
pub use cleaner::{clean_dataset, CleaningOutcome};
pub use config::{AnonymizationConfig, CleaningConfig, PipelineParams, RedactionStrength};
pub use engine::{anonymize, anonymize_dataset, AnonymizationEngine, ProcessedDataset};
pub use report::AnonymizationReport;
