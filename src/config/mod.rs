//! Configuration management for Kredact.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Kredact uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `KREDACT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation of parameter ranges
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kredact::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("kredact.toml")?;
//!
//! println!("Bin size: {}", config.anonymization.bin_size);
//! println!("Strength: {}", config.anonymization.redaction_strength);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run mode
//! - [`CleaningConfig`] - Duplicate and missing-value row removal
//! - [`AnonymizationConfig`] - Classifier, binning and redaction parameters
//! - [`OutputConfig`] - Output format and directory
//! - [`LoggingConfig`] - Local log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization]
//! max_categorical_size = 50
//! bin_size = 20
//! redaction_strength = "medium"
//!
//! [anonymization.audit]
//! enabled = true
//! log_path = "${KREDACT_AUDIT_DIR}/kredact.log"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use crate::anonymization::config::{AnonymizationConfig, AuditConfig, CleaningConfig};
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, KredactConfig, LoggingConfig, OutputConfig};
