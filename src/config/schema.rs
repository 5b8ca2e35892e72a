//! Configuration schema types
//!
//! This module defines the configuration structure for Kredact. Every
//! section is optional in the TOML file and falls back to its defaults.

use crate::adapters::Format;
use crate::anonymization::config::{AnonymizationConfig, CleaningConfig};
use crate::domain::{KredactError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Kredact configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KredactConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Row cleaning applied before anonymization
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Anonymization parameters
    #[serde(default)]
    pub anonymization: AnonymizationConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl KredactConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns [`KredactError::Configuration`] naming the first invalid value
    pub fn validate(&self) -> Result<()> {
        self.application
            .validate()
            .map_err(KredactError::Configuration)?;
        self.anonymization.validate()?;
        self.output.validate().map_err(KredactError::Configuration)?;
        self.logging.validate().map_err(KredactError::Configuration)?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (report only, don't write the output file)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Output file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format; defaults to the input's format
    #[serde(default)]
    pub format: Option<Format>,

    /// Directory for output files; defaults to the input's directory
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl OutputConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(ref directory) = self.directory {
            if directory.as_os_str().is_empty() {
                return Err("output.directory must not be empty".to_string());
            }
            if directory.is_file() {
                return Err(format!(
                    "output.directory '{}' is a file",
                    directory.display()
                ));
            }
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must not be empty".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
