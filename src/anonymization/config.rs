//! Anonymization configuration

use crate::domain::{KredactError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Smallest allowed categorical threshold and bin size
pub const MIN_PARAMETER: usize = 2;

/// Largest allowed categorical threshold and bin size
pub const MAX_PARAMETER: usize = 200;

/// How aggressively rare values are suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RedactionStrength {
    /// Suppress values seen fewer than 2 times
    #[default]
    Low,
    /// Suppress values seen fewer than 4 times
    Medium,
    /// Suppress values seen fewer than 6 times
    High,
    /// Suppress values seen fewer than 12 times
    Extreme,
}

impl RedactionStrength {
    /// Sensitivity threshold: values occurring fewer times are suppressed
    pub fn sensitivity_minimum(&self) -> usize {
        match self {
            RedactionStrength::Low => 2,
            RedactionStrength::Medium => 4,
            RedactionStrength::High => 6,
            RedactionStrength::Extreme => 12,
        }
    }
}

impl fmt::Display for RedactionStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RedactionStrength::Low => "low",
            RedactionStrength::Medium => "medium",
            RedactionStrength::High => "high",
            RedactionStrength::Extreme => "extreme",
        };
        f.write_str(label)
    }
}

impl FromStr for RedactionStrength {
    type Err = KredactError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RedactionStrength::Low),
            "medium" => Ok(RedactionStrength::Medium),
            "high" => Ok(RedactionStrength::High),
            "extreme" => Ok(RedactionStrength::Extreme),
            _ => Err(KredactError::Configuration(format!(
                "Invalid redaction strength '{s}'. Must be one of: low, medium, high, extreme"
            ))),
        }
    }
}

/// Parameters consumed by the anonymization pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineParams {
    /// Size of the column combinations probed by k-redaction
    pub k: usize,
    /// Columns with at most this many distinct values are categorical
    pub max_categorical_size: usize,
    /// Target number of rows per numeric bin
    pub bin_size: usize,
    /// Values occurring fewer times than this are suppressed
    pub sensitivity_minimum: usize,
}

/// Anonymization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Columns with at most this many distinct values are treated as categorical
    #[serde(default = "default_max_categorical_size")]
    pub max_categorical_size: usize,

    /// Target number of rows per numeric bin
    #[serde(default = "default_bin_size")]
    pub bin_size: usize,

    /// Redaction strength (low, medium, high, extreme)
    #[serde(default)]
    pub redaction_strength: RedactionStrength,

    /// Size of column combinations checked for joint uniqueness
    #[serde(default = "default_k")]
    pub k: usize,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_max_categorical_size() -> usize {
    50
}

fn default_bin_size() -> usize {
    20
}

fn default_k() -> usize {
    2
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            max_categorical_size: default_max_categorical_size(),
            bin_size: default_bin_size(),
            redaction_strength: RedactionStrength::default(),
            k: default_k(),
            audit: AuditConfig::default(),
        }
    }
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        check_range("anonymization.max_categorical_size", self.max_categorical_size)?;
        check_range("anonymization.bin_size", self.bin_size)?;

        if self.k == 0 {
            return Err(KredactError::Configuration(
                "anonymization.k must be at least 1".to_string(),
            ));
        }

        self.audit.validate()
    }

    /// Pipeline parameters derived from this configuration
    pub fn params(&self) -> PipelineParams {
        PipelineParams {
            k: self.k,
            max_categorical_size: self.max_categorical_size,
            bin_size: self.bin_size,
            sensitivity_minimum: self.redaction_strength.sensitivity_minimum(),
        }
    }
}

fn check_range(field: &str, value: usize) -> Result<()> {
    if !(MIN_PARAMETER..=MAX_PARAMETER).contains(&value) {
        return Err(KredactError::Configuration(format!(
            "{field} must be between {MIN_PARAMETER} and {MAX_PARAMETER}, got {value}"
        )));
    }
    Ok(())
}

/// Row cleaning applied before anonymization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Remove repeated rows, keeping the first occurrence
    #[serde(default = "default_true")]
    pub remove_duplicates: bool,

    /// Drop rows with any missing value instead of only fully empty rows
    #[serde(default)]
    pub drop_missing: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            remove_duplicates: true,
            drop_missing: false,
        }
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_true")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/kredact.log")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: true,
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err(KredactError::Configuration(
                "anonymization.audit.log_path cannot be empty when audit is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_config() {
        let config = AnonymizationConfig::default();
        assert_eq!(config.max_categorical_size, 50);
        assert_eq!(config.bin_size, 20);
        assert_eq!(config.redaction_strength, RedactionStrength::Low);
        assert_eq!(config.k, 2);
        assert!(!config.audit.enabled);
        assert!(config.validate().is_ok());
    }

    #[test_case(RedactionStrength::Low, 2)]
    #[test_case(RedactionStrength::Medium, 4)]
    #[test_case(RedactionStrength::High, 6)]
    #[test_case(RedactionStrength::Extreme, 12)]
    fn test_sensitivity_minimum(strength: RedactionStrength, expected: usize) {
        assert_eq!(strength.sensitivity_minimum(), expected);
    }

    #[test]
    fn test_strength_from_str() {
        assert_eq!("HIGH".parse::<RedactionStrength>().unwrap(), RedactionStrength::High);
        assert!("brutal".parse::<RedactionStrength>().is_err());
    }

    #[test]
    fn test_validation_bounds() {
        let mut config = AnonymizationConfig::default();
        config.bin_size = 1;
        assert!(config.validate().is_err());

        config.bin_size = 201;
        assert!(config.validate().is_err());

        config.bin_size = 20;
        config.max_categorical_size = 0;
        assert!(config.validate().is_err());

        config.max_categorical_size = 50;
        config.k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_params() {
        let config = AnonymizationConfig {
            redaction_strength: RedactionStrength::Medium,
            ..Default::default()
        };
        let params = config.params();
        assert_eq!(params.sensitivity_minimum, 4);
        assert_eq!(params.k, 2);
        assert_eq!(params.bin_size, 20);
    }

    #[test]
    fn test_cleaning_defaults_from_toml() {
        let config: CleaningConfig = toml::from_str("").unwrap();
        assert!(config.remove_duplicates);
        assert!(!config.drop_missing);
    }
}
