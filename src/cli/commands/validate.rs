//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Kredact configuration file.

use crate::cli::exit_code;
use crate::config::loader::{load_config, DEFAULT_CONFIG_FILE};
use crate::config::KredactConfig;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let config_path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        tracing::info!(config_path = %config_path.display(), "Validating configuration");

        println!(
            "🔍 Validating configuration file: {}",
            config_path.display()
        );
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(exit_code::CONFIG_ERROR);
            }
        };

        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                print!("{}", summary(&config));
                println!();
                Ok(exit_code::SUCCESS)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(exit_code::CONFIG_ERROR)
            }
        }
    }
}

/// Human readable configuration summary
pub fn summary(config: &KredactConfig) -> String {
    let anonymization = &config.anonymization;
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Dry Run: {}", config.application.dry_run),
        format!("  Remove Duplicates: {}", config.cleaning.remove_duplicates),
        format!("  Drop Missing: {}", config.cleaning.drop_missing),
        format!(
            "  Max Categorical Size: {}",
            anonymization.max_categorical_size
        ),
        format!("  Bin Size: {}", anonymization.bin_size),
        format!(
            "  Redaction Strength: {} (sensitivity minimum {})",
            anonymization.redaction_strength,
            anonymization.redaction_strength.sensitivity_minimum()
        ),
        format!("  k: {}", anonymization.k),
    ];
    if anonymization.audit.enabled {
        lines.push(format!(
            "  Audit Log: {}",
            anonymization.audit.log_path.display()
        ));
    }
    if let Some(format) = config.output.format {
        lines.push(format!("  Output Format: {format}"));
    }
    if let Some(ref directory) = config.output.directory {
        lines.push(format!("  Output Directory: {}", directory.display()));
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
