//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Kredact using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kredact - heuristic anonymizer for tabular data
#[derive(Parser, Debug)]
#[command(name = "kredact")]
#[command(version, about, long_about = None)]
#[command(author = "Kredact Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults apply when it does not exist)
    #[arg(short, long, env = "KREDACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "KREDACT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean and anonymize a CSV, JSON or XLSX file
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Show how each column of a file would be classified
    Inspect(commands::inspect::InspectArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Process exit codes
pub mod exit_code {
    /// Command finished
    pub const SUCCESS: i32 = 0;
    /// Configuration could not be loaded or is invalid
    pub const CONFIG_ERROR: i32 = 2;
    /// Input file could not be read or parsed
    pub const LOAD_ERROR: i32 = 3;
    /// Anything else
    pub const FATAL: i32 = 5;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::Format;
    use crate::anonymization::config::RedactionStrength;

    #[test]
    fn test_cli_parse_anonymize() {
        let cli = Cli::parse_from(["kredact", "anonymize", "people.csv"]);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.input, PathBuf::from("people.csv"));
                assert!(args.format.is_none());
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_anonymize_overrides() {
        let cli = Cli::parse_from([
            "kredact",
            "anonymize",
            "people.csv",
            "--format",
            "xlsx",
            "--strength",
            "extreme",
            "--bin-size",
            "5",
            "--keep-duplicates",
        ]);
        let Commands::Anonymize(args) = cli.command else {
            panic!("expected anonymize");
        };
        assert_eq!(args.format, Some(Format::Xlsx));
        assert_eq!(args.strength, Some(RedactionStrength::Extreme));
        assert_eq!(args.bin_size, Some(5));
        assert!(args.keep_duplicates);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["kredact", "anonymize", "a.csv", "--format", "txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["kredact", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["kredact", "--log-level", "debug", "inspect", "a.json"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["kredact", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }
}
