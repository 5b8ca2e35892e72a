// Kredact - Tabular data anonymizer
// Copyright (c) 2025 Kredact Contributors
// Licensed under the MIT License

use clap::Parser;
use kredact::cli::{exit_code, Cli, Commands};
use kredact::config::{load_config_or_default, KredactConfig, LoggingConfig};
use kredact::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // validate-config reports on the file itself, so a broken file must not
    // stop it from running
    let config = match &cli.command {
        Commands::Anonymize(_) | Commands::Inspect(_) => {
            match load_config_or_default(cli.config.as_deref()) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Failed to load configuration: {e}");
                    process::exit(exit_code::CONFIG_ERROR);
                }
            }
        }
        Commands::ValidateConfig(_) | Commands::Init(_) => KredactConfig::default(),
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(config.application.log_level.as_str())
        .to_string();
    let logging_config = match &cli.command {
        Commands::Anonymize(_) | Commands::Inspect(_) => config.logging.clone(),
        _ => LoggingConfig::default(),
    };
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(exit_code::FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Kredact - Tabular data anonymizer"
    );

    let code = match execute_command(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            exit_code::FATAL
        }
    };

    // process::exit skips destructors, flush file logs first
    drop(guard);
    process::exit(code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, config: &KredactConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Anonymize(args) => args.execute(config),
        Commands::Inspect(args) => args.execute(config),
        Commands::ValidateConfig(args) => args.execute(cli.config.as_deref()),
        Commands::Init(args) => args.execute(),
    }
}
