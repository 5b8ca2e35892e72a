//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::exit_code;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "kredact.toml")]
    pub output: String,

    /// Include every setting with explanatory comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Kredact configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(exit_code::CONFIG_ERROR);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: kredact validate-config");
                println!("  3. Preview a file: kredact inspect data.csv");
                println!("  4. Anonymize it: kredact anonymize data.csv");
                println!();
                Ok(exit_code::SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(exit_code::FATAL)
            }
        }
    }

    /// Generate minimal configuration
    pub fn generate_minimal_config() -> String {
        r#"# Kredact Configuration File
# Heuristic anonymizer for CSV, JSON and XLSX tables

[application]
log_level = "info"
dry_run = false

[cleaning]
remove_duplicates = true
drop_missing = false

[anonymization]
max_categorical_size = 50
bin_size = 20
redaction_strength = "low"  # low | medium | high | extreme
"#
        .to_string()
    }

    /// Generate configuration with every setting documented
    pub fn generate_config_with_examples() -> String {
        r#"# Kredact Configuration File
# Heuristic anonymizer for CSV, JSON and XLSX tables
#
# Values may reference environment variables with ${VAR_NAME}.
# Any setting can also be overridden with KREDACT_<SECTION>_<KEY>,
# e.g. KREDACT_ANONYMIZATION_BIN_SIZE=10.

[application]
# trace | debug | info | warn | error
log_level = "info"
# Print the report without writing the output file
dry_run = false

[cleaning]
# Remove repeated rows, keeping the first occurrence
remove_duplicates = true
# Remove every row that has at least one missing value
drop_missing = false

[anonymization]
# Columns with at most this many distinct values are suppressed as
# categorical data (2-200)
max_categorical_size = 50

# Target number of rows per numeric bin (2-200)
bin_size = 20

# Values seen fewer times than the strength's minimum are removed:
# low = 2, medium = 4, high = 6, extreme = 12
redaction_strength = "low"

# Size of the column combinations checked for unique rows
k = 2

[anonymization.audit]
# Append one line per run with counts and an input digest
enabled = false
log_path = "./audit/kredact.log"
json_format = true

[output]
# csv | json | xlsx (defaults to the input format)
# format = "csv"
# Directory for <name>-clean.<ext> files (defaults to the input's directory)
# directory = "./out"

[logging]
# Write JSON log files in addition to console output
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
