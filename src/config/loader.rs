//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::KredactConfig;
use crate::domain::errors::KredactError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "kredact.toml";

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "KREDACT_CONFIG";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into KredactConfig
/// 4. Applies environment variable overrides (KREDACT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use kredact::config::loader::load_config;
///
/// let config = load_config("kredact.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<KredactConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(KredactError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        KredactError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration, falling back to defaults when the file is missing
///
/// `path` defaults to `$KREDACT_CONFIG`, then `kredact.toml`. Environment
/// overrides apply either way.
pub fn load_config_or_default(path: Option<&Path>) -> Result<KredactConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE)),
    };

    if path.exists() {
        return load_config(&path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = KredactConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Parses configuration text: substitution, TOML, overrides, validation
pub fn parse_config(contents: &str) -> Result<KredactConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: KredactConfig = toml::from_str(&contents)
        .map_err(|e| KredactError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        KredactError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| KredactError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        // Skip comment lines - don't process env vars in comments
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(KredactError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using KREDACT_* prefix
///
/// Environment variables follow the pattern: KREDACT_<SECTION>_<KEY>
/// For example: KREDACT_ANONYMIZATION_BIN_SIZE, KREDACT_OUTPUT_FORMAT
fn apply_env_overrides(config: &mut KredactConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("KREDACT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("KREDACT_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Cleaning overrides
    if let Ok(val) = std::env::var("KREDACT_CLEANING_REMOVE_DUPLICATES") {
        config.cleaning.remove_duplicates = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("KREDACT_CLEANING_DROP_MISSING") {
        config.cleaning.drop_missing = val.parse().unwrap_or(false);
    }

    // Anonymization overrides
    if let Ok(val) = std::env::var("KREDACT_ANONYMIZATION_MAX_CATEGORICAL_SIZE") {
        if let Ok(size) = val.parse() {
            config.anonymization.max_categorical_size = size;
        }
    }
    if let Ok(val) = std::env::var("KREDACT_ANONYMIZATION_BIN_SIZE") {
        if let Ok(size) = val.parse() {
            config.anonymization.bin_size = size;
        }
    }
    if let Ok(val) = std::env::var("KREDACT_ANONYMIZATION_REDACTION_STRENGTH") {
        config.anonymization.redaction_strength = val.parse()?;
    }
    if let Ok(val) = std::env::var("KREDACT_ANONYMIZATION_K") {
        if let Ok(k) = val.parse() {
            config.anonymization.k = k;
        }
    }
    if let Ok(val) = std::env::var("KREDACT_ANONYMIZATION_AUDIT_ENABLED") {
        config.anonymization.audit.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("KREDACT_ANONYMIZATION_AUDIT_LOG_PATH") {
        config.anonymization.audit.log_path = val.into();
    }

    // Output overrides
    if let Ok(val) = std::env::var("KREDACT_OUTPUT_FORMAT") {
        config.output.format = Some(val.parse().map_err(|e| {
            KredactError::Configuration(format!("KREDACT_OUTPUT_FORMAT: {e}"))
        })?);
    }
    if let Ok(val) = std::env::var("KREDACT_OUTPUT_DIRECTORY") {
        config.output.directory = Some(val.into());
    }

    // Logging overrides
    if let Ok(val) = std::env::var("KREDACT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("KREDACT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("KREDACT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
