//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX`.

use kredact::adapters::Format;
use kredact::anonymization::config::RedactionStrength;
use kredact::config::{load_config, load_config_or_default};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("KREDACT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("KREDACT_ANONYMIZATION_BIN_SIZE");
    std::env::remove_var("KREDACT_ANONYMIZATION_REDACTION_STRENGTH");
    std::env::remove_var("KREDACT_OUTPUT_FORMAT");
    std::env::remove_var("KREDACT_CONFIG");
    std::env::remove_var("TEST_KREDACT_AUDIT_DIR");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[cleaning]
remove_duplicates = false
drop_missing = true

[anonymization]
max_categorical_size = 12
bin_size = 8
redaction_strength = "high"
k = 3

[anonymization.audit]
enabled = true
log_path = "./audit/runs.log"
json_format = false

[output]
format = "json"
directory = "./out"

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert!(!config.cleaning.remove_duplicates);
    assert!(config.cleaning.drop_missing);
    assert_eq!(config.anonymization.max_categorical_size, 12);
    assert_eq!(config.anonymization.bin_size, 8);
    assert_eq!(
        config.anonymization.redaction_strength,
        RedactionStrength::High
    );
    assert_eq!(config.anonymization.params().sensitivity_minimum, 6);
    assert_eq!(config.anonymization.k, 3);
    assert!(config.anonymization.audit.enabled);
    assert!(!config.anonymization.audit.json_format);
    assert_eq!(config.output.format, Some(Format::Json));
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.anonymization.max_categorical_size, 50);
    assert_eq!(config.anonymization.bin_size, 20);
    assert_eq!(config.anonymization.k, 2);
    assert_eq!(
        config.anonymization.redaction_strength,
        RedactionStrength::Low
    );
    assert!(config.cleaning.remove_duplicates);
    assert!(!config.cleaning.drop_missing);
    assert!(config.output.format.is_none());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_KREDACT_AUDIT_DIR", "/var/audit");

    let file = write_config(
        r#"
[anonymization.audit]
enabled = true
log_path = "${TEST_KREDACT_AUDIT_DIR}/kredact.log"
"#,
    );
    let config = load_config(file.path()).unwrap();
    cleanup_env_vars();

    assert_eq!(
        config.anonymization.audit.log_path,
        Path::new("/var/audit/kredact.log")
    );
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[output]
directory = "${TEST_KREDACT_AUDIT_DIR}"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_KREDACT_AUDIT_DIR"));
}

#[test]
fn test_env_overrides_win_over_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("KREDACT_ANONYMIZATION_BIN_SIZE", "10");
    std::env::set_var("KREDACT_ANONYMIZATION_REDACTION_STRENGTH", "extreme");
    std::env::set_var("KREDACT_OUTPUT_FORMAT", "xlsx");

    let file = write_config(
        r#"
[anonymization]
bin_size = 40
redaction_strength = "low"
"#,
    );
    let config = load_config(file.path());
    cleanup_env_vars();

    let config = config.unwrap();
    assert_eq!(config.anonymization.bin_size, 10);
    assert_eq!(
        config.anonymization.redaction_strength,
        RedactionStrength::Extreme
    );
    assert_eq!(config.output.format, Some(Format::Xlsx));
}

#[test]
fn test_out_of_range_parameters_are_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for contents in [
        "[anonymization]\nbin_size = 1\n",
        "[anonymization]\nbin_size = 201\n",
        "[anonymization]\nmax_categorical_size = 0\n",
        "[anonymization]\nk = 0\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ] {
        let file = write_config(contents);
        assert!(load_config(file.path()).is_err(), "accepted: {contents}");
    }
}

#[test]
fn test_invalid_strength_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[anonymization]\nredaction_strength = \"paranoid\"\n");
    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("KREDACT_APPLICATION_LOG_LEVEL", "warn");

    let config = load_config_or_default(Some(Path::new("/nonexistent/kredact.toml")));
    cleanup_env_vars();

    let config = config.unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.anonymization.bin_size, 20);

    assert!(load_config("/nonexistent/kredact.toml").is_err());
}
