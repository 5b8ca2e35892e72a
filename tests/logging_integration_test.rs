//! Integration tests for logging functionality

use kredact::config::LoggingConfig;
use kredact::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
}

// A global subscriber can only be installed once per process, so the whole
// lifecycle lives in one test
#[test]
fn test_file_logging_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };
    assert!(!log_path.exists());

    let guard = init_logging("info", &config).unwrap();
    tracing::info!(rows = 10, "Dataset loaded");
    drop(guard);

    let files: Vec<_> = std::fs::read_dir(&log_path)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(files.iter().any(|name| name.starts_with("kredact.log")));

    let second = init_logging("info", &LoggingConfig::default());
    assert!(second.is_err());
}
