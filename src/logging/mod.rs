//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human readable console logs on stderr
//! - Configurable log levels (`RUST_LOG` wins when set)
//! - JSON log files with rotation
//!
//! # Example
//!
//! ```no_run
//! use kredact::logging::init_logging;
//! use kredact::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an anonymization run
///
/// # Example
///
/// ```no_run
/// use kredact::log_run_start;
///
/// log_run_start!("patients.csv", 1200, 14);
/// ```
#[macro_export]
macro_rules! log_run_start {
    ($source:expr, $rows:expr, $columns:expr) => {
        tracing::info!(
            source = %$source,
            rows = $rows,
            columns = $columns,
            "Starting anonymization"
        );
    };
}

/// Log the completion of an anonymization run
///
/// # Example
///
/// ```no_run
/// use kredact::log_run_complete;
/// use std::time::Duration;
///
/// log_run_complete!(42, Duration::from_millis(250));
/// ```
#[macro_export]
macro_rules! log_run_complete {
    ($cells_nulled:expr, $duration:expr) => {
        tracing::info!(
            cells_nulled = $cells_nulled,
            duration_ms = $duration.as_millis() as u64,
            "Anonymization completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use kredact::log_error_with_context;
/// use kredact::domain::KredactError;
///
/// let error = KredactError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
