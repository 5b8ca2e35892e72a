//! Audit logging module
//!
//! Appends one structured entry per anonymization run. Entries hold counts,
//! column names and an input digest, never cell values.

pub mod logger;

pub use logger::{sha256_hex, AuditLogger};
