//! Domain models and types for Kredact.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Cell values** ([`Value`], [`Bin`])
//! - **The tabular model** ([`Dataset`], [`Column`], [`ElementKind`])
//! - **Error types** ([`KredactError`], [`DatasetError`])
//! - **Result type alias** ([`Result`])
//!
//! # Building a dataset
//!
//! ```rust
//! use kredact::domain::{Column, Dataset};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = Dataset::new(vec![
//!     Column::text("city", ["Oslo", "Rome", "Oslo"]),
//!     Column::integers("age", [31, 45, 27]),
//! ])?;
//! assert_eq!(dataset.height(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, KredactError>`]:
//!
//! ```rust
//! use kredact::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = kredact::config::load_config("kredact.toml")?;
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

pub mod dataset;
pub mod errors;
pub mod result;
pub mod value;

// Re-export commonly used types for convenience
pub use dataset::{Column, Dataset, ElementKind, KindManifest};
pub use errors::{DatasetError, KredactError};
pub use result::Result;
pub use value::{Bin, Value};
