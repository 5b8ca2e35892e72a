//! Result type alias for Kredact

use super::errors::KredactError;

/// Result type alias for Kredact operations
///
/// # Examples
///
/// ```
/// use kredact::domain::result::Result;
/// use kredact::domain::errors::KredactError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(KredactError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, KredactError>;
