//! Result type alias for Regulus

use super::errors::RegulusError;

/// Result type alias for Regulus operations
///
/// # Examples
///
/// ```
/// use regulus::domain::result::Result;
/// use regulus::domain::errors::RegulusError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RegulusError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RegulusError>;
