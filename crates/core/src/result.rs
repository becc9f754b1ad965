//! Result type definition and extension traits.
//!
//! Pointer handlers never propagate errors to the host; these combinators
//! absorb a failure with a log line instead.

use crate::error::BoopError;

/// The standard Result type for boop operations.
///
/// # Examples
///
/// ```
/// use boop_core::{BoopError, Result};
///
/// fn resolve(found: bool) -> Result<&'static str> {
///     if found {
///         Ok("target")
///     } else {
///         Err(BoopError::target_resolution(".missing"))
///     }
/// }
///
/// assert!(resolve(true).is_ok());
/// assert!(resolve(false).is_err());
/// ```
pub type Result<T> = std::result::Result<T, BoopError>;

/// Extension trait for absorbing errors inside event handlers.
pub trait ResultExt<T> {
    /// Convert a Result to an Option, logging the error as a warning.
    fn into_option_logged(self, context: &str) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn into_option_logged(self, context: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "{context}");
                None
            }
        }
    }
}
