//! Fiscal calendar error types.

use thiserror::Error;

/// Errors raised by calendar conversions and range resolution.
///
/// Both kinds are meant to be handled by the caller, usually by substituting
/// the current fiscal year and retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FiscalError {
    /// Input could not be read as a calendar date in a supported year.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Malformed fiscal-year label.
    #[error("Invalid fiscal year '{0}': expected YYYY-YYYY with consecutive years")]
    Validation(String),
}

impl FiscalError {
    /// Create an invalid date error.
    #[must_use]
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate(input.into())
    }

    /// Create a fiscal-year validation error.
    #[must_use]
    pub fn validation(label: impl Into<String>) -> Self {
        Self::Validation(label.into())
    }
}

impl From<FiscalError> for attachee_shared::AppError {
    fn from(err: FiscalError) -> Self {
        Self::Validation(err.to_string())
    }
}
