//! Error types for structured error handling.
//!
//! This module provides:
//! - `ParameterError`: Problems found when validating a [`ParameterSet`](crate::ParameterSet)
//! - `CurrencyError`: Errors from currency parsing

use thiserror::Error;

/// Problems found in a parameter snapshot.
///
/// The engine never fails on these; callers validate a snapshot before
/// invoking it and decide what to do with the findings.
///
/// # Examples
/// ```
/// use quote_core::ParameterError;
///
/// let err = ParameterError::Negative { field: "duration", value: -1.0 };
/// assert_eq!(format!("{}", err), "duration must not be negative (got -1)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A value that must be zero or positive was negative.
    #[error("{field} must not be negative (got {value})")]
    Negative {
        /// Offending field name
        field: &'static str,
        /// Value supplied
        value: f64,
    },

    /// A value was NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Offending field name
        field: &'static str,
    },

    /// A percentage lay outside `[0, 100]`.
    #[error("{field} must be a percentage between 0 and 100 (got {value})")]
    PercentOutOfRange {
        /// Offending field name
        field: &'static str,
        /// Value supplied
        value: f64,
    },

    /// Working days were unset or invalid and the default will be used.
    #[error("working_days must be positive (got {0}); the default of 30 applies")]
    WorkingDaysFallback(f64),
}

/// Currency-related errors.
///
/// # Examples
/// ```
/// use quote_core::CurrencyError;
///
/// let err = CurrencyError::UnknownCurrency("XYZ".to_string());
/// assert_eq!(format!("{}", err), "Unknown currency: XYZ");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_out_of_range_display() {
        let err = ParameterError::PercentOutOfRange {
            field: "insurance.rate",
            value: 120.0,
        };
        assert_eq!(
            err.to_string(),
            "insurance.rate must be a percentage between 0 and 100 (got 120)"
        );
    }

    #[test]
    fn test_not_finite_display() {
        let err = ParameterError::NotFinite { field: "margin" };
        assert!(err.to_string().contains("margin"));
    }
}
