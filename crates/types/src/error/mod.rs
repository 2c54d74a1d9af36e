// Path: crates/types/src/error/mod.rs
//! Core error types for the scoring engine.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised by the pure scoring entry points.
///
/// The engine never performs I/O, so every variant describes a caller
/// contract violation rather than a transient failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// An input value was negative, non-finite or otherwise outside its domain.
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput {
        /// The name of the offending field.
        field: &'static str,
        /// A human readable description of the violation.
        reason: String,
    },
    /// A configuration parameter failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ScoringError {
    /// Builds an `InvalidInput` error for `field`.
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the offending field name for `InvalidInput` errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            Self::InvalidConfiguration(_) => None,
        }
    }
}

impl ErrorCode for ScoringError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "SCORING_INVALID_INPUT",
            Self::InvalidConfiguration(_) => "SCORING_INVALID_CONFIGURATION",
        }
    }
}

/// Rejects negative or non-finite floats, naming `field` in the error.
pub fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64, ScoringError> {
    if !value.is_finite() {
        return Err(ScoringError::invalid_input(
            field,
            format!("expected a finite value, got {value}"),
        ));
    }
    if value < 0.0 {
        return Err(ScoringError::invalid_input(
            field,
            format!("expected a non-negative value, got {value}"),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_names_field() {
        let err = ensure_non_negative("revenue_usd", -1.0).unwrap_err();
        assert_eq!(err.field(), Some("revenue_usd"));
        assert_eq!(err.code(), "SCORING_INVALID_INPUT");
        assert!(err.to_string().contains("revenue_usd"));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(ensure_non_negative("tao_usd_price", f64::NAN).is_err());
        assert!(ensure_non_negative("tao_usd_price", f64::INFINITY).is_err());
        assert_eq!(ensure_non_negative("tao_usd_price", 0.0), Ok(0.0));
    }

    #[test]
    fn configuration_errors_have_no_field() {
        let err = ScoringError::InvalidConfiguration("target_ratio must be > 0".into());
        assert_eq!(err.field(), None);
        assert_eq!(err.code(), "SCORING_INVALID_CONFIGURATION");
    }
}
