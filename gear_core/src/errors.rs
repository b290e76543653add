//! # Error Types
//!
//! Structured error types for gear_core. Every failure a calculation can
//! produce is one of these variants; nothing in this crate panics on bad
//! input. Errors carry enough context to render a useful message in place
//! of a result and to branch on programmatically.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::errors::{CalcError, CalcResult};
//!
//! fn validate_bore(bore_in: f64) -> CalcResult<()> {
//!     if bore_in <= 0.0 {
//!         return Err(CalcError::out_of_range("bore_in", bore_in, 0.0, 10.0));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for gear_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant maps to one failure class in the validation/evaluation
/// pipeline. All variants are non-fatal: the dispatch layer converts them
/// into a failed [`crate::envelope::ResultEnvelope`] and no error escapes
/// the formula layer.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A required input field was not supplied
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// An input could not be parsed as a number
    #[error("Invalid number for '{field}': {value}")]
    InvalidNumber { field: String, value: String },

    /// A numeric input is outside its documented valid domain
    #[error("'{field}' = {value} is out of range ({min} to {max})")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// An enumerated input is not one of the recognized options
    #[error("Unknown option for '{field}': '{value}' (expected one of {expected})")]
    UnknownOption {
        field: String,
        value: String,
        expected: String,
    },

    /// A formula divisor evaluated to zero (or near enough to zero)
    #[error("Division by zero: '{divisor}' must be nonzero")]
    DivisionByZero { divisor: String },

    /// A computed result falls outside its physically meaningful range
    #[error("Result out of domain: {quantity} = {value} - {reason}")]
    OutOfDomain {
        quantity: String,
        value: f64,
        reason: String,
    },
}

impl CalcError {
    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidNumber error
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(field: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        CalcError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        }
    }

    /// Create an UnknownOption error
    pub fn unknown_option(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        CalcError::UnknownOption {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(divisor: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            divisor: divisor.into(),
        }
    }

    /// Create an OutOfDomain error
    pub fn out_of_domain(quantity: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        CalcError::OutOfDomain {
            quantity: quantity.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Whether this error was raised before the formula ran (an input
    /// problem) rather than by the evaluation itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::MissingField { .. }
                | CalcError::InvalidNumber { .. }
                | CalcError::OutOfRange { .. }
                | CalcError::UnknownOption { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InvalidNumber { .. } => "INVALID_NUMBER",
            CalcError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalcError::UnknownOption { .. } => "UNKNOWN_OPTION",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::OutOfDomain { .. } => "OUT_OF_DOMAIN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::out_of_range("compression_ratio", 45.0, 1.0, 30.0);
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("bore_in").error_code(), "MISSING_FIELD");
        assert_eq!(
            CalcError::division_by_zero("pinion_teeth").error_code(),
            "DIVISION_BY_ZERO"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(CalcError::invalid_number("rpm", "fast").is_input_error());
        assert!(!CalcError::division_by_zero("rpm").is_input_error());
    }

    #[test]
    fn test_display_messages() {
        let err = CalcError::unknown_option("fluid_type", "kerosene", "gasoline, motor-oil, transmission-fluid, water");
        let msg = err.to_string();
        assert!(msg.contains("fluid_type"));
        assert!(msg.contains("kerosene"));
    }
}
