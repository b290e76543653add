//! # Input Validation
//!
//! Shared validation helpers that turn raw form values into typed,
//! range-checked inputs. Every formula module funnels its raw inputs
//! through these before evaluating, so parse failures, missing fields,
//! out-of-range values, and unrecognized options all surface as the same
//! structured [`CalcError`] variants regardless of which calculation ran.
//!
//! Raw values arrive as either numbers or strings (form fields are
//! strings; JSON callers may send numbers directly). [`RawValue`] accepts
//! both, and [`number`] parses strings leniently (surrounding whitespace
//! is ignored).
//!
//! ## Example
//!
//! ```rust
//! use gear_core::validate::{self, RawInputs, RawValue};
//!
//! let mut raw = RawInputs::new();
//! raw.insert("bore_in".into(), RawValue::Text("4.03".into()));
//!
//! let bore = validate::positive(&raw, "bore_in").unwrap();
//! assert_eq!(bore, 4.03);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A raw user-entered value, prior to validation.
///
/// Untagged so JSON callers can pass either `4.03` or `"4.03"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Render the value for error messages and the envelope input echo.
    pub fn display(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// Raw inputs for one calculation: parameter name to raw value.
///
/// BTreeMap keeps the JSON echo in the envelope deterministic.
pub type RawInputs = BTreeMap<String, RawValue>;

/// Build a [`RawInputs`] map from (name, value) pairs.
///
/// ```rust
/// use gear_core::validate::{inputs, RawValue};
///
/// let raw = inputs([("hp", RawValue::Number(300.0)), ("rpm", "5252".into())]);
/// assert_eq!(raw.len(), 2);
/// ```
pub fn inputs<const N: usize>(pairs: [(&str, RawValue); N]) -> RawInputs {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Look up a required field, failing with `MissingField` if absent.
pub fn require<'a>(raw: &'a RawInputs, field: &str) -> CalcResult<&'a RawValue> {
    raw.get(field).ok_or_else(|| CalcError::missing_field(field))
}

/// Parse a required field as a finite f64.
///
/// Strings are trimmed before parsing. Non-finite values (NaN, infinity)
/// fail the same way unparseable text does.
pub fn number(raw: &RawInputs, field: &str) -> CalcResult<f64> {
    let value = require(raw, field)?;
    let parsed = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CalcError::invalid_number(field, s.clone()))?,
    };
    if !parsed.is_finite() {
        return Err(CalcError::invalid_number(field, value.display()));
    }
    Ok(parsed)
}

/// Parse an optional field as a finite f64. Absent fields yield `None`;
/// present-but-unparseable fields still fail.
pub fn optional_number(raw: &RawInputs, field: &str) -> CalcResult<Option<f64>> {
    if raw.contains_key(field) {
        number(raw, field).map(Some)
    } else {
        Ok(None)
    }
}

/// Parse a required field and check it against an inclusive range.
pub fn number_in(raw: &RawInputs, field: &str, min: f64, max: f64) -> CalcResult<f64> {
    let value = number(raw, field)?;
    if value < min || value > max {
        return Err(CalcError::out_of_range(field, value, min, max));
    }
    Ok(value)
}

/// Parse a required field that must be strictly positive.
pub fn positive(raw: &RawInputs, field: &str) -> CalcResult<f64> {
    let value = number(raw, field)?;
    if value <= 0.0 {
        return Err(CalcError::out_of_range(field, value, 0.0, f64::INFINITY));
    }
    Ok(value)
}

/// Parse a required field that must be strictly positive and at most `max`.
pub fn positive_in(raw: &RawInputs, field: &str, max: f64) -> CalcResult<f64> {
    let value = number(raw, field)?;
    if value <= 0.0 || value > max {
        return Err(CalcError::out_of_range(field, value, 0.0, max));
    }
    Ok(value)
}

/// Parse a required field as a whole number within an inclusive range.
///
/// Fractional values fail as `InvalidNumber` (a cylinder count of 7.5 is
/// not a rounding problem, it is a bad input).
pub fn integer_in(raw: &RawInputs, field: &str, min: u32, max: u32) -> CalcResult<u32> {
    let value = number(raw, field)?;
    if value.fract() != 0.0 {
        return Err(CalcError::invalid_number(field, value.to_string()));
    }
    if value < min as f64 || value > max as f64 {
        return Err(CalcError::out_of_range(field, value, min as f64, max as f64));
    }
    Ok(value as u32)
}

/// Parse a required enumerated field using the supplied parser.
///
/// The parser receives the trimmed string form of the value and returns
/// `None` for unrecognized options; `expected` names the recognized set
/// for the error message.
pub fn option<T>(
    raw: &RawInputs,
    field: &str,
    expected: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> CalcResult<T> {
    let value = require(raw, field)?;
    let text = value.display();
    parse(text.trim()).ok_or_else(|| CalcError::unknown_option(field, text, expected))
}

/// Threshold below which a divisor is treated as zero.
///
/// Guards against both exact zeros (pinion teeth = 0) and values close
/// enough to zero that the quotient is numerically meaningless.
pub const DIVISOR_EPSILON: f64 = 1e-9;

/// Check a computed or validated divisor before dividing by it.
pub fn nonzero_divisor(value: f64, divisor_name: &str) -> CalcResult<f64> {
    if value.abs() < DIVISOR_EPSILON {
        return Err(CalcError::division_by_zero(divisor_name));
    }
    Ok(value)
}

/// Check that a computed result lies in a physically meaningful range.
pub fn in_domain(value: f64, quantity: &str, reason: &str) -> CalcResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::out_of_domain(quantity, value, reason));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with(field: &str, value: RawValue) -> RawInputs {
        inputs([(field, value)])
    }

    #[test]
    fn test_missing_field() {
        let raw = RawInputs::new();
        let err = number(&raw, "bore_in").unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_parses_text_and_numbers() {
        assert_eq!(number(&raw_with("x", RawValue::Number(4.0)), "x").unwrap(), 4.0);
        assert_eq!(number(&raw_with("x", "  3.48 ".into()), "x").unwrap(), 3.48);
    }

    #[test]
    fn test_unparseable_text() {
        let err = number(&raw_with("rpm", "fast".into()), "rpm").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_NUMBER");
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = number(&raw_with("x", RawValue::Number(f64::NAN)), "x").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_NUMBER");
        let err = number(&raw_with("x", "inf".into()), "x").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_NUMBER");
    }

    #[test]
    fn test_range_check_inclusive() {
        let raw = raw_with("cr", RawValue::Number(30.0));
        assert_eq!(number_in(&raw, "cr", 1.0, 30.0).unwrap(), 30.0);

        let raw = raw_with("cr", RawValue::Number(30.5));
        let err = number_in(&raw, "cr", 1.0, 30.0).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_positive() {
        let err = positive(&raw_with("stroke_in", RawValue::Number(0.0)), "stroke_in").unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
        assert_eq!(positive(&raw_with("stroke_in", RawValue::Number(3.48)), "stroke_in").unwrap(), 3.48);
    }

    #[test]
    fn test_integer_rejects_fractions() {
        let err = integer_in(&raw_with("cylinders", RawValue::Number(7.5)), "cylinders", 1, 16).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_NUMBER");
        assert_eq!(integer_in(&raw_with("cylinders", "8".into()), "cylinders", 1, 16).unwrap(), 8);
    }

    #[test]
    fn test_optional_number() {
        let raw = RawInputs::new();
        assert_eq!(optional_number(&raw, "max_rpm").unwrap(), None);
        let raw = raw_with("max_rpm", RawValue::Number(6500.0));
        assert_eq!(optional_number(&raw, "max_rpm").unwrap(), Some(6500.0));
    }

    #[test]
    fn test_option_parser() {
        let raw = raw_with("fluid_type", "water".into());
        let parsed = option(&raw, "fluid_type", "water, gasoline", |s| match s {
            "water" => Some(1),
            "gasoline" => Some(2),
            _ => None,
        })
        .unwrap();
        assert_eq!(parsed, 1);

        let raw = raw_with("fluid_type", "mercury".into());
        let err = option(&raw, "fluid_type", "water, gasoline", |_: &str| None::<i32>).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_OPTION");
    }

    #[test]
    fn test_nonzero_divisor() {
        assert!(nonzero_divisor(0.0, "pinion_teeth").is_err());
        assert!(nonzero_divisor(1e-12, "weight_lb").is_err());
        assert_eq!(nonzero_divisor(11.0, "pinion_teeth").unwrap(), 11.0);
    }

    #[test]
    fn test_in_domain() {
        let err = in_domain(-350.0, "displacement_ci", "volume cannot be negative").unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_DOMAIN");
    }
}
