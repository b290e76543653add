//! # Engine Displacement
//!
//! Computes total swept cylinder volume from bore, stroke, and cylinder
//! count. Results are reported in cubic inches with the liter figure
//! carried as a derived value.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::calculations::displacement::{DisplacementInput, calculate};
//!
//! let input = DisplacementInput {
//!     bore_in: 4.0,
//!     stroke_in: 3.48,
//!     cylinders: 8,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.cubic_inches - 349.85).abs() < 0.1);
//! assert!((result.liters - 5.73).abs() < 0.01);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::envelope::{CalculationResult, DerivedValue};
use crate::errors::{CalcError, CalcResult};
use crate::units::{CubicInches, Liters};
use crate::validate::{self, RawInputs};

use super::Shaped;

/// Largest bore/stroke accepted, in inches. Anything past this is a data
/// entry error, not an engine.
const MAX_BORE_IN: f64 = 10.0;
const MAX_STROKE_IN: f64 = 12.0;

/// Cylinder count cap (V16 territory)
const MAX_CYLINDERS: u32 = 16;

/// Input parameters for engine displacement.
///
/// ## JSON Example
///
/// ```json
/// { "bore_in": 4.03, "stroke_in": 3.48, "cylinders": 8 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplacementInput {
    /// Cylinder bore diameter in inches
    pub bore_in: f64,

    /// Piston stroke length in inches
    pub stroke_in: f64,

    /// Number of cylinders
    pub cylinders: u32,
}

impl DisplacementInput {
    /// Parse and range-check raw form inputs.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let bore_in = validate::number_in(raw, "bore_in", 0.0, MAX_BORE_IN)?;
        let stroke_in = validate::number_in(raw, "stroke_in", 0.0, MAX_STROKE_IN)?;
        let cylinders = validate::integer_in(raw, "cylinders", 1, MAX_CYLINDERS)?;
        let input = Self {
            bore_in,
            stroke_in,
            cylinders,
        };
        input.validate()?;
        Ok(input)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.bore_in <= 0.0 {
            return Err(CalcError::out_of_range("bore_in", self.bore_in, 0.0, MAX_BORE_IN));
        }
        if self.stroke_in <= 0.0 {
            return Err(CalcError::out_of_range(
                "stroke_in",
                self.stroke_in,
                0.0,
                MAX_STROKE_IN,
            ));
        }
        if self.cylinders == 0 || self.cylinders > MAX_CYLINDERS {
            return Err(CalcError::out_of_range(
                "cylinders",
                self.cylinders as f64,
                1.0,
                MAX_CYLINDERS as f64,
            ));
        }
        Ok(())
    }
}

/// Results from the displacement calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplacementResult {
    /// Total displacement in cubic inches
    pub cubic_inches: f64,

    /// Total displacement in liters
    pub liters: f64,

    /// Swept volume of a single cylinder in cubic inches
    pub per_cylinder_ci: f64,
}

/// Calculate engine displacement.
///
/// CI = pi/4 * bore^2 * stroke * cylinders, with bore and stroke in
/// inches. The liter figure is derived from the same full-precision CI
/// value, not from the rounded display value.
pub fn calculate(input: &DisplacementInput) -> CalcResult<DisplacementResult> {
    input.validate()?;

    let per_cylinder_ci = PI / 4.0 * input.bore_in.powi(2) * input.stroke_in;
    let ci = CubicInches(per_cylinder_ci * input.cylinders as f64);

    validate::in_domain(ci.value(), "displacement_ci", "swept volume must be positive")?;

    let liters: Liters = ci.into();

    Ok(DisplacementResult {
        cubic_inches: ci.value(),
        liters: liters.value(),
        per_cylinder_ci,
    })
}

/// Full pipeline for dispatch: parse, calculate, shape.
pub(crate) fn run(raw: &RawInputs) -> CalcResult<Shaped> {
    let input = DisplacementInput::from_raw(raw)?;
    let result = calculate(&input)?;

    let shaped = CalculationResult::new(result.cubic_inches, "CI", 1)
        .with_derived(DerivedValue::new("liters", result.liters, "L", 2))
        .with_derived(DerivedValue::new(
            "per_cylinder",
            result.per_cylinder_ci,
            "CI",
            2,
        ));

    Ok(Shaped::new(shaped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{inputs, RawValue};

    fn small_block() -> DisplacementInput {
        DisplacementInput {
            bore_in: 4.0,
            stroke_in: 3.48,
            cylinders: 8,
        }
    }

    #[test]
    fn test_small_block_displacement() {
        let result = calculate(&small_block()).unwrap();

        // CI = pi/4 * 4.0^2 * 3.48 * 8 = 349.85
        assert!((result.cubic_inches - 349.85).abs() < 0.05);
        assert!((result.liters - 5.73).abs() < 0.01);
    }

    #[test]
    fn test_per_cylinder_volume() {
        let result = calculate(&small_block()).unwrap();
        assert!((result.per_cylinder_ci * 8.0 - result.cubic_inches).abs() < 1e-9);
    }

    #[test]
    fn test_displacement_increases_with_stroke() {
        let short = calculate(&DisplacementInput {
            stroke_in: 3.0,
            ..small_block()
        })
        .unwrap();
        let long = calculate(&DisplacementInput {
            stroke_in: 4.0,
            ..small_block()
        })
        .unwrap();
        assert!(long.cubic_inches > short.cubic_inches);
    }

    #[test]
    fn test_zero_bore_rejected() {
        let mut input = small_block();
        input.bore_in = 0.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_cylinder_cap() {
        let raw = inputs([
            ("bore_in", RawValue::Number(4.0)),
            ("stroke_in", RawValue::Number(3.48)),
            ("cylinders", RawValue::Number(24.0)),
        ]);
        let err = DisplacementInput::from_raw(&raw).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_from_raw_accepts_strings() {
        let raw = inputs([
            ("bore_in", "4.03".into()),
            ("stroke_in", "3.48".into()),
            ("cylinders", "8".into()),
        ]);
        let input = DisplacementInput::from_raw(&raw).unwrap();
        assert_eq!(input.cylinders, 8);
        assert!((input.bore_in - 4.03).abs() < 1e-9);
    }

    #[test]
    fn test_shaped_output() {
        let raw = inputs([
            ("bore_in", RawValue::Number(4.0)),
            ("stroke_in", RawValue::Number(3.48)),
            ("cylinders", RawValue::Number(8.0)),
        ]);
        let shaped = run(&raw).unwrap();
        assert_eq!(shaped.result.unit, "CI");
        assert_eq!(shaped.result.precision, 1);
        assert_eq!(shaped.result.derived.len(), 2);
        assert_eq!(shaped.result.derived[0].label, "liters");
        assert!(shaped.warnings.is_empty());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let input = small_block();
        let json = serde_json::to_string(&input).unwrap();
        let roundtrip: DisplacementInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input.bore_in, roundtrip.bore_in);
        assert_eq!(input.cylinders, roundtrip.cylinders);
    }
}
