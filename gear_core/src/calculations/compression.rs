//! # Compression Ratio Horsepower
//!
//! Estimates the horsepower change from raising (or lowering) an engine's
//! static compression ratio. There is no single canonical closed form for
//! this in the hot-rodding literature; the estimate here integrates a
//! piecewise per-ratio-point percentage table, with the per-point gain
//! tapering off at higher ratios. The table is the configuration surface:
//! adjust the coefficients there, not the integration.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::calculations::compression::{CompressionInput, calculate};
//!
//! let input = CompressionInput {
//!     cr_old: 9.0,
//!     cr_new: 10.0,
//!     base_hp: Some(300.0),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.percent_change - 3.5).abs() < 0.01);
//! assert!((result.new_hp.unwrap() - 310.5).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use crate::envelope::{CalculationResult, DerivedValue, Priority, Recommendation, Severity, Warning};
use crate::errors::{CalcError, CalcResult};
use crate::validate::{self, RawInputs};

use super::Shaped;

/// Valid compression ratio domain
const MIN_CR: f64 = 1.0;
const MAX_CR: f64 = 30.0;

const MAX_BASE_HP: f64 = 5000.0;

/// Highest compression ratio a naturally aspirated engine typically
/// tolerates on premium pump fuel.
pub const SAFE_NA_COMPRESSION: f64 = 11.0;

/// Per-ratio-point percentage gain, by compression ratio range.
///
/// Each entry is (ratio the rate applies from, percent per point). The
/// rate holds until the next entry's ratio. Gains diminish as the ratio
/// climbs, which keeps the curve monotonic but sub-linear overall.
const CR_GAIN_STEPS: &[(f64, f64)] = &[
    (0.0, 4.0),
    (9.0, 3.5),
    (11.0, 3.0),
    (13.0, 2.5),
];

/// Input parameters for the compression ratio estimate.
///
/// ## JSON Example
///
/// ```json
/// { "cr_old": 9.0, "cr_new": 10.5, "base_hp": 300.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionInput {
    /// Current compression ratio (e.g., 9.0 for 9.0:1)
    pub cr_old: f64,

    /// New compression ratio
    pub cr_new: f64,

    /// Baseline horsepower to apply the percentage to, if known
    pub base_hp: Option<f64>,
}

impl CompressionInput {
    /// Parse and range-check raw form inputs.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let cr_old = validate::number_in(raw, "cr_old", MIN_CR, MAX_CR)?;
        let cr_new = validate::number_in(raw, "cr_new", MIN_CR, MAX_CR)?;
        let base_hp = match validate::optional_number(raw, "base_hp")? {
            Some(hp) => {
                if hp <= 0.0 || hp > MAX_BASE_HP {
                    return Err(CalcError::out_of_range("base_hp", hp, 0.0, MAX_BASE_HP));
                }
                Some(hp)
            }
            None => None,
        };
        Ok(Self {
            cr_old,
            cr_new,
            base_hp,
        })
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("cr_old", self.cr_old), ("cr_new", self.cr_new)] {
            if !(MIN_CR..=MAX_CR).contains(&value) {
                return Err(CalcError::out_of_range(field, value, MIN_CR, MAX_CR));
            }
        }
        Ok(())
    }
}

/// Results from the compression ratio estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionResult {
    /// Estimated percent horsepower change (negative when lowering CR)
    pub percent_change: f64,

    /// Horsepower delta, when a baseline was supplied
    pub hp_change: Option<f64>,

    /// Baseline plus delta, when a baseline was supplied
    pub new_hp: Option<f64>,
}

/// Integrate the per-point gain table over an ascending ratio interval.
fn integrate_gain(lo: f64, hi: f64) -> f64 {
    let mut total = 0.0;
    for (i, &(start, rate)) in CR_GAIN_STEPS.iter().enumerate() {
        let end = CR_GAIN_STEPS
            .get(i + 1)
            .map(|&(next_start, _)| next_start)
            .unwrap_or(f64::INFINITY);
        let seg_lo = lo.max(start);
        let seg_hi = hi.min(end);
        if seg_hi > seg_lo {
            total += (seg_hi - seg_lo) * rate;
        }
    }
    total
}

/// Estimate the horsepower change between two compression ratios.
pub fn calculate(input: &CompressionInput) -> CalcResult<CompressionResult> {
    input.validate()?;

    let magnitude = integrate_gain(input.cr_old.min(input.cr_new), input.cr_old.max(input.cr_new));
    let percent_change = if input.cr_new >= input.cr_old {
        magnitude
    } else {
        -magnitude
    };

    let (hp_change, new_hp) = match input.base_hp {
        Some(base) => {
            let delta = base * percent_change / 100.0;
            (Some(delta), Some(base + delta))
        }
        None => (None, None),
    };

    Ok(CompressionResult {
        percent_change,
        hp_change,
        new_hp,
    })
}

/// Full pipeline for dispatch: parse, calculate, shape.
pub(crate) fn run(raw: &RawInputs) -> CalcResult<Shaped> {
    let input = CompressionInput::from_raw(raw)?;
    let result = calculate(&input)?;

    let mut shaped = CalculationResult::new(result.percent_change, "%", 1);
    if let (Some(delta), Some(total)) = (result.hp_change, result.new_hp) {
        shaped = shaped
            .with_derived(DerivedValue::new("hp_change", delta, "HP", 0))
            .with_derived(DerivedValue::new("new_hp", total, "HP", 0));
    }

    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();
    if input.cr_new > SAFE_NA_COMPRESSION {
        let severity = if input.cr_new > 12.5 {
            Severity::High
        } else {
            Severity::Medium
        };
        warnings.push(Warning::safety(
            severity,
            format!(
                "{:.1}:1 is beyond the ~{SAFE_NA_COMPRESSION:.0}:1 pump-fuel limit for a naturally aspirated engine",
                input.cr_new
            ),
        ));
        recommendations.push(Recommendation::tuning(
            Priority::High,
            "Plan for higher-octane fuel, and verify ignition timing against detonation",
        ));
    }

    Ok(Shaped::new(shaped)
        .with_warnings(warnings)
        .with_recommendations(recommendations))
}
