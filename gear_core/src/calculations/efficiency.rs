//! # Volumetric Efficiency
//!
//! Estimates how completely an engine fills its cylinders from measured
//! peak power, displacement, and the RPM where the power peak lands.
//!
//! The reduced form `VE% = (HP * 5252 * 2 * 60) / (CI * RPM)` folds the
//! torque constant, the four-stroke factor (two revolutions per intake
//! event), and the per-minute base into one expression; keep the
//! constants together or the percentage convention breaks.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::calculations::efficiency::{VolumetricEfficiencyInput, calculate};
//!
//! let input = VolumetricEfficiencyInput { hp: 300.0, displacement_ci: 350.0, rpm: 5500.0 };
//! let result = calculate(&input).unwrap();
//! assert!((result.ve_percent - 98.2).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use crate::classify::Bands;
use crate::envelope::{CalculationResult, Priority, Recommendation, Severity, Warning};
use crate::errors::CalcResult;
use crate::validate::{self, RawInputs};

use super::Shaped;

/// Combined constant: 5252 (torque relation) * 2 (revs per intake
/// stroke) * 60 (per-minute base).
const VE_CONSTANT: f64 = 5252.0 * 2.0 * 60.0;

const MAX_HP: f64 = 5000.0;
const MAX_DISPLACEMENT_CI: f64 = 1000.0;
const MAX_RPM: f64 = 20_000.0;

/// VE above this is implausible without forced induction.
const NA_VE_CEILING_PERCENT: f64 = 130.0;

/// Cylinder-filling quality bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VeBand {
    Poor,
    Average,
    Good,
    Excellent,
}

impl VeBand {
    pub fn label(&self) -> &'static str {
        match self {
            VeBand::Poor => "poor",
            VeBand::Average => "average",
            VeBand::Good => "good",
            VeBand::Excellent => "excellent",
        }
    }
}

/// Band thresholds in percent, inclusive lower bounds. A stock engine
/// lands in the 75-85 range; race heads and induction push past 95.
const VE_BANDS: Bands<VeBand> = Bands::new(
    VeBand::Poor,
    &[
        (75.0, VeBand::Average),
        (85.0, VeBand::Good),
        (95.0, VeBand::Excellent),
    ],
);

/// Input parameters for volumetric efficiency.
///
/// ## JSON Example
///
/// ```json
/// { "hp": 300.0, "displacement_ci": 350.0, "rpm": 5500.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumetricEfficiencyInput {
    /// Peak horsepower
    pub hp: f64,

    /// Engine displacement in cubic inches
    pub displacement_ci: f64,

    /// RPM at the power peak
    pub rpm: f64,
}

impl VolumetricEfficiencyInput {
    /// Parse and range-check raw form inputs.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        Ok(Self {
            hp: validate::positive_in(raw, "hp", MAX_HP)?,
            displacement_ci: validate::number_in(raw, "displacement_ci", 0.0, MAX_DISPLACEMENT_CI)?,
            rpm: validate::number_in(raw, "rpm", 0.0, MAX_RPM)?,
        })
    }
}

/// Results from the volumetric efficiency estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumetricEfficiencyResult {
    /// Volumetric efficiency as a percentage
    pub ve_percent: f64,

    /// Quality band
    pub band: VeBand,
}

/// Calculate volumetric efficiency.
///
/// Zero displacement or RPM fails as `DivisionByZero`.
pub fn calculate(input: &VolumetricEfficiencyInput) -> CalcResult<VolumetricEfficiencyResult> {
    let ci = validate::nonzero_divisor(input.displacement_ci, "displacement_ci")?;
    let rpm = validate::nonzero_divisor(input.rpm, "rpm")?;

    let ve_percent = input.hp * VE_CONSTANT / (ci * rpm);
    validate::in_domain(ve_percent, "ve_percent", "efficiency must be non-negative")?;

    Ok(VolumetricEfficiencyResult {
        ve_percent,
        band: VE_BANDS.classify(ve_percent),
    })
}

/// Full pipeline for dispatch: parse, calculate, shape.
pub(crate) fn run(raw: &RawInputs) -> CalcResult<Shaped> {
    let input = VolumetricEfficiencyInput::from_raw(raw)?;
    let result = calculate(&input)?;

    let shaped =
        CalculationResult::new(result.ve_percent, "%", 1).with_category(result.band.label());

    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();

    if result.ve_percent > NA_VE_CEILING_PERCENT {
        warnings.push(Warning::accuracy(
            Severity::Medium,
            format!(
                "{:.0}% VE is beyond naturally aspirated territory; check the inputs or account for boost",
                result.ve_percent
            ),
        ));
    }
    if result.band == VeBand::Poor {
        recommendations.push(Recommendation::tuning(
            Priority::Medium,
            "Look for intake or exhaust restrictions; head and cam work usually recovers the most",
        ));
    }

    Ok(Shaped::new(shaped)
        .with_warnings(warnings)
        .with_recommendations(recommendations))
}
