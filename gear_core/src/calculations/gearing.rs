//! # Gearing
//!
//! Final drive ratio and road-speed RPM calculations. The gear ratio
//! calculator runs in three modes: from ring and pinion tooth counts,
//! from a measured speed/RPM pair, or as an ideal-ratio recommendation
//! for a target cruise RPM.
//!
//! The constant 336 converts mph and tire diameter into revolutions per
//! minute: 63360 inches per mile / 60 minutes = 1056 inches per minute
//! per mph, divided by pi for the tire circumference gives 1056 / pi =
//! 336.1, which the trade rounds to 336.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::calculations::gearing::{GearRatioInput, gear_ratio};
//!
//! let input = GearRatioInput::Teeth { ring_teeth: 41, pinion_teeth: 11 };
//! let result = gear_ratio(&input).unwrap();
//! assert!((result.ratio - 3.727).abs() < 0.001);
//! ```

use serde::{Deserialize, Serialize};

use crate::envelope::{CalculationResult, Priority, Recommendation, Severity, Warning};
use crate::errors::CalcResult;
use crate::units::{Inches, Rpm};
use crate::validate::{self, RawInputs};

use super::Shaped;

/// mph-to-RPM gearing constant (1056 in/min per mph, over pi, rounded)
pub const GEAR_RATIO_CONSTANT: f64 = 336.0;

const MAX_TEETH: u32 = 200;
const MAX_RPM: f64 = 20_000.0;
const MAX_SPEED_MPH: f64 = 500.0;
const MIN_TIRE_IN: f64 = 10.0;
const MAX_TIRE_IN: f64 = 50.0;
const MIN_RATIO: f64 = 0.5;
const MAX_RATIO: f64 = 20.0;

/// Ratio above which cruise RPM and fuel economy suffer noticeably.
const DEEP_GEAR_THRESHOLD: f64 = 4.56;

/// RPM above which most street engines are past redline.
const TYPICAL_REDLINE_RPM: f64 = 6500.0;

/// Axle ratios commonly available off the shelf, for recommendations.
const COMMON_AXLE_RATIOS: &[f64] = &[
    2.73, 3.08, 3.23, 3.42, 3.55, 3.73, 3.90, 4.10, 4.30, 4.56, 4.88,
];

// ============================================================================
// Gear Ratio
// ============================================================================

/// Input for the gear ratio calculation, one variant per mode.
///
/// ## JSON Examples
///
/// ```json
/// { "mode": "teeth", "ring_teeth": 41, "pinion_teeth": 11 }
/// ```
///
/// ```json
/// { "mode": "speed", "engine_rpm": 3000.0, "tire_diameter_in": 28.0, "speed_mph": 70.0 }
/// ```
///
/// ```json
/// { "mode": "ideal", "cruise_rpm": 2800.0, "tire_diameter_in": 28.0, "cruise_speed_mph": 70.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GearRatioInput {
    /// ratio = ring_teeth / pinion_teeth
    Teeth { ring_teeth: u32, pinion_teeth: u32 },
    /// ratio = (RPM * tire_dia) / (speed * 336), from measured values
    Speed {
        engine_rpm: f64,
        tire_diameter_in: f64,
        speed_mph: f64,
    },
    /// Same arithmetic as Speed, but the RPM is a target and the output
    /// is a recommendation
    Ideal {
        cruise_rpm: f64,
        tire_diameter_in: f64,
        cruise_speed_mph: f64,
    },
}

impl GearRatioInput {
    /// Parse raw form inputs. The `mode` field selects the variant.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let mode = validate::option(raw, "mode", "teeth, speed, ideal", |s| {
            match s.to_ascii_lowercase().as_str() {
                "teeth" => Some("teeth"),
                "speed" => Some("speed"),
                "ideal" => Some("ideal"),
                _ => None,
            }
        })?;

        let input = match mode {
            "teeth" => GearRatioInput::Teeth {
                ring_teeth: validate::integer_in(raw, "ring_teeth", 0, MAX_TEETH)?,
                pinion_teeth: validate::integer_in(raw, "pinion_teeth", 0, MAX_TEETH)?,
            },
            "speed" => GearRatioInput::Speed {
                engine_rpm: validate::number_in(raw, "engine_rpm", 0.0, MAX_RPM)?,
                tire_diameter_in: validate::number_in(raw, "tire_diameter_in", MIN_TIRE_IN, MAX_TIRE_IN)?,
                speed_mph: validate::number_in(raw, "speed_mph", 0.0, MAX_SPEED_MPH)?,
            },
            _ => GearRatioInput::Ideal {
                cruise_rpm: validate::number_in(raw, "cruise_rpm", 0.0, MAX_RPM)?,
                tire_diameter_in: validate::number_in(raw, "tire_diameter_in", MIN_TIRE_IN, MAX_TIRE_IN)?,
                cruise_speed_mph: validate::number_in(raw, "cruise_speed_mph", 0.0, MAX_SPEED_MPH)?,
            },
        };
        Ok(input)
    }

    /// Short label for the mode, used in results.
    pub fn mode_label(&self) -> &'static str {
        match self {
            GearRatioInput::Teeth { .. } => "teeth",
            GearRatioInput::Speed { .. } => "speed",
            GearRatioInput::Ideal { .. } => "ideal",
        }
    }
}

/// Results from the gear ratio calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearRatioResult {
    /// Final drive ratio (e.g., 3.73 for 3.73:1)
    pub ratio: f64,

    /// Which mode produced it
    pub mode: String,

    /// The off-the-shelf axle ratio closest to the computed value
    pub nearest_common_ratio: f64,
}

/// Calculate the final drive ratio.
///
/// Zero tooth counts, zero speed, and zero RPM all make the ratio
/// degenerate and fail as `DivisionByZero` rather than producing 0,
/// NaN, or infinity.
pub fn gear_ratio(input: &GearRatioInput) -> CalcResult<GearRatioResult> {
    let ratio = match *input {
        GearRatioInput::Teeth {
            ring_teeth,
            pinion_teeth,
        } => {
            let ring = validate::nonzero_divisor(ring_teeth as f64, "ring_teeth")?;
            let pinion = validate::nonzero_divisor(pinion_teeth as f64, "pinion_teeth")?;
            ring / pinion
        }
        GearRatioInput::Speed {
            engine_rpm,
            tire_diameter_in,
            speed_mph,
        }
        | GearRatioInput::Ideal {
            cruise_rpm: engine_rpm,
            tire_diameter_in,
            cruise_speed_mph: speed_mph,
        } => {
            let rpm = validate::nonzero_divisor(engine_rpm, "engine_rpm")?;
            let speed = validate::nonzero_divisor(speed_mph, "speed_mph")?;
            rpm * tire_diameter_in / (speed * GEAR_RATIO_CONSTANT)
        }
    };

    validate::in_domain(ratio, "gear_ratio", "ratio must be positive")?;

    let nearest_common_ratio = COMMON_AXLE_RATIOS
        .iter()
        .copied()
        .fold(COMMON_AXLE_RATIOS[0], |best, candidate| {
            if (candidate - ratio).abs() < (best - ratio).abs() {
                candidate
            } else {
                best
            }
        });

    Ok(GearRatioResult {
        ratio,
        mode: input.mode_label().to_string(),
        nearest_common_ratio,
    })
}

/// Full pipeline for dispatch: parse, calculate, shape.
pub(crate) fn run_gear_ratio(raw: &RawInputs) -> CalcResult<Shaped> {
    let input = GearRatioInput::from_raw(raw)?;
    let result = gear_ratio(&input)?;

    let shaped = CalculationResult::new(result.ratio, ":1", 3);

    let mut warnings = Vec::new();
    if result.ratio >= DEEP_GEAR_THRESHOLD {
        warnings.push(Warning::performance(
            Severity::Low,
            format!(
                "{:.2}:1 is a deep gear set; expect higher cruise RPM and lower highway economy",
                result.ratio
            ),
        ));
    }

    let mut recommendations = Vec::new();
    if matches!(input, GearRatioInput::Ideal { .. }) {
        recommendations.push(Recommendation::performance(
            Priority::Medium,
            format!(
                "The closest common axle ratio to the {:.3}:1 ideal is {:.2}:1",
                result.ratio, result.nearest_common_ratio
            ),
        ));
    }

    Ok(Shaped::new(shaped)
        .with_warnings(warnings)
        .with_recommendations(recommendations))
}

// ============================================================================
// RPM From Speed
// ============================================================================

/// Input parameters for engine RPM at road speed.
///
/// ## JSON Example
///
/// ```json
/// { "speed_mph": 65.0, "gear_ratio": 3.73, "tire_diameter_in": 28.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpmFromSpeedInput {
    /// Road speed in mph
    pub speed_mph: f64,

    /// Overall gear ratio (final drive, or final drive times gearbox ratio)
    pub gear_ratio: f64,

    /// Tire diameter in inches
    pub tire_diameter_in: f64,
}

impl RpmFromSpeedInput {
    /// Parse and range-check raw form inputs.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        Ok(Self {
            speed_mph: validate::number_in(raw, "speed_mph", 0.0, MAX_SPEED_MPH)?,
            gear_ratio: validate::number_in(raw, "gear_ratio", MIN_RATIO, MAX_RATIO)?,
            tire_diameter_in: validate::number_in(raw, "tire_diameter_in", 0.0, MAX_TIRE_IN)?,
        })
    }
}

/// Results from the RPM calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpmFromSpeedResult {
    /// Engine speed in RPM
    pub rpm: f64,
}

/// Calculate engine RPM at a given road speed.
///
/// RPM = (speed * ratio * 336) / tire_diameter
pub fn rpm_from_speed(input: &RpmFromSpeedInput) -> CalcResult<RpmFromSpeedResult> {
    let tire = Inches(validate::nonzero_divisor(input.tire_diameter_in, "tire_diameter_in")?);
    let rpm = Rpm(input.speed_mph * input.gear_ratio * GEAR_RATIO_CONSTANT / tire.value());
    validate::in_domain(rpm.value(), "rpm", "engine speed must be non-negative")?;
    Ok(RpmFromSpeedResult { rpm: rpm.value() })
}

/// Full pipeline for dispatch: parse, calculate, shape.
pub(crate) fn run_rpm_from_speed(raw: &RawInputs) -> CalcResult<Shaped> {
    let input = RpmFromSpeedInput::from_raw(raw)?;
    let result = rpm_from_speed(&input)?;

    let shaped = CalculationResult::new(result.rpm, "RPM", 0);

    let mut warnings = Vec::new();
    if result.rpm > TYPICAL_REDLINE_RPM {
        warnings.push(Warning::safety(
            Severity::Medium,
            format!(
                "{:.0} RPM at {:.0} mph is past a typical street redline; check gearing or tire size",
                result.rpm, input.speed_mph
            ),
        ));
    }

    Ok(Shaped::new(shaped).with_warnings(warnings))
}
