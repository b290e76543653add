//! # Forced and Ram Induction
//!
//! Horsepower gain from boost pressure, and the pressure recovery a
//! ram-air intake sees at speed.
//!
//! Both estimates rest on the same relation: one atmosphere of boost
//! (14.7 psi) roughly doubles airflow, so the percent gain is
//! `boost / 14.7 * 100` (about 7% per psi). The ram-air calculator first
//! converts vehicle speed to recovered pressure through an empirical
//! anchor table, then applies the same relation.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::calculations::induction::{SuperchargerInput, supercharger_gain};
//!
//! let input = SuperchargerInput { base_hp: 300.0, boost_psi: 10.0 };
//! let result = supercharger_gain(&input).unwrap();
//! assert!((result.hp_gain - 204.1).abs() < 0.1);
//! assert!((result.total_hp - 504.1).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use crate::envelope::{
    CalculationResult, DerivedValue, Priority, Recommendation, Severity, Warning,
};
use crate::errors::CalcResult;
use crate::units::{Mph, Psi};
use crate::validate::{self, RawInputs};

use super::Shaped;

/// Standard sea-level atmospheric pressure
pub const ATMOSPHERIC_PSI: f64 = 14.7;

const MAX_BASE_HP: f64 = 5000.0;
const MAX_BOOST_PSI: f64 = 50.0;
const MAX_SPEED_MPH: f64 = 300.0;

/// Boost level where stock fuel systems typically run out of headroom.
const FUEL_SYSTEM_BOOST_PSI: f64 = 8.0;

/// Boost level past one atmosphere; internals and tuning get serious here.
const HIGH_BOOST_PSI: f64 = ATMOSPHERIC_PSI;

/// Ram-air pressure recovery anchors: (mph, psi).
///
/// Values follow sea-level dynamic pressure (q = rho * v^2 / 2) assuming
/// a well-sealed intake. Linear interpolation between anchors; callers
/// are range-limited to the table.
const RAM_AIR_CURVE: &[(f64, f64)] = &[
    (0.0, 0.0),
    (40.0, 0.03),
    (60.0, 0.06),
    (80.0, 0.11),
    (100.0, 0.18),
    (120.0, 0.26),
    (150.0, 0.40),
    (200.0, 0.71),
    (250.0, 1.11),
    (300.0, 1.60),
];

// ============================================================================
// Supercharger Boost
// ============================================================================

/// Input parameters for the supercharger gain estimate.
///
/// ## JSON Example
///
/// ```json
/// { "base_hp": 300.0, "boost_psi": 10.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperchargerInput {
    /// Naturally aspirated baseline horsepower
    pub base_hp: f64,

    /// Boost pressure above atmospheric, in psi
    pub boost_psi: f64,
}

impl SuperchargerInput {
    /// Parse and range-check raw form inputs.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        Ok(Self {
            base_hp: validate::positive_in(raw, "base_hp", MAX_BASE_HP)?,
            boost_psi: validate::number_in(raw, "boost_psi", 0.0, MAX_BOOST_PSI)?,
        })
    }
}

/// Results from the boost gain estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostGainResult {
    /// Percent horsepower gain over the baseline
    pub percent_gain: f64,

    /// Horsepower added
    pub hp_gain: f64,

    /// Baseline plus gain
    pub total_hp: f64,
}

/// Estimate the horsepower gain from boost pressure.
pub fn supercharger_gain(input: &SuperchargerInput) -> CalcResult<BoostGainResult> {
    boost_gain(input.base_hp, Psi(input.boost_psi))
}

/// Shared boost arithmetic for supercharger and ram-air paths.
fn boost_gain(base_hp: f64, boost: Psi) -> CalcResult<BoostGainResult> {
    let percent_gain = boost.value() / ATMOSPHERIC_PSI * 100.0;
    let hp_gain = base_hp * boost.value() / ATMOSPHERIC_PSI;
    let total_hp = base_hp + hp_gain;

    validate::in_domain(total_hp, "total_hp", "power must be non-negative")?;

    Ok(BoostGainResult {
        percent_gain,
        hp_gain,
        total_hp,
    })
}

/// Warnings and recommendations shared by both induction calculators.
fn boost_advisories(boost_psi: f64) -> (Vec<Warning>, Vec<Recommendation>) {
    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();

    if boost_psi > HIGH_BOOST_PSI {
        warnings.push(Warning::safety(
            Severity::High,
            format!(
                "{boost_psi:.1} psi is more than one atmosphere of boost; forged internals and engine management are mandatory"
            ),
        ));
    } else if boost_psi > FUEL_SYSTEM_BOOST_PSI {
        warnings.push(Warning::safety(
            Severity::Medium,
            format!("{boost_psi:.1} psi will exceed stock fuel system capacity on most engines"),
        ));
    }

    if boost_psi > FUEL_SYSTEM_BOOST_PSI {
        recommendations.push(Recommendation::safety(
            Priority::High,
            "Upgrade injectors and fuel pump, and verify air/fuel ratio under load",
        ));
    }

    (warnings, recommendations)
}

/// Full pipeline for dispatch: parse, calculate, shape.
pub(crate) fn run_supercharger(raw: &RawInputs) -> CalcResult<Shaped> {
    let input = SuperchargerInput::from_raw(raw)?;
    let result = supercharger_gain(&input)?;

    let shaped = CalculationResult::new(result.total_hp, "HP", 0)
        .with_derived(DerivedValue::new("hp_gain", result.hp_gain, "HP", 0))
        .with_derived(DerivedValue::new("percent_gain", result.percent_gain, "%", 1));

    let (warnings, recommendations) = boost_advisories(input.boost_psi);

    Ok(Shaped::new(shaped)
        .with_warnings(warnings)
        .with_recommendations(recommendations))
}

// ============================================================================
// Ram Air
// ============================================================================

/// Input parameters for the ram-air estimate.
///
/// ## JSON Example
///
/// ```json
/// { "speed_mph": 120.0, "base_hp": 400.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamAirInput {
    /// Vehicle speed in mph
    pub speed_mph: f64,

    /// Baseline horsepower
    pub base_hp: f64,
}

impl RamAirInput {
    /// Parse and range-check raw form inputs.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        Ok(Self {
            speed_mph: validate::number_in(raw, "speed_mph", 0.0, MAX_SPEED_MPH)?,
            base_hp: validate::positive_in(raw, "base_hp", MAX_BASE_HP)?,
        })
    }
}

/// Results from the ram-air estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamAirResult {
    /// Pressure recovered at speed, in psi
    pub pressure_psi: f64,

    /// Percent horsepower gain over the baseline
    pub percent_gain: f64,

    /// Horsepower added
    pub hp_gain: f64,

    /// Baseline plus gain
    pub total_hp: f64,
}

/// Interpolate recovered pressure from the empirical curve.
fn ram_pressure_psi(speed: Mph) -> f64 {
    let clamped = speed
        .value()
        .clamp(RAM_AIR_CURVE[0].0, RAM_AIR_CURVE[RAM_AIR_CURVE.len() - 1].0);
    for window in RAM_AIR_CURVE.windows(2) {
        let (lo_speed, lo_psi) = window[0];
        let (hi_speed, hi_psi) = window[1];
        if clamped <= hi_speed {
            let t = (clamped - lo_speed) / (hi_speed - lo_speed);
            return lo_psi + t * (hi_psi - lo_psi);
        }
    }
    RAM_AIR_CURVE[RAM_AIR_CURVE.len() - 1].1
}

/// Estimate ram-air pressure recovery and the resulting power gain.
pub fn ram_air_gain(input: &RamAirInput) -> CalcResult<RamAirResult> {
    let pressure = Psi(ram_pressure_psi(Mph(input.speed_mph)));
    let gain = boost_gain(input.base_hp, pressure)?;

    Ok(RamAirResult {
        pressure_psi: pressure.value(),
        percent_gain: gain.percent_gain,
        hp_gain: gain.hp_gain,
        total_hp: gain.total_hp,
    })
}

/// Full pipeline for dispatch: parse, calculate, shape.
pub(crate) fn run_ram_air(raw: &RawInputs) -> CalcResult<Shaped> {
    let input = RamAirInput::from_raw(raw)?;
    let result = ram_air_gain(&input)?;

    let shaped = CalculationResult::new(result.total_hp, "HP", 0)
        .with_derived(DerivedValue::new("pressure", result.pressure_psi, "psi", 2))
        .with_derived(DerivedValue::new("hp_gain", result.hp_gain, "HP", 1))
        .with_derived(DerivedValue::new("percent_gain", result.percent_gain, "%", 2));

    let warnings = vec![Warning::accuracy(
        Severity::Low,
        "Assumes a sealed intake tract; real-world pressure recovery varies with duct design",
    )];

    Ok(Shaped::new(shaped).with_warnings(warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{inputs, RawValue};

    #[test]
    fn test_ten_psi_on_300_hp() {
        let result = supercharger_gain(&SuperchargerInput {
            base_hp: 300.0,
            boost_psi: 10.0,
        })
        .unwrap();
        // 300 * 10 / 14.7 = 204.1
        assert!((result.hp_gain - 204.08).abs() < 0.01);
        assert!((result.total_hp - 504.08).abs() < 0.01);
        assert!((result.percent_gain - 68.03).abs() < 0.01);
    }

    #[test]
    fn test_zero_boost_is_no_gain() {
        let result = supercharger_gain(&SuperchargerInput {
            base_hp: 300.0,
            boost_psi: 0.0,
        })
        .unwrap();
        assert_eq!(result.hp_gain, 0.0);
        assert_eq!(result.total_hp, 300.0);
    }

    #[test]
    fn test_one_atmosphere_doubles() {
        let result = supercharger_gain(&SuperchargerInput {
            base_hp: 250.0,
            boost_psi: ATMOSPHERIC_PSI,
        })
        .unwrap();
        assert!((result.total_hp - 500.0).abs() < 1e-9);
        assert!((result.percent_gain - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_moderate_boost_no_warnings() {
        let raw = inputs([
            ("base_hp", RawValue::Number(300.0)),
            ("boost_psi", RawValue::Number(6.0)),
        ]);
        let shaped = run_supercharger(&raw).unwrap();
        assert!(shaped.warnings.is_empty());
        assert!(shaped.recommendations.is_empty());
    }

    #[test]
    fn test_high_boost_warns_and_recommends() {
        let raw = inputs([
            ("base_hp", RawValue::Number(300.0)),
            ("boost_psi", RawValue::Number(10.0)),
        ]);
        let shaped = run_supercharger(&raw).unwrap();
        assert_eq!(shaped.warnings.len(), 1);
        assert_eq!(shaped.warnings[0].severity, Severity::Medium);
        assert_eq!(shaped.recommendations.len(), 1);
    }

    #[test]
    fn test_over_atmosphere_is_high_severity() {
        let raw = inputs([
            ("base_hp", RawValue::Number(300.0)),
            ("boost_psi", RawValue::Number(18.0)),
        ]);
        let shaped = run_supercharger(&raw).unwrap();
        assert_eq!(shaped.warnings[0].severity, Severity::High);
    }

    #[test]
    fn test_negative_boost_rejected() {
        let raw = inputs([
            ("base_hp", RawValue::Number(300.0)),
            ("boost_psi", RawValue::Number(-3.0)),
        ]);
        let err = SuperchargerInput::from_raw(&raw).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_ram_pressure_at_anchors() {
        assert_eq!(ram_pressure_psi(Mph(0.0)), 0.0);
        assert!((ram_pressure_psi(Mph(100.0)) - 0.18).abs() < 1e-9);
        assert!((ram_pressure_psi(Mph(300.0)) - 1.60).abs() < 1e-9);
    }

    #[test]
    fn test_ram_pressure_interpolates() {
        // Halfway between the 100 and 120 mph anchors
        let psi = ram_pressure_psi(Mph(110.0));
        assert!((psi - 0.22).abs() < 1e-9);
    }

    #[test]
    fn test_ram_pressure_monotonic() {
        let mut previous = -1.0;
        for speed in (0..=300).step_by(10) {
            let psi = ram_pressure_psi(Mph(speed as f64));
            assert!(psi >= previous);
            previous = psi;
        }
    }

    #[test]
    fn test_ram_air_gain_at_speed() {
        let result = ram_air_gain(&RamAirInput {
            speed_mph: 120.0,
            base_hp: 400.0,
        })
        .unwrap();
        // 0.26 psi: 400 * 0.26 / 14.7 = 7.07 HP
        assert!((result.pressure_psi - 0.26).abs() < 1e-9);
        assert!((result.hp_gain - 7.07).abs() < 0.01);
        assert!((result.total_hp - 407.07).abs() < 0.01);
    }

    #[test]
    fn test_ram_air_standing_still_is_nothing() {
        let result = ram_air_gain(&RamAirInput {
            speed_mph: 0.0,
            base_hp: 400.0,
        })
        .unwrap();
        assert_eq!(result.hp_gain, 0.0);
        assert_eq!(result.total_hp, 400.0);
    }

    #[test]
    fn test_ram_air_carries_accuracy_warning() {
        let raw = inputs([
            ("speed_mph", RawValue::Number(100.0)),
            ("base_hp", RawValue::Number(400.0)),
        ]);
        let shaped = run_ram_air(&raw).unwrap();
        assert_eq!(shaped.warnings.len(), 1);
        assert_eq!(shaped.warnings[0].severity, Severity::Low);
    }
}
