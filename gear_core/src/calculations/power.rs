//! # Power
//!
//! Torque/horsepower conversion and power-to-weight classification.
//!
//! Horsepower and torque are tied together through the 5252 constant
//! (33,000 ft-lb/min per horsepower over 2*pi); the two curves always
//! cross at 5252 RPM.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::calculations::power::{TorqueHorsepowerInput, torque_horsepower};
//!
//! let input = TorqueHorsepowerInput::HpFromTorque { torque_lbft: 400.0, rpm: 5252.0 };
//! let result = torque_horsepower(&input).unwrap();
//! assert!((result.horsepower - 400.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::classify::Bands;
use crate::envelope::{CalculationResult, DerivedValue, Priority, Recommendation};
use crate::errors::CalcResult;
use crate::units::{Horsepower, PoundFeet};
use crate::validate::{self, RawInputs};

use super::Shaped;

/// 33,000 ft-lb/min per horsepower divided by 2*pi, rounded to the
/// figure the trade uses.
pub const HP_TORQUE_CONSTANT: f64 = 5252.0;

const MAX_RPM: f64 = 20_000.0;
const MAX_TORQUE_LBFT: f64 = 5000.0;
const MAX_HP: f64 = 5000.0;
const MAX_WEIGHT_LB: f64 = 20_000.0;

// ============================================================================
// Torque <-> Horsepower
// ============================================================================

/// Input for the torque/horsepower conversion, one variant per direction.
///
/// ## JSON Examples
///
/// ```json
/// { "direction": "hp_from_torque", "torque_lbft": 400.0, "rpm": 5252.0 }
/// ```
///
/// ```json
/// { "direction": "torque_from_hp", "hp": 400.0, "rpm": 5252.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum TorqueHorsepowerInput {
    /// HP = torque * RPM / 5252
    HpFromTorque { torque_lbft: f64, rpm: f64 },
    /// torque = HP * 5252 / RPM
    TorqueFromHp { hp: f64, rpm: f64 },
}

impl TorqueHorsepowerInput {
    /// Parse raw form inputs. Supplying `torque_lbft` selects the
    /// HP-from-torque direction; supplying `hp` selects the inverse.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let rpm = validate::number_in(raw, "rpm", 0.0, MAX_RPM)?;
        if raw.contains_key("torque_lbft") {
            let torque_lbft = validate::number_in(raw, "torque_lbft", 0.0, MAX_TORQUE_LBFT)?;
            Ok(TorqueHorsepowerInput::HpFromTorque { torque_lbft, rpm })
        } else {
            let hp = validate::number_in(raw, "hp", 0.0, MAX_HP)?;
            Ok(TorqueHorsepowerInput::TorqueFromHp { hp, rpm })
        }
    }

    pub fn rpm(&self) -> f64 {
        match *self {
            TorqueHorsepowerInput::HpFromTorque { rpm, .. }
            | TorqueHorsepowerInput::TorqueFromHp { rpm, .. } => rpm,
        }
    }
}

/// Results from the torque/horsepower conversion. Both quantities are
/// always populated; one of them echoes the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorqueHorsepowerResult {
    /// Power in horsepower
    pub horsepower: f64,

    /// Torque in lb-ft
    pub torque_lbft: f64,

    /// Engine speed the conversion was evaluated at
    pub rpm: f64,
}

/// Convert between torque and horsepower at a given RPM.
///
/// An RPM of zero fails as `DivisionByZero` in either direction: the
/// relation is undefined there, and allowing it in one direction only
/// would break invertibility.
pub fn torque_horsepower(input: &TorqueHorsepowerInput) -> CalcResult<TorqueHorsepowerResult> {
    let rpm = validate::nonzero_divisor(input.rpm(), "rpm")?;

    let (horsepower, torque_lbft) = match *input {
        TorqueHorsepowerInput::HpFromTorque { torque_lbft, .. } => {
            let hp = Horsepower(torque_lbft * rpm / HP_TORQUE_CONSTANT);
            (hp.value(), torque_lbft)
        }
        TorqueHorsepowerInput::TorqueFromHp { hp, .. } => {
            let torque = PoundFeet(hp * HP_TORQUE_CONSTANT / rpm);
            (hp, torque.value())
        }
    };

    Ok(TorqueHorsepowerResult {
        horsepower,
        torque_lbft,
        rpm,
    })
}

/// Full pipeline for dispatch: parse, calculate, shape.
pub(crate) fn run_torque_horsepower(raw: &RawInputs) -> CalcResult<Shaped> {
    let input = TorqueHorsepowerInput::from_raw(raw)?;
    let result = torque_horsepower(&input)?;

    let shaped = match input {
        TorqueHorsepowerInput::HpFromTorque { .. } => {
            CalculationResult::new(result.horsepower, "HP", 1)
                .with_derived(DerivedValue::new("torque_lbft", result.torque_lbft, "lb-ft", 1))
        }
        TorqueHorsepowerInput::TorqueFromHp { .. } => {
            CalculationResult::new(result.torque_lbft, "lb-ft", 1)
                .with_derived(DerivedValue::new("horsepower", result.horsepower, "HP", 1))
        }
    };

    Ok(Shaped::new(shaped))
}

// ============================================================================
// Power to Weight
// ============================================================================

/// Performance class by horsepower per pound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerClass {
    Economy,
    Sport,
    Performance,
    Supercar,
}

impl PowerClass {
    pub fn label(&self) -> &'static str {
        match self {
            PowerClass::Economy => "economy",
            PowerClass::Sport => "sport",
            PowerClass::Performance => "performance",
            PowerClass::Supercar => "supercar",
        }
    }
}

/// Class thresholds in HP per pound, inclusive lower bounds.
/// 0.05 hp/lb is 20 lb/hp; 0.12 hp/lb is about 8.3 lb/hp.
const POWER_CLASS_BANDS: Bands<PowerClass> = Bands::new(
    PowerClass::Economy,
    &[
        (0.05, PowerClass::Sport),
        (0.08, PowerClass::Performance),
        (0.12, PowerClass::Supercar),
    ],
);

/// Input parameters for power-to-weight.
///
/// ## JSON Example
///
/// ```json
/// { "hp": 300.0, "weight_lb": 3400.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerToWeightInput {
    /// Engine horsepower
    pub hp: f64,

    /// Vehicle weight in pounds
    pub weight_lb: f64,
}

impl PowerToWeightInput {
    /// Parse and range-check raw form inputs.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        Ok(Self {
            hp: validate::number_in(raw, "hp", 0.0, MAX_HP)?,
            weight_lb: validate::number_in(raw, "weight_lb", 0.0, MAX_WEIGHT_LB)?,
        })
    }
}

/// Results from power-to-weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerToWeightResult {
    /// Horsepower per pound
    pub hp_per_lb: f64,

    /// Pounds per horsepower (the inverse)
    pub lb_per_hp: f64,

    /// Performance class
    pub class: PowerClass,
}

/// Calculate both power-to-weight figures and classify them.
///
/// Zero weight and zero horsepower each fail as `DivisionByZero`; both
/// ratios are reported, so both divisors must be sound.
pub fn power_to_weight(input: &PowerToWeightInput) -> CalcResult<PowerToWeightResult> {
    let weight = validate::nonzero_divisor(input.weight_lb, "weight_lb")?;
    let hp = validate::nonzero_divisor(input.hp, "hp")?;

    let hp_per_lb = hp / weight;
    let lb_per_hp = weight / hp;

    Ok(PowerToWeightResult {
        hp_per_lb,
        lb_per_hp,
        class: POWER_CLASS_BANDS.classify(hp_per_lb),
    })
}

/// Full pipeline for dispatch: parse, calculate, shape.
pub(crate) fn run_power_to_weight(raw: &RawInputs) -> CalcResult<Shaped> {
    let input = PowerToWeightInput::from_raw(raw)?;
    let result = power_to_weight(&input)?;

    let shaped = CalculationResult::new(result.hp_per_lb, "HP/lb", 3)
        .with_category(result.class.label())
        .with_derived(DerivedValue::new("lb_per_hp", result.lb_per_hp, "lb/HP", 1));

    let mut recommendations = Vec::new();
    if result.class == PowerClass::Economy {
        recommendations.push(Recommendation::performance(
            Priority::Low,
            "Weight reduction moves this figure as effectively as added power",
        ));
    }

    Ok(Shaped::new(shaped).with_recommendations(recommendations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{inputs, RawValue};

    #[test]
    fn test_torque_and_hp_coincide_at_5252() {
        let result = torque_horsepower(&TorqueHorsepowerInput::HpFromTorque {
            torque_lbft: 400.0,
            rpm: 5252.0,
        })
        .unwrap();
        assert!((result.horsepower - 400.0).abs() < 1e-9);
        assert_eq!(result.torque_lbft, 400.0);
    }

    #[test]
    fn test_round_trip_through_both_directions() {
        for rpm in [1500.0, 3000.0, 5252.0, 7200.0] {
            let hp_result = torque_horsepower(&TorqueHorsepowerInput::TorqueFromHp {
                hp: 300.0,
                rpm,
            })
            .unwrap();
            let back = torque_horsepower(&TorqueHorsepowerInput::HpFromTorque {
                torque_lbft: hp_result.torque_lbft,
                rpm,
            })
            .unwrap();
            assert!((back.horsepower - 300.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_rpm_fails_both_directions() {
        let err = torque_horsepower(&TorqueHorsepowerInput::TorqueFromHp { hp: 300.0, rpm: 0.0 })
            .unwrap_err();
        assert_eq!(err.error_code(), "DIVISION_BY_ZERO");

        let err = torque_horsepower(&TorqueHorsepowerInput::HpFromTorque {
            torque_lbft: 300.0,
            rpm: 0.0,
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "DIVISION_BY_ZERO");
    }

    #[test]
    fn test_from_raw_direction_selection() {
        let raw = inputs([
            ("torque_lbft", RawValue::Number(400.0)),
            ("rpm", RawValue::Number(5252.0)),
        ]);
        let input = TorqueHorsepowerInput::from_raw(&raw).unwrap();
        assert!(matches!(input, TorqueHorsepowerInput::HpFromTorque { .. }));

        let raw = inputs([
            ("hp", RawValue::Number(400.0)),
            ("rpm", RawValue::Number(5252.0)),
        ]);
        let input = TorqueHorsepowerInput::from_raw(&raw).unwrap();
        assert!(matches!(input, TorqueHorsepowerInput::TorqueFromHp { .. }));
    }

    #[test]
    fn test_power_to_weight_basic() {
        let result = power_to_weight(&PowerToWeightInput {
            hp: 300.0,
            weight_lb: 3400.0,
        })
        .unwrap();
        assert!((result.hp_per_lb - 0.0882).abs() < 0.0001);
        assert!((result.lb_per_hp - 11.33).abs() < 0.01);
        assert_eq!(result.class, PowerClass::Performance);
    }

    #[test]
    fn test_power_to_weight_monotonic_in_hp() {
        let low = power_to_weight(&PowerToWeightInput {
            hp: 200.0,
            weight_lb: 3400.0,
        })
        .unwrap();
        let high = power_to_weight(&PowerToWeightInput {
            hp: 400.0,
            weight_lb: 3400.0,
        })
        .unwrap();
        assert!(low.hp_per_lb < high.hp_per_lb);
    }

    #[test]
    fn test_class_boundaries_inclusive() {
        // Exactly 0.12 hp/lb is supercar, not performance
        let result = power_to_weight(&PowerToWeightInput {
            hp: 120.0,
            weight_lb: 1000.0,
        })
        .unwrap();
        assert_eq!(result.class, PowerClass::Supercar);
    }

    #[test]
    fn test_economy_class() {
        let result = power_to_weight(&PowerToWeightInput {
            hp: 90.0,
            weight_lb: 2800.0,
        })
        .unwrap();
        assert_eq!(result.class, PowerClass::Economy);
    }

    #[test]
    fn test_zero_weight_is_division_by_zero() {
        let err = power_to_weight(&PowerToWeightInput {
            hp: 300.0,
            weight_lb: 0.0,
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "DIVISION_BY_ZERO");
    }

    #[test]
    fn test_zero_hp_is_division_by_zero() {
        let err = power_to_weight(&PowerToWeightInput {
            hp: 0.0,
            weight_lb: 3400.0,
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "DIVISION_BY_ZERO");
    }

    #[test]
    fn test_shaped_carries_class_and_inverse() {
        let raw = inputs([
            ("hp", RawValue::Number(500.0)),
            ("weight_lb", RawValue::Number(3200.0)),
        ]);
        let shaped = run_power_to_weight(&raw).unwrap();
        assert_eq!(shaped.result.category.as_deref(), Some("supercar"));
        assert_eq!(shaped.result.derived[0].label, "lb_per_hp");
    }
}
