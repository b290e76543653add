//! # Fluid Weight
//!
//! Weight of a volume of automotive fluid, from a fixed density table.
//! Densities are room-temperature figures in pounds per US gallon.

use serde::{Deserialize, Serialize};

use crate::envelope::{CalculationResult, DerivedValue};
use crate::errors::CalcResult;
use crate::units::{Gallons, Liters, Pounds};
use crate::validate::{self, RawInputs};

use super::Shaped;

const MAX_VOLUME_GAL: f64 = 1000.0;

/// Automotive fluids with known densities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FluidType {
    Gasoline,
    MotorOil,
    TransmissionFluid,
    Water,
}

impl FluidType {
    /// All fluid types for UI selection
    pub const ALL: [FluidType; 4] = [
        FluidType::Gasoline,
        FluidType::MotorOil,
        FluidType::TransmissionFluid,
        FluidType::Water,
    ];

    /// Density in pounds per US gallon
    pub fn density_lb_per_gal(&self) -> f64 {
        match self {
            FluidType::Gasoline => 6.073,
            FluidType::MotorOil => 7.35,
            FluidType::TransmissionFluid => 7.40,
            FluidType::Water => 8.345,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FluidType::Gasoline => "Gasoline",
            FluidType::MotorOil => "Motor Oil",
            FluidType::TransmissionFluid => "Transmission Fluid",
            FluidType::Water => "Water",
        }
    }

    /// Parse from common string representations
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace([' ', '_'], "-").as_str() {
            "gasoline" | "gas" | "fuel" => Some(FluidType::Gasoline),
            "motor-oil" | "oil" | "engine-oil" => Some(FluidType::MotorOil),
            "transmission-fluid" | "atf" | "trans-fluid" => Some(FluidType::TransmissionFluid),
            "water" | "coolant" => Some(FluidType::Water),
            _ => None,
        }
    }
}

impl std::fmt::Display for FluidType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Input parameters for fluid weight.
///
/// ## JSON Example
///
/// ```json
/// { "volume_gal": 10.0, "fluid_type": "gasoline" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluidWeightInput {
    /// Fluid volume in US gallons
    pub volume_gal: f64,

    /// Which fluid
    pub fluid_type: FluidType,
}

impl FluidWeightInput {
    /// Parse and range-check raw form inputs.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        Ok(Self {
            volume_gal: validate::positive_in(raw, "volume_gal", MAX_VOLUME_GAL)?,
            fluid_type: validate::option(
                raw,
                "fluid_type",
                "gasoline, motor-oil, transmission-fluid, water",
                FluidType::parse,
            )?,
        })
    }
}

/// Results from the fluid weight calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluidWeightResult {
    /// Fluid weight in pounds
    pub weight_lb: f64,

    /// Density used, lb/gal
    pub density_lb_per_gal: f64,

    /// The same volume in liters
    pub volume_liters: f64,
}

/// Calculate fluid weight: weight = volume * density.
pub fn calculate(input: &FluidWeightInput) -> CalcResult<FluidWeightResult> {
    let density = input.fluid_type.density_lb_per_gal();
    let weight = Pounds(input.volume_gal * density);
    validate::in_domain(weight.value(), "weight_lb", "weight must be non-negative")?;

    let liters: Liters = Gallons(input.volume_gal).into();

    Ok(FluidWeightResult {
        weight_lb: weight.value(),
        density_lb_per_gal: density,
        volume_liters: liters.value(),
    })
}

/// Full pipeline for dispatch: parse, calculate, shape.
pub(crate) fn run(raw: &RawInputs) -> CalcResult<Shaped> {
    let input = FluidWeightInput::from_raw(raw)?;
    let result = calculate(&input)?;

    let shaped = CalculationResult::new(result.weight_lb, "lb", 2)
        .with_category(input.fluid_type.display_name())
        .with_derived(DerivedValue::new(
            "density",
            result.density_lb_per_gal,
            "lb/gal",
            3,
        ))
        .with_derived(DerivedValue::new("volume", result.volume_liters, "L", 2));

    Ok(Shaped::new(shaped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{inputs, RawValue};

    #[test]
    fn test_ten_gallons_of_gasoline() {
        let result = calculate(&FluidWeightInput {
            volume_gal: 10.0,
            fluid_type: FluidType::Gasoline,
        })
        .unwrap();
        assert!((result.weight_lb - 60.73).abs() < 0.001);
    }

    #[test]
    fn test_water_is_heaviest() {
        let volume = 5.0;
        let weights: Vec<f64> = FluidType::ALL
            .iter()
            .map(|&fluid_type| {
                calculate(&FluidWeightInput {
                    volume_gal: volume,
                    fluid_type,
                })
                .unwrap()
                .weight_lb
            })
            .collect();
        let water = calculate(&FluidWeightInput {
            volume_gal: volume,
            fluid_type: FluidType::Water,
        })
        .unwrap();
        assert!(weights.iter().all(|&w| w <= water.weight_lb));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(FluidType::parse("gas"), Some(FluidType::Gasoline));
        assert_eq!(FluidType::parse("ATF"), Some(FluidType::TransmissionFluid));
        assert_eq!(FluidType::parse("Motor Oil"), Some(FluidType::MotorOil));
        assert_eq!(FluidType::parse("kerosene"), None);
    }

    #[test]
    fn test_unknown_fluid_rejected() {
        let raw = inputs([
            ("volume_gal", RawValue::Number(10.0)),
            ("fluid_type", "kerosene".into()),
        ]);
        let err = FluidWeightInput::from_raw(&raw).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_OPTION");
    }

    #[test]
    fn test_zero_volume_rejected() {
        let raw = inputs([
            ("volume_gal", RawValue::Number(0.0)),
            ("fluid_type", "water".into()),
        ]);
        let err = FluidWeightInput::from_raw(&raw).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_shaped_output() {
        let raw = inputs([
            ("volume_gal", RawValue::Number(10.0)),
            ("fluid_type", "gasoline".into()),
        ]);
        let shaped = run(&raw).unwrap();
        assert_eq!(shaped.result.unit, "lb");
        assert_eq!(shaped.result.category.as_deref(), Some("Gasoline"));
        assert_eq!(shaped.result.display_value(), 60.73);
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&FluidType::TransmissionFluid).unwrap();
        assert_eq!(json, "\"transmission-fluid\"");
    }
}
