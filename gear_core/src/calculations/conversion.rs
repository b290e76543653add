//! # Unit Conversion
//!
//! Length, weight, temperature, speed, and volume conversions. Every
//! quantity except temperature converts through a base unit with a fixed
//! multiplicative factor; temperature is affine and goes through Celsius.
//!
//! ## Example
//!
//! ```rust
//! use gear_core::calculations::conversion::{convert_temperature, TemperatureUnit};
//!
//! let c = convert_temperature(212.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius);
//! assert!((c - 100.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::envelope::CalculationResult;
use crate::errors::{CalcError, CalcResult};
use crate::units::{LITERS_PER_CUBIC_INCH, LITERS_PER_GALLON};
use crate::validate::{self, RawInputs};

use super::Shaped;

// ============================================================================
// Unit Enumerations
// ============================================================================

/// Length units, converting through meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Millimeters,
    Centimeters,
    Meters,
    Kilometers,
    Inches,
    Feet,
    Yards,
    Miles,
}

impl LengthUnit {
    /// Meters per one of this unit
    fn meters(&self) -> f64 {
        match self {
            LengthUnit::Millimeters => 0.001,
            LengthUnit::Centimeters => 0.01,
            LengthUnit::Meters => 1.0,
            LengthUnit::Kilometers => 1000.0,
            LengthUnit::Inches => 0.0254,
            LengthUnit::Feet => 0.3048,
            LengthUnit::Yards => 0.9144,
            LengthUnit::Miles => 1609.344,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LengthUnit::Millimeters => "mm",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Meters => "m",
            LengthUnit::Kilometers => "km",
            LengthUnit::Inches => "in",
            LengthUnit::Feet => "ft",
            LengthUnit::Yards => "yd",
            LengthUnit::Miles => "mi",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mm" | "millimeters" => Some(LengthUnit::Millimeters),
            "cm" | "centimeters" => Some(LengthUnit::Centimeters),
            "m" | "meters" => Some(LengthUnit::Meters),
            "km" | "kilometers" => Some(LengthUnit::Kilometers),
            "in" | "inches" => Some(LengthUnit::Inches),
            "ft" | "feet" => Some(LengthUnit::Feet),
            "yd" | "yards" => Some(LengthUnit::Yards),
            "mi" | "miles" => Some(LengthUnit::Miles),
            _ => None,
        }
    }
}

/// Weight units, converting through kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Grams,
    Kilograms,
    Ounces,
    Pounds,
    Tons,
}

impl WeightUnit {
    /// Kilograms per one of this unit (tons are US short tons)
    fn kilograms(&self) -> f64 {
        match self {
            WeightUnit::Grams => 0.001,
            WeightUnit::Kilograms => 1.0,
            WeightUnit::Ounces => 0.028349523125,
            WeightUnit::Pounds => 0.45359237,
            WeightUnit::Tons => 907.18474,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeightUnit::Grams => "g",
            WeightUnit::Kilograms => "kg",
            WeightUnit::Ounces => "oz",
            WeightUnit::Pounds => "lb",
            WeightUnit::Tons => "ton",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "g" | "grams" => Some(WeightUnit::Grams),
            "kg" | "kilograms" => Some(WeightUnit::Kilograms),
            "oz" | "ounces" => Some(WeightUnit::Ounces),
            "lb" | "lbs" | "pounds" => Some(WeightUnit::Pounds),
            "ton" | "tons" => Some(WeightUnit::Tons),
            _ => None,
        }
    }
}

/// Temperature units. Conversion is affine, through Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub fn label(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
            TemperatureUnit::Kelvin => "K",
        }
    }

    /// Absolute zero expressed in this unit (the validation floor)
    pub fn absolute_zero(&self) -> f64 {
        match self {
            TemperatureUnit::Celsius => -273.15,
            TemperatureUnit::Fahrenheit => -459.67,
            TemperatureUnit::Kelvin => 0.0,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "c" | "celsius" => Some(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Some(TemperatureUnit::Fahrenheit),
            "k" | "kelvin" => Some(TemperatureUnit::Kelvin),
            _ => None,
        }
    }
}

/// Speed units, converting through meters per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    MetersPerSecond,
    Kph,
    Mph,
    Knots,
    FeetPerSecond,
}

impl SpeedUnit {
    /// Meters per second per one of this unit
    fn mps(&self) -> f64 {
        match self {
            SpeedUnit::MetersPerSecond => 1.0,
            SpeedUnit::Kph => 1000.0 / 3600.0,
            SpeedUnit::Mph => 0.44704,
            SpeedUnit::Knots => 0.514444,
            SpeedUnit::FeetPerSecond => 0.3048,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeedUnit::MetersPerSecond => "m/s",
            SpeedUnit::Kph => "km/h",
            SpeedUnit::Mph => "mph",
            SpeedUnit::Knots => "kn",
            SpeedUnit::FeetPerSecond => "ft/s",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace(' ', "").as_str() {
            "m/s" | "mps" | "meterspersecond" => Some(SpeedUnit::MetersPerSecond),
            "km/h" | "kph" | "kmh" => Some(SpeedUnit::Kph),
            "mph" | "mi/h" => Some(SpeedUnit::Mph),
            "kn" | "knots" => Some(SpeedUnit::Knots),
            "ft/s" | "fps" | "feetpersecond" => Some(SpeedUnit::FeetPerSecond),
            _ => None,
        }
    }
}

/// Volume units, converting through liters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeUnit {
    Milliliters,
    Liters,
    Gallons,
    Quarts,
    CubicInches,
}

impl VolumeUnit {
    /// Liters per one of this unit. Cubic inches use the same factor as
    /// the displacement calculator so the two never disagree.
    fn liters(&self) -> f64 {
        match self {
            VolumeUnit::Milliliters => 0.001,
            VolumeUnit::Liters => 1.0,
            VolumeUnit::Gallons => LITERS_PER_GALLON,
            VolumeUnit::Quarts => LITERS_PER_GALLON / 4.0,
            VolumeUnit::CubicInches => LITERS_PER_CUBIC_INCH,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VolumeUnit::Milliliters => "mL",
            VolumeUnit::Liters => "L",
            VolumeUnit::Gallons => "gal",
            VolumeUnit::Quarts => "qt",
            VolumeUnit::CubicInches => "CI",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace(' ', "").as_str() {
            "ml" | "milliliters" => Some(VolumeUnit::Milliliters),
            "l" | "liters" => Some(VolumeUnit::Liters),
            "gal" | "gallons" => Some(VolumeUnit::Gallons),
            "qt" | "quarts" => Some(VolumeUnit::Quarts),
            "ci" | "in3" | "cubicinches" => Some(VolumeUnit::CubicInches),
            _ => None,
        }
    }
}

// ============================================================================
// Conversion Functions
// ============================================================================

pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    value * from.meters() / to.meters()
}

pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    value * from.kilograms() / to.kilograms()
}

/// Affine conversion through Celsius: C = (F - 32) * 5/9, K = C + 273.15.
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    let celsius = match from {
        TemperatureUnit::Celsius => value,
        TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        TemperatureUnit::Kelvin => value - 273.15,
    };
    match to {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        TemperatureUnit::Kelvin => celsius + 273.15,
    }
}

pub fn convert_speed(value: f64, from: SpeedUnit, to: SpeedUnit) -> f64 {
    value * from.mps() / to.mps()
}

pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    value * from.liters() / to.liters()
}

// ============================================================================
// Input / Result
// ============================================================================

/// Input for the generic unit converter, one variant per quantity.
///
/// ## JSON Example
///
/// ```json
/// { "quantity": "temperature", "value": 212.0, "from": "fahrenheit", "to": "celsius" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "quantity", rename_all = "lowercase")]
pub enum ConversionInput {
    Length {
        value: f64,
        from: LengthUnit,
        to: LengthUnit,
    },
    Weight {
        value: f64,
        from: WeightUnit,
        to: WeightUnit,
    },
    Temperature {
        value: f64,
        from: TemperatureUnit,
        to: TemperatureUnit,
    },
    Speed {
        value: f64,
        from: SpeedUnit,
        to: SpeedUnit,
    },
    Volume {
        value: f64,
        from: VolumeUnit,
        to: VolumeUnit,
    },
}

impl ConversionInput {
    /// Parse raw form inputs. The `quantity` field selects which unit
    /// set `from` and `to` are parsed against.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let quantity = validate::option(
            raw,
            "quantity",
            "length, weight, temperature, speed, volume",
            |s| match s.to_ascii_lowercase().as_str() {
                "length" => Some("length"),
                "weight" => Some("weight"),
                "temperature" => Some("temperature"),
                "speed" => Some("speed"),
                "volume" => Some("volume"),
                _ => None,
            },
        )?;
        let value = validate::number(raw, "value")?;

        let input = match quantity {
            "length" => ConversionInput::Length {
                value,
                from: validate::option(raw, "from", "mm, cm, m, km, in, ft, yd, mi", LengthUnit::parse)?,
                to: validate::option(raw, "to", "mm, cm, m, km, in, ft, yd, mi", LengthUnit::parse)?,
            },
            "weight" => ConversionInput::Weight {
                value,
                from: validate::option(raw, "from", "g, kg, oz, lb, ton", WeightUnit::parse)?,
                to: validate::option(raw, "to", "g, kg, oz, lb, ton", WeightUnit::parse)?,
            },
            "temperature" => ConversionInput::Temperature {
                value,
                from: validate::option(raw, "from", "celsius, fahrenheit, kelvin", TemperatureUnit::parse)?,
                to: validate::option(raw, "to", "celsius, fahrenheit, kelvin", TemperatureUnit::parse)?,
            },
            "speed" => ConversionInput::Speed {
                value,
                from: validate::option(raw, "from", "m/s, km/h, mph, knots, ft/s", SpeedUnit::parse)?,
                to: validate::option(raw, "to", "m/s, km/h, mph, knots, ft/s", SpeedUnit::parse)?,
            },
            _ => ConversionInput::Volume {
                value,
                from: validate::option(raw, "from", "mL, L, gal, qt, CI", VolumeUnit::parse)?,
                to: validate::option(raw, "to", "mL, L, gal, qt, CI", VolumeUnit::parse)?,
            },
        };
        input.validate()?;
        Ok(input)
    }

    /// Validate input parameters.
    ///
    /// Physical quantities must be non-negative; temperatures must be at
    /// or above absolute zero in their source unit.
    pub fn validate(&self) -> CalcResult<()> {
        match *self {
            ConversionInput::Temperature { value, from, .. } => {
                if value < from.absolute_zero() {
                    return Err(CalcError::out_of_range(
                        "value",
                        value,
                        from.absolute_zero(),
                        f64::INFINITY,
                    ));
                }
            }
            ConversionInput::Length { value, .. }
            | ConversionInput::Weight { value, .. }
            | ConversionInput::Speed { value, .. }
            | ConversionInput::Volume { value, .. } => {
                if value < 0.0 {
                    return Err(CalcError::out_of_range("value", value, 0.0, f64::INFINITY));
                }
            }
        }
        Ok(())
    }
}

/// Results from a unit conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Converted value
    pub converted: f64,

    /// Source unit label
    pub from: String,

    /// Target unit label
    pub to: String,
}

/// Perform the conversion.
pub fn calculate(input: &ConversionInput) -> CalcResult<ConversionResult> {
    input.validate()?;

    let (converted, from, to) = match *input {
        ConversionInput::Length { value, from, to } => {
            (convert_length(value, from, to), from.label(), to.label())
        }
        ConversionInput::Weight { value, from, to } => {
            (convert_weight(value, from, to), from.label(), to.label())
        }
        ConversionInput::Temperature { value, from, to } => {
            (convert_temperature(value, from, to), from.label(), to.label())
        }
        ConversionInput::Speed { value, from, to } => {
            (convert_speed(value, from, to), from.label(), to.label())
        }
        ConversionInput::Volume { value, from, to } => {
            (convert_volume(value, from, to), from.label(), to.label())
        }
    };

    Ok(ConversionResult {
        converted,
        from: from.to_string(),
        to: to.to_string(),
    })
}

/// Full pipeline for dispatch: parse, calculate, shape.
pub(crate) fn run(raw: &RawInputs) -> CalcResult<Shaped> {
    let input = ConversionInput::from_raw(raw)?;
    let result = calculate(&input)?;

    let precision = match input {
        ConversionInput::Temperature { .. } => 1,
        _ => 3,
    };
    let shaped = CalculationResult::new(result.converted, result.to.clone(), precision);

    Ok(Shaped::new(shaped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{inputs, RawValue};

    #[test]
    fn test_boiling_point_affine() {
        let c = convert_temperature(212.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius);
        assert!((c - 100.0).abs() < 1e-9);
        let f = convert_temperature(100.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit);
        assert!((f - 212.0).abs() < 1e-9);
    }

    #[test]
    fn test_kelvin_offset() {
        let k = convert_temperature(0.0, TemperatureUnit::Celsius, TemperatureUnit::Kelvin);
        assert!((k - 273.15).abs() < 1e-9);
    }

    #[test]
    fn test_below_absolute_zero_rejected() {
        let input = ConversionInput::Temperature {
            value: -500.0,
            from: TemperatureUnit::Fahrenheit,
            to: TemperatureUnit::Celsius,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_length_mile_to_km() {
        let km = convert_length(1.0, LengthUnit::Miles, LengthUnit::Kilometers);
        assert!((km - 1.609344).abs() < 1e-9);
    }

    #[test]
    fn test_weight_lb_to_kg() {
        let kg = convert_weight(10.0, WeightUnit::Pounds, WeightUnit::Kilograms);
        assert!((kg - 4.5359237).abs() < 1e-9);
    }

    #[test]
    fn test_speed_mph_to_kph() {
        let kph = convert_speed(60.0, SpeedUnit::Mph, SpeedUnit::Kph);
        assert!((kph - 96.56064).abs() < 0.0001);
    }

    #[test]
    fn test_volume_ci_to_liters_matches_displacement_constant() {
        let liters = convert_volume(350.0, VolumeUnit::CubicInches, VolumeUnit::Liters);
        assert!((liters - 5.7355).abs() < 0.001);
    }

    #[test]
    fn test_ci_liters_identity() {
        for ci in [1.0, 302.0, 350.0, 454.0] {
            let liters = convert_volume(ci, VolumeUnit::CubicInches, VolumeUnit::Liters);
            let back = convert_volume(liters, VolumeUnit::Liters, VolumeUnit::CubicInches);
            assert!((back - ci).abs() < 1e-9);
        }
    }

    #[test]
    fn test_identity_conversion() {
        assert_eq!(convert_length(5.0, LengthUnit::Feet, LengthUnit::Feet), 5.0);
    }

    #[test]
    fn test_from_raw_temperature() {
        let raw = inputs([
            ("quantity", "temperature".into()),
            ("value", RawValue::Number(72.0)),
            ("from", "F".into()),
            ("to", "C".into()),
        ]);
        let input = ConversionInput::from_raw(&raw).unwrap();
        let result = calculate(&input).unwrap();
        assert!((result.converted - 22.22).abs() < 0.01);
    }

    #[test]
    fn test_from_raw_unknown_unit() {
        let raw = inputs([
            ("quantity", "length".into()),
            ("value", RawValue::Number(1.0)),
            ("from", "furlongs".into()),
            ("to", "m".into()),
        ]);
        let err = ConversionInput::from_raw(&raw).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_OPTION");
    }

    #[test]
    fn test_negative_length_rejected() {
        let input = ConversionInput::Length {
            value: -1.0,
            from: LengthUnit::Feet,
            to: LengthUnit::Meters,
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_shaped_precision_by_quantity() {
        let raw = inputs([
            ("quantity", "temperature".into()),
            ("value", RawValue::Number(72.0)),
            ("from", "F".into()),
            ("to", "C".into()),
        ]);
        let shaped = run(&raw).unwrap();
        assert_eq!(shaped.result.precision, 1);

        let raw = inputs([
            ("quantity", "speed".into()),
            ("value", RawValue::Number(60.0)),
            ("from", "mph".into()),
            ("to", "kph".into()),
        ]);
        let shaped = run(&raw).unwrap();
        assert_eq!(shaped.result.precision, 3);
        assert_eq!(shaped.result.unit, "km/h");
    }
}
