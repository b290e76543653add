//! # Unit Types
//!
//! Type-safe wrappers for the units the formula layer works in. These
//! provide compile-time safety against unit confusion while remaining
//! lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - The automotive formulas use a small, consistent set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## US Customary Units (Primary)
//!
//! Gearhead works in US customary units internally, matching the unit
//! conventions the formulas are stated in:
//! - Length: inches (in)
//! - Displacement: cubic inches (CI), liters (L)
//! - Torque: pound-feet (lb-ft)
//! - Pressure: pounds per square inch (psi)
//! - Speed: miles per hour (mph), engine speed in RPM
//! - Airflow: cubic feet per minute (CFM)
//!
//! ## Example
//!
//! ```rust
//! use gear_core::units::{CubicInches, Liters};
//!
//! let displacement = CubicInches(350.0);
//! let metric: Liters = displacement.into();
//! assert!((metric.0 - 5.735).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Liters per cubic inch (exact conversion used throughout the crate)
pub const LITERS_PER_CUBIC_INCH: f64 = 0.0163871;

/// Liters per US gallon
pub const LITERS_PER_GALLON: f64 = 3.785411784;

// ============================================================================
// Length
// ============================================================================

/// Length in inches (bore, stroke, tire diameter)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

// ============================================================================
// Displacement / Volume
// ============================================================================

/// Engine displacement in cubic inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicInches(pub f64);

/// Engine displacement or fluid volume in liters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

/// Fluid volume in US gallons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gallons(pub f64);

impl From<CubicInches> for Liters {
    fn from(ci: CubicInches) -> Self {
        Liters(ci.0 * LITERS_PER_CUBIC_INCH)
    }
}

impl From<Liters> for CubicInches {
    fn from(l: Liters) -> Self {
        CubicInches(l.0 / LITERS_PER_CUBIC_INCH)
    }
}

impl From<Gallons> for Liters {
    fn from(gal: Gallons) -> Self {
        Liters(gal.0 * LITERS_PER_GALLON)
    }
}

impl From<Liters> for Gallons {
    fn from(l: Liters) -> Self {
        Gallons(l.0 / LITERS_PER_GALLON)
    }
}

// ============================================================================
// Rotational Speed
// ============================================================================

/// Engine or driveshaft speed in revolutions per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rpm(pub f64);

// ============================================================================
// Power / Torque
// ============================================================================

/// Power in mechanical horsepower
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Horsepower(pub f64);

/// Torque in pound-feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoundFeet(pub f64);

// ============================================================================
// Pressure
// ============================================================================

/// Gauge pressure in pounds per square inch
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

// ============================================================================
// Vehicle Speed
// ============================================================================

/// Road speed in miles per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mph(pub f64);

// ============================================================================
// Weight
// ============================================================================

/// Weight in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

// ============================================================================
// Airflow
// ============================================================================

/// Airflow in cubic feet per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cfm(pub f64);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Inches);
impl_arithmetic!(CubicInches);
impl_arithmetic!(Liters);
impl_arithmetic!(Gallons);
impl_arithmetic!(Rpm);
impl_arithmetic!(Horsepower);
impl_arithmetic!(PoundFeet);
impl_arithmetic!(Psi);
impl_arithmetic!(Mph);
impl_arithmetic!(Pounds);
impl_arithmetic!(Cfm);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ci_to_liters() {
        let ci = CubicInches(350.0);
        let liters: Liters = ci.into();
        assert!((liters.0 - 5.7355).abs() < 0.001);
    }

    #[test]
    fn test_liters_roundtrip() {
        let original = CubicInches(302.0);
        let liters: Liters = original.into();
        let back: CubicInches = liters.into();
        assert!((back.0 - original.0).abs() < 1e-9);
    }

    #[test]
    fn test_gallons_to_liters() {
        let gal = Gallons(10.0);
        let liters: Liters = gal.into();
        assert!((liters.0 - 37.854).abs() < 0.01);
    }

    #[test]
    fn test_arithmetic() {
        let a = Horsepower(300.0);
        let b = Horsepower(100.0);
        assert_eq!((a + b).0, 400.0);
        assert_eq!((a - b).0, 200.0);
        assert_eq!((a * 2.0).0, 600.0);
        assert_eq!((a / 2.0).0, 150.0);
    }

    #[test]
    fn test_serialization() {
        let rpm = Rpm(6500.0);
        let json = serde_json::to_string(&rpm).unwrap();
        assert_eq!(json, "6500.0");

        let roundtrip: Rpm = serde_json::from_str(&json).unwrap();
        assert_eq!(rpm, roundtrip);
    }
}
