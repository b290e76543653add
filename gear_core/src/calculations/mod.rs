//! # Calculations
//!
//! This module contains all formula modules. Each one follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable), with `from_raw` to
//!   parse raw form values and `validate` for range checks
//! - `*Result` - Typed calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure evaluator
//! - a crate-private `run` that composes parse, calculate, and shape for
//!   the dispatch entry point
//!
//! Formula modules never call each other and share no state; the only
//! shared pieces are the validator, the band classifier, and the result
//! envelope.
//!
//! ## Entry Point
//!
//! [`evaluate`] is the single public entry point: pick a
//! [`FormulaKind`], hand it the raw form values, and get a
//! [`ResultEnvelope`] back. Errors never escape as `Err`; they come back
//! inside a failed envelope.
//!
//! ```rust
//! use gear_core::calculations::evaluate;
//! use gear_core::catalog::FormulaKind;
//! use gear_core::validate::{inputs, RawValue};
//!
//! let raw = inputs([
//!     ("torque_lbft", RawValue::Number(400.0)),
//!     ("rpm", RawValue::Number(5252.0)),
//! ]);
//! let envelope = evaluate(FormulaKind::TorqueHorsepower, &raw);
//! assert!(envelope.success);
//! assert_eq!(envelope.result.unwrap().value, 400.0);
//! ```

pub mod carburetor;
pub mod compression;
pub mod conversion;
pub mod displacement;
pub mod efficiency;
pub mod fluids;
pub mod gearing;
pub mod induction;
pub mod power;

use chrono::Utc;

use crate::catalog::FormulaKind;
use crate::envelope::{
    CalculationResult, EnvelopeMetadata, Recommendation, ResultEnvelope, Warning,
};
use crate::errors::CalcResult;
use crate::validate::RawInputs;

// Re-export commonly used types
pub use carburetor::{CarburetorInput, CfmModel, CfmResult, EngineBuild};
pub use compression::{CompressionInput, CompressionResult};
pub use conversion::{ConversionInput, ConversionResult};
pub use displacement::{DisplacementInput, DisplacementResult};
pub use efficiency::{VeBand, VolumetricEfficiencyInput, VolumetricEfficiencyResult};
pub use fluids::{FluidType, FluidWeightInput, FluidWeightResult};
pub use gearing::{GearRatioInput, GearRatioResult, RpmFromSpeedInput, RpmFromSpeedResult};
pub use induction::{BoostGainResult, RamAirInput, RamAirResult, SuperchargerInput};
pub use power::{PowerClass, PowerToWeightInput, PowerToWeightResult, TorqueHorsepowerInput, TorqueHorsepowerResult};

/// A shaped result plus its advisories, produced by each formula
/// module's `run` and wrapped into the envelope by [`evaluate`].
#[derive(Debug, Clone)]
pub struct Shaped {
    pub result: CalculationResult,
    pub warnings: Vec<Warning>,
    pub recommendations: Vec<Recommendation>,
}

impl Shaped {
    pub(crate) fn new(result: CalculationResult) -> Self {
        Self {
            result,
            warnings: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub(crate) fn with_warnings(mut self, warnings: Vec<Warning>) -> Self {
        self.warnings = warnings;
        self
    }

    pub(crate) fn with_recommendations(mut self, recommendations: Vec<Recommendation>) -> Self {
        self.recommendations = recommendations;
        self
    }
}

/// Dispatch one calculation by kind.
fn run_kind(kind: FormulaKind, raw: &RawInputs) -> CalcResult<Shaped> {
    match kind {
        FormulaKind::EngineDisplacement => displacement::run(raw),
        FormulaKind::CarburetorCfm => carburetor::run(raw),
        FormulaKind::CompressionHorsepower => compression::run(raw),
        FormulaKind::GearRatio => gearing::run_gear_ratio(raw),
        FormulaKind::RpmFromSpeed => gearing::run_rpm_from_speed(raw),
        FormulaKind::TorqueHorsepower => power::run_torque_horsepower(raw),
        FormulaKind::SuperchargerBoost => induction::run_supercharger(raw),
        FormulaKind::RamAir => induction::run_ram_air(raw),
        FormulaKind::VolumetricEfficiency => efficiency::run(raw),
        FormulaKind::PowerToWeight => power::run_power_to_weight(raw),
        FormulaKind::FluidWeight => fluids::run(raw),
        FormulaKind::UnitConversion => conversion::run(raw),
    }
}

/// Evaluate one calculation and wrap the outcome in a [`ResultEnvelope`].
///
/// This function never panics and never returns `Err`: every validation
/// or evaluation failure comes back as an envelope with `success: false`
/// and a human-readable error message. The envelope metadata echoes the
/// raw inputs and records the formula slug, timestamp, and accuracy tier.
pub fn evaluate(kind: FormulaKind, raw: &RawInputs) -> ResultEnvelope {
    let metadata = EnvelopeMetadata {
        timestamp: Utc::now(),
        formula: kind.slug().to_string(),
        inputs: raw.clone(),
        accuracy: kind.metadata().accuracy,
    };

    match run_kind(kind, raw) {
        Ok(shaped) => {
            ResultEnvelope::ok(shaped.result, shaped.warnings, shaped.recommendations, metadata)
        }
        Err(error) => ResultEnvelope::fail(error, metadata),
    }
}
