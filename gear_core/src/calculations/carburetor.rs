//! # Carburetor CFM
//!
//! Sizes a carburetor for an engine. Two conventions are in common use
//! and both are supported:
//!
//! - **Airflow**: `CFM = CI * RPM / 3456`, the theoretical airflow of a
//!   four-stroke at 100% volumetric efficiency.
//! - **Multiplier**: `CFM = CI * multiplier`, a rule-of-thumb with the
//!   multiplier picked by engine tier (1.618 stock, 1.76 modified).
//!
//! ## Example
//!
//! ```rust
//! use gear_core::calculations::carburetor::{CarburetorInput, CfmModel, EngineBuild, calculate};
//!
//! let input = CarburetorInput {
//!     displacement_ci: 350.0,
//!     model: CfmModel::Multiplier { build: EngineBuild::Stock },
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.cfm - 566.3).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use crate::envelope::{CalculationResult, Priority, Recommendation};
use crate::errors::{CalcError, CalcResult};
use crate::units::Cfm;
use crate::validate::{self, RawInputs};

use super::Shaped;

/// Four-stroke airflow constant: two crank revolutions per intake event,
/// 1728 cubic inches per cubic foot. 2 * 1728 = 3456.
const AIRFLOW_CONSTANT: f64 = 3456.0;

const MAX_DISPLACEMENT_CI: f64 = 1000.0;
const MAX_RPM: f64 = 12_000.0;

/// Common carburetor sizes for the recommendation text.
const STANDARD_CARB_SIZES: &[f64] = &[390.0, 500.0, 600.0, 650.0, 750.0, 850.0, 950.0, 1050.0];

/// Engine tier for the multiplier convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineBuild {
    /// Stock cam, heads, and intake
    Stock,
    /// Ported heads, performance cam, free-flowing intake
    Modified,
}

impl EngineBuild {
    pub const ALL: [EngineBuild; 2] = [EngineBuild::Stock, EngineBuild::Modified];

    /// CFM-per-cubic-inch multiplier for this tier
    pub fn multiplier(&self) -> f64 {
        match self {
            EngineBuild::Stock => 1.618,
            EngineBuild::Modified => 1.76,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EngineBuild::Stock => "stock",
            EngineBuild::Modified => "modified",
        }
    }

    /// Parse from common string representations
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stock" => Some(EngineBuild::Stock),
            "modified" | "mod" | "performance" => Some(EngineBuild::Modified),
            _ => None,
        }
    }
}

/// Which CFM convention to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CfmModel {
    /// CFM = CI * RPM / 3456
    Airflow { max_rpm: f64 },
    /// CFM = CI * tier multiplier
    Multiplier { build: EngineBuild },
}

/// Input parameters for carburetor sizing.
///
/// ## JSON Examples
///
/// ```json
/// { "displacement_ci": 350.0, "model": { "kind": "airflow", "max_rpm": 6000.0 } }
/// ```
///
/// ```json
/// { "displacement_ci": 350.0, "model": { "kind": "multiplier", "build": "stock" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarburetorInput {
    /// Engine displacement in cubic inches
    pub displacement_ci: f64,

    /// Which sizing convention to apply
    pub model: CfmModel,
}

impl CarburetorInput {
    /// Parse raw form inputs.
    ///
    /// If `engine_build` is present the multiplier convention is used;
    /// otherwise `max_rpm` is required and the airflow convention applies.
    pub fn from_raw(raw: &RawInputs) -> CalcResult<Self> {
        let displacement_ci = validate::number_in(raw, "displacement_ci", 0.0, MAX_DISPLACEMENT_CI)?;

        let model = if raw.contains_key("engine_build") {
            let build = validate::option(raw, "engine_build", "stock, modified", EngineBuild::parse)?;
            CfmModel::Multiplier { build }
        } else {
            let max_rpm = validate::number_in(raw, "max_rpm", 0.0, MAX_RPM)?;
            CfmModel::Airflow { max_rpm }
        };

        let input = Self {
            displacement_ci,
            model,
        };
        input.validate()?;
        Ok(input)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.displacement_ci <= 0.0 {
            return Err(CalcError::out_of_range(
                "displacement_ci",
                self.displacement_ci,
                0.0,
                MAX_DISPLACEMENT_CI,
            ));
        }
        if let CfmModel::Airflow { max_rpm } = self.model {
            if max_rpm <= 0.0 {
                return Err(CalcError::out_of_range("max_rpm", max_rpm, 0.0, MAX_RPM));
            }
        }
        Ok(())
    }
}

/// Results from carburetor sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfmResult {
    /// Required airflow in CFM
    pub cfm: f64,

    /// Engine tier, when the multiplier convention was used
    pub build: Option<EngineBuild>,

    /// The smallest standard carburetor at or above the requirement
    pub suggested_carb_cfm: Option<f64>,
}

/// Calculate required carburetor CFM.
pub fn calculate(input: &CarburetorInput) -> CalcResult<CfmResult> {
    input.validate()?;

    let (cfm, build) = match input.model {
        CfmModel::Airflow { max_rpm } => {
            (Cfm(input.displacement_ci * max_rpm / AIRFLOW_CONSTANT), None)
        }
        CfmModel::Multiplier { build } => {
            (Cfm(input.displacement_ci * build.multiplier()), Some(build))
        }
    };

    validate::in_domain(cfm.value(), "cfm", "airflow must be positive")?;

    let suggested_carb_cfm = STANDARD_CARB_SIZES
        .iter()
        .copied()
        .find(|&size| size >= cfm.value());

    Ok(CfmResult {
        cfm: cfm.value(),
        build,
        suggested_carb_cfm,
    })
}

/// Full pipeline for dispatch: parse, calculate, shape.
pub(crate) fn run(raw: &RawInputs) -> CalcResult<Shaped> {
    let input = CarburetorInput::from_raw(raw)?;
    let result = calculate(&input)?;

    let mut shaped = CalculationResult::new(result.cfm, "CFM", 0);
    if let Some(build) = result.build {
        shaped = shaped.with_category(build.label());
    }

    let mut recommendations = Vec::new();
    if let Some(size) = result.suggested_carb_cfm {
        recommendations.push(Recommendation::tuning(
            Priority::Low,
            format!("A {size:.0} CFM carburetor is the smallest standard size that covers this requirement"),
        ));
    } else {
        recommendations.push(Recommendation::tuning(
            Priority::Medium,
            "Requirement exceeds common single-carburetor sizes; consider multiple carburetors or fuel injection",
        ));
    }

    Ok(Shaped::new(shaped).with_recommendations(recommendations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{inputs, RawValue};

    #[test]
    fn test_airflow_convention() {
        let input = CarburetorInput {
            displacement_ci: 350.0,
            model: CfmModel::Airflow { max_rpm: 6000.0 },
        };
        let result = calculate(&input).unwrap();

        // 350 * 6000 / 3456 = 607.6
        assert!((result.cfm - 607.6).abs() < 0.1);
        assert_eq!(result.build, None);
    }

    #[test]
    fn test_stock_multiplier() {
        let input = CarburetorInput {
            displacement_ci: 350.0,
            model: CfmModel::Multiplier {
                build: EngineBuild::Stock,
            },
        };
        let result = calculate(&input).unwrap();

        // 350 * 1.618 = 566.3
        assert!((result.cfm - 566.3).abs() < 0.05);
    }

    #[test]
    fn test_modified_multiplier_flows_more() {
        let stock = calculate(&CarburetorInput {
            displacement_ci: 350.0,
            model: CfmModel::Multiplier {
                build: EngineBuild::Stock,
            },
        })
        .unwrap();
        let modified = calculate(&CarburetorInput {
            displacement_ci: 350.0,
            model: CfmModel::Multiplier {
                build: EngineBuild::Modified,
            },
        })
        .unwrap();
        assert!(modified.cfm > stock.cfm);
        assert!((modified.cfm - 616.0).abs() < 0.05);
    }

    #[test]
    fn test_suggested_carb_size() {
        let result = calculate(&CarburetorInput {
            displacement_ci: 350.0,
            model: CfmModel::Multiplier {
                build: EngineBuild::Stock,
            },
        })
        .unwrap();
        // 566.3 CFM -> next standard size up is 600
        assert_eq!(result.suggested_carb_cfm, Some(600.0));
    }

    #[test]
    fn test_from_raw_prefers_multiplier_when_build_given() {
        let raw = inputs([
            ("displacement_ci", RawValue::Number(350.0)),
            ("engine_build", "modified".into()),
        ]);
        let input = CarburetorInput::from_raw(&raw).unwrap();
        assert!(matches!(
            input.model,
            CfmModel::Multiplier {
                build: EngineBuild::Modified
            }
        ));
    }

    #[test]
    fn test_from_raw_requires_rpm_without_build() {
        let raw = inputs([("displacement_ci", RawValue::Number(350.0))]);
        let err = CarburetorInput::from_raw(&raw).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_unknown_build_rejected() {
        let raw = inputs([
            ("displacement_ci", RawValue::Number(350.0)),
            ("engine_build", "race".into()),
        ]);
        let err = CarburetorInput::from_raw(&raw).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_OPTION");
    }

    #[test]
    fn test_shaped_category_is_build_tier() {
        let raw = inputs([
            ("displacement_ci", RawValue::Number(350.0)),
            ("engine_build", "stock".into()),
        ]);
        let shaped = run(&raw).unwrap();
        assert_eq!(shaped.result.category.as_deref(), Some("stock"));
        assert_eq!(shaped.result.precision, 0);
        assert!(!shaped.recommendations.is_empty());
    }
}
