//! # Formula Catalog
//!
//! Central registry of every calculation kind the engine supports. Each
//! kind has metadata: display name, stable slug, plain-text formula,
//! variable definitions, keywords for the page/metadata layer, and an
//! accuracy tier.
//!
//! ## Architecture
//!
//! The catalog provides:
//! - Type-safe formula identification via the `FormulaKind` enum
//! - Static descriptive text consumed by the (out-of-scope) page layer
//! - Markdown reference generation for FORMULAS.md
//!
//! ## Usage
//!
//! ```rust
//! use gear_core::catalog::FormulaKind;
//!
//! let meta = FormulaKind::TorqueHorsepower.metadata();
//! assert_eq!(meta.slug, "torque-horsepower");
//! assert!(meta.formula_plain.contains("5252"));
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::envelope::AccuracyTier;

// ============================================================================
// Categories
// ============================================================================

/// Groups for organizing formulas in the reference document and the
/// calculator index pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaCategory {
    /// Engine geometry and airflow (displacement, CFM, VE)
    Engine,
    /// Gearing and road speed (ratios, RPM)
    Drivetrain,
    /// Power and torque (HP conversion, power-to-weight)
    Power,
    /// Forced and ram induction
    ForcedInduction,
    /// Fluid weights and capacities
    Fluids,
    /// General unit conversions
    UnitConversion,
}

impl FormulaCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaCategory::Engine => "Engine",
            FormulaCategory::Drivetrain => "Drivetrain",
            FormulaCategory::Power => "Power",
            FormulaCategory::ForcedInduction => "Forced Induction",
            FormulaCategory::Fluids => "Fluids",
            FormulaCategory::UnitConversion => "Unit Conversion",
        }
    }

    /// Sort order for the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            FormulaCategory::Engine => 1,
            FormulaCategory::Power => 2,
            FormulaCategory::ForcedInduction => 3,
            FormulaCategory::Drivetrain => 4,
            FormulaCategory::Fluids => 5,
            FormulaCategory::UnitConversion => 6,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in a formula.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol or parameter name (e.g., "bore", "RPM")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "in", "lb-ft", "psi")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Formula Metadata
// ============================================================================

/// Complete metadata for one calculation kind.
///
/// The `title`/`description`/`keywords` fields are the static descriptive
/// text the page and metadata layers consume; they never affect the
/// numeric path.
#[derive(Debug, Clone)]
pub struct FormulaMetadata {
    /// Human-readable name (e.g., "Engine Displacement")
    pub name: &'static str,
    /// Stable identifier used in envelope metadata and routing
    pub slug: &'static str,
    /// Brief description of what this formula calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Search keywords for the page layer
    pub keywords: &'static [&'static str],
    /// Category for grouping
    pub category: FormulaCategory,
    /// How much to trust the output
    pub accuracy: AccuracyTier,
}

// ============================================================================
// FormulaKind
// ============================================================================

/// All calculation kinds the engine supports.
///
/// This enum is the dispatch key for [`crate::calculations::evaluate`]
/// and the primary interface for catalog lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum FormulaKind {
    /// CI = pi/4 * bore^2 * stroke * cylinders
    EngineDisplacement,
    /// CFM from displacement and RPM, or via engine-tier multiplier
    CarburetorCfm,
    /// Horsepower change from a compression ratio change
    CompressionHorsepower,
    /// Ring/pinion ratio from teeth, speed/RPM, or an ideal-ratio recommendation
    GearRatio,
    /// Engine RPM at a given road speed and gearing
    RpmFromSpeed,
    /// Torque and horsepower conversion through 5252
    TorqueHorsepower,
    /// Horsepower gain from supercharger boost
    SuperchargerBoost,
    /// Pressure and horsepower gain from ram-air induction
    RamAir,
    /// Volumetric efficiency from power, displacement, and RPM
    VolumetricEfficiency,
    /// Horsepower per pound and pounds per horsepower
    PowerToWeight,
    /// Fluid weight from volume and fluid type
    FluidWeight,
    /// Length, weight, temperature, speed, and volume conversions
    UnitConversion,
}

impl FormulaKind {
    /// Get the full metadata for this formula
    pub fn metadata(&self) -> FormulaMetadata {
        match self {
            FormulaKind::EngineDisplacement => FormulaMetadata {
                name: "Engine Displacement",
                slug: "engine-displacement",
                description: "Total swept cylinder volume from bore, stroke, and cylinder count",
                formula_plain: "CI = pi/4 * bore^2 * stroke * cylinders; L = CI * 0.0163871",
                variables: vec![
                    Variable::new("bore", "Cylinder bore diameter", "in"),
                    Variable::new("stroke", "Piston stroke length", "in"),
                    Variable::new("cylinders", "Number of cylinders", "-"),
                    Variable::new("CI", "Displacement", "in^3"),
                ],
                keywords: &["engine displacement", "cubic inches", "liters", "bore", "stroke"],
                category: FormulaCategory::Engine,
                accuracy: AccuracyTier::High,
            },

            FormulaKind::CarburetorCfm => FormulaMetadata {
                name: "Carburetor CFM",
                slug: "carburetor-cfm",
                description: "Carburetor airflow requirement from engine displacement",
                formula_plain: "CFM = CI * RPM / 3456, or CFM = CI * multiplier (1.618 stock, 1.76 modified)",
                variables: vec![
                    Variable::new("CI", "Engine displacement", "in^3"),
                    Variable::new("RPM", "Maximum engine speed", "rpm"),
                    Variable::new("CFM", "Required airflow", "ft^3/min"),
                ],
                keywords: &["carburetor", "cfm", "airflow", "carb sizing"],
                category: FormulaCategory::Engine,
                accuracy: AccuracyTier::Medium,
            },

            FormulaKind::CompressionHorsepower => FormulaMetadata {
                name: "Compression Ratio Horsepower",
                slug: "compression-horsepower",
                description: "Estimated horsepower change from raising or lowering compression ratio",
                formula_plain: "%gain = sum over ratio points of per-point percentage (empirical table)",
                variables: vec![
                    Variable::new("CR_old", "Current compression ratio", ":1"),
                    Variable::new("CR_new", "New compression ratio", ":1"),
                    Variable::new("HP", "Baseline horsepower", "hp"),
                ],
                keywords: &["compression ratio", "horsepower gain", "pistons", "octane"],
                category: FormulaCategory::Engine,
                accuracy: AccuracyTier::Estimated,
            },

            FormulaKind::GearRatio => FormulaMetadata {
                name: "Gear Ratio",
                slug: "gear-ratio",
                description: "Final drive ratio from teeth counts, measured speed and RPM, or a target cruise RPM",
                formula_plain: "ratio = ring_teeth / pinion_teeth, or ratio = (RPM * tire_dia) / (speed * 336)",
                variables: vec![
                    Variable::new("ring_teeth", "Ring gear tooth count", "-"),
                    Variable::new("pinion_teeth", "Pinion gear tooth count", "-"),
                    Variable::new("tire_dia", "Tire diameter", "in"),
                    Variable::new("speed", "Road speed", "mph"),
                ],
                keywords: &["gear ratio", "ring and pinion", "rear end", "differential"],
                category: FormulaCategory::Drivetrain,
                accuracy: AccuracyTier::High,
            },

            FormulaKind::RpmFromSpeed => FormulaMetadata {
                name: "RPM From Speed",
                slug: "rpm-from-speed",
                description: "Engine speed at a given road speed, gear ratio, and tire diameter",
                formula_plain: "RPM = (speed * ratio * 336) / tire_dia",
                variables: vec![
                    Variable::new("speed", "Road speed", "mph"),
                    Variable::new("ratio", "Final drive ratio", ":1"),
                    Variable::new("tire_dia", "Tire diameter", "in"),
                    Variable::new("RPM", "Engine speed", "rpm"),
                ],
                keywords: &["rpm", "cruise rpm", "tire diameter", "highway gears"],
                category: FormulaCategory::Drivetrain,
                accuracy: AccuracyTier::High,
            },

            FormulaKind::TorqueHorsepower => FormulaMetadata {
                name: "Torque and Horsepower",
                slug: "torque-horsepower",
                description: "Convert between torque and horsepower at a given RPM",
                formula_plain: "HP = torque * RPM / 5252; torque = HP * 5252 / RPM",
                variables: vec![
                    Variable::new("torque", "Engine torque", "lb-ft"),
                    Variable::new("RPM", "Engine speed", "rpm"),
                    Variable::new("HP", "Power", "hp"),
                ],
                keywords: &["torque", "horsepower", "5252", "dyno"],
                category: FormulaCategory::Power,
                accuracy: AccuracyTier::High,
            },

            FormulaKind::SuperchargerBoost => FormulaMetadata {
                name: "Supercharger Boost",
                slug: "supercharger-boost",
                description: "Estimated horsepower gain from boost pressure over atmospheric",
                formula_plain: "%gain = boost / 14.7 * 100; total = base * (1 + boost / 14.7)",
                variables: vec![
                    Variable::new("base", "Naturally aspirated horsepower", "hp"),
                    Variable::new("boost", "Boost pressure", "psi"),
                ],
                keywords: &["supercharger", "boost", "psi", "forced induction"],
                category: FormulaCategory::ForcedInduction,
                accuracy: AccuracyTier::Estimated,
            },

            FormulaKind::RamAir => FormulaMetadata {
                name: "Ram Air",
                slug: "ram-air",
                description: "Pressure recovery from vehicle speed and the resulting horsepower gain",
                formula_plain: "pressure from speed (empirical table), then %gain = pressure / 14.7 * 100",
                variables: vec![
                    Variable::new("speed", "Vehicle speed", "mph"),
                    Variable::new("base", "Baseline horsepower", "hp"),
                ],
                keywords: &["ram air", "cold air intake", "pressure recovery"],
                category: FormulaCategory::ForcedInduction,
                accuracy: AccuracyTier::Estimated,
            },

            FormulaKind::VolumetricEfficiency => FormulaMetadata {
                name: "Volumetric Efficiency",
                slug: "volumetric-efficiency",
                description: "How completely the engine fills its cylinders, from measured power",
                formula_plain: "VE% = (HP * 5252 * 2 * 60) / (CI * RPM)",
                variables: vec![
                    Variable::new("HP", "Peak horsepower", "hp"),
                    Variable::new("CI", "Displacement", "in^3"),
                    Variable::new("RPM", "Engine speed at peak power", "rpm"),
                ],
                keywords: &["volumetric efficiency", "ve", "cylinder filling", "head flow"],
                category: FormulaCategory::Engine,
                accuracy: AccuracyTier::Medium,
            },

            FormulaKind::PowerToWeight => FormulaMetadata {
                name: "Power to Weight",
                slug: "power-to-weight",
                description: "Horsepower per pound and pounds per horsepower, with a performance class",
                formula_plain: "hp_per_lb = HP / weight; lb_per_hp = weight / HP",
                variables: vec![
                    Variable::new("HP", "Engine horsepower", "hp"),
                    Variable::new("weight", "Vehicle weight", "lb"),
                ],
                keywords: &["power to weight", "hp per pound", "acceleration"],
                category: FormulaCategory::Power,
                accuracy: AccuracyTier::High,
            },

            FormulaKind::FluidWeight => FormulaMetadata {
                name: "Fluid Weight",
                slug: "fluid-weight",
                description: "Weight of a volume of automotive fluid",
                formula_plain: "weight = volume * density[fluid_type]",
                variables: vec![
                    Variable::new("volume", "Fluid volume", "gal"),
                    Variable::new("fluid_type", "gasoline, motor-oil, transmission-fluid, water", "-"),
                    Variable::new("weight", "Fluid weight", "lb"),
                ],
                keywords: &["fluid weight", "gasoline weight", "fuel load"],
                category: FormulaCategory::Fluids,
                accuracy: AccuracyTier::Medium,
            },

            FormulaKind::UnitConversion => FormulaMetadata {
                name: "Unit Conversion",
                slug: "unit-conversion",
                description: "Length, weight, temperature, speed, and volume conversions",
                formula_plain: "multiplicative factor per unit pair; temperature is affine (C = (F - 32) * 5/9)",
                variables: vec![
                    Variable::new("value", "Quantity to convert", "-"),
                    Variable::new("from", "Source unit", "-"),
                    Variable::new("to", "Target unit", "-"),
                ],
                keywords: &["unit converter", "metric", "imperial"],
                category: FormulaCategory::UnitConversion,
                accuracy: AccuracyTier::High,
            },
        }
    }

    /// Stable identifier used in envelope metadata and routing
    pub fn slug(&self) -> &'static str {
        self.metadata().slug
    }

    /// Look up a formula kind by its slug
    pub fn from_slug(slug: &str) -> Option<FormulaKind> {
        SLUG_INDEX.get(slug).copied()
    }

    /// Get all formulas in a given category
    pub fn in_category(category: FormulaCategory) -> Vec<FormulaKind> {
        ALL_FORMULAS
            .iter()
            .filter(|kind| kind.metadata().category == category)
            .copied()
            .collect()
    }

    /// All categories in reference-document order
    pub fn all_categories() -> Vec<FormulaCategory> {
        use FormulaCategory::*;
        let mut cats = vec![Engine, Power, ForcedInduction, Drivetrain, Fluids, UnitConversion];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All formula kinds in the catalog (for iteration)
pub static ALL_FORMULAS: &[FormulaKind] = &[
    FormulaKind::EngineDisplacement,
    FormulaKind::CarburetorCfm,
    FormulaKind::CompressionHorsepower,
    FormulaKind::GearRatio,
    FormulaKind::RpmFromSpeed,
    FormulaKind::TorqueHorsepower,
    FormulaKind::SuperchargerBoost,
    FormulaKind::RamAir,
    FormulaKind::VolumetricEfficiency,
    FormulaKind::PowerToWeight,
    FormulaKind::FluidWeight,
    FormulaKind::UnitConversion,
];

static SLUG_INDEX: Lazy<HashMap<&'static str, FormulaKind>> = Lazy::new(|| {
    ALL_FORMULAS
        .iter()
        .map(|kind| (kind.slug(), *kind))
        .collect()
});

// ============================================================================
// Markdown Generation for FORMULAS.md
// ============================================================================

/// Generate a complete FORMULAS.md reference document.
///
/// Produces a markdown document listing every formula in the catalog,
/// organized by category, with formulas, variables, and accuracy notes.
///
/// # Example
///
/// ```rust
/// use gear_core::catalog::generate_formulas_markdown;
///
/// let markdown = generate_formulas_markdown();
/// assert!(markdown.contains("Gearhead Formula Reference"));
/// assert!(markdown.contains("5252"));
/// ```
pub fn generate_formulas_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str("# Gearhead Formula Reference\n\n");
    output.push_str(
        "Auto-generated from the formula catalog in `gear_core`. \
         Do not edit by hand; run `cargo run --bin gen-formulas` instead.\n\n",
    );

    for category in FormulaKind::all_categories() {
        let kinds = FormulaKind::in_category(category);
        if kinds.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for kind in kinds {
            let meta = kind.metadata();
            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));
            output.push_str(&format!("**Accuracy:** {:?}\n\n", meta.accuracy));

            if !meta.variables.is_empty() {
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|---|---|---|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in ALL_FORMULAS {
            assert!(seen.insert(kind.slug()), "duplicate slug: {}", kind.slug());
        }
    }

    #[test]
    fn test_slug_roundtrip() {
        for kind in ALL_FORMULAS {
            assert_eq!(FormulaKind::from_slug(kind.slug()), Some(*kind));
        }
        assert_eq!(FormulaKind::from_slug("no-such-formula"), None);
    }

    #[test]
    fn test_serde_uses_slug_casing() {
        let json = serde_json::to_string(&FormulaKind::TorqueHorsepower).unwrap();
        assert_eq!(json, "\"torque-horsepower\"");
    }

    #[test]
    fn test_serde_form_matches_slug_for_every_kind() {
        for kind in ALL_FORMULAS {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.slug()));
        }
    }

    #[test]
    fn test_every_category_populated() {
        for category in FormulaKind::all_categories() {
            assert!(
                !FormulaKind::in_category(category).is_empty(),
                "empty category: {:?}",
                category
            );
        }
    }

    #[test]
    fn test_markdown_mentions_every_formula() {
        let markdown = generate_formulas_markdown();
        for kind in ALL_FORMULAS {
            assert!(markdown.contains(kind.metadata().name));
        }
    }
}
