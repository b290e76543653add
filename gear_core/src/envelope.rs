//! # Result Envelope
//!
//! Every calculation returns a [`ResultEnvelope`]: the shaped numeric
//! result on success, a human-readable error on failure, and always the
//! warnings, recommendations, and metadata that go with it. The envelope
//! is what the presentation layer renders; no raw `CalcError` or partial
//! numeric output ever crosses that boundary.
//!
//! ## Invariants
//!
//! - `result` is present if and only if `success` is true
//! - `error` is present if and only if `success` is false
//! - `warnings` and `recommendations` are always present (possibly empty)
//!
//! The constructors [`ResultEnvelope::ok`] and [`ResultEnvelope::fail`]
//! are the only way to build an envelope, so the invariants hold by
//! construction.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "success": true,
//!   "result": {
//!     "value": 349.85,
//!     "unit": "CI",
//!     "precision": 1,
//!     "category": null,
//!     "derived": [ { "label": "liters", "value": 5.73, "unit": "L", "precision": 2 } ]
//!   },
//!   "warnings": [],
//!   "recommendations": [],
//!   "metadata": {
//!     "timestamp": "2026-08-07T12:00:00Z",
//!     "formula": "engine-displacement",
//!     "inputs": { "bore_in": 4.0, "stroke_in": 3.48, "cylinders": 8 },
//!     "accuracy": "high"
//!   }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::validate::RawInputs;

// ============================================================================
// Shaped Result
// ============================================================================

/// A secondary value derived alongside the primary result (e.g., the
/// liters figure that accompanies a cubic-inch displacement).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedValue {
    /// Short label (e.g., "liters", "torque_lbft")
    pub label: String,
    /// Full-precision value
    pub value: f64,
    /// Unit label for display
    pub unit: String,
    /// Decimal places for display
    pub precision: u8,
}

impl DerivedValue {
    pub fn new(label: impl Into<String>, value: f64, unit: impl Into<String>, precision: u8) -> Self {
        Self {
            label: label.into(),
            value,
            unit: unit.into(),
            precision,
        }
    }

    /// Value rounded to display precision. The stored value is untouched.
    pub fn display_value(&self) -> f64 {
        round_to(self.value, self.precision)
    }
}

/// The shaped output of a formula evaluator: primary value, unit,
/// display precision, optional qualitative category, and any derived
/// sub-values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Primary numeric result at full double precision
    pub value: f64,
    /// Unit label (e.g., "CI", "HP", "lb/gal", ":1" for ratios)
    pub unit: String,
    /// Decimal places for display (0 for discrete quantities like RPM)
    pub precision: u8,
    /// Qualitative tier, when the formula defines bands
    /// (e.g., "good" volumetric efficiency, "sport" power-to-weight)
    pub category: Option<String>,
    /// Secondary values derived from the same inputs
    pub derived: Vec<DerivedValue>,
}

impl CalculationResult {
    /// Build a result with no category and no derived values.
    pub fn new(value: f64, unit: impl Into<String>, precision: u8) -> Self {
        Self {
            value,
            unit: unit.into(),
            precision,
            category: None,
            derived: Vec::new(),
        }
    }

    /// Attach a qualitative category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach a derived sub-value.
    pub fn with_derived(mut self, derived: DerivedValue) -> Self {
        self.derived.push(derived);
        self
    }

    /// Primary value rounded to display precision. Derived values keep
    /// their own precision; the underlying f64 is never altered.
    pub fn display_value(&self) -> f64 {
        round_to(self.value, self.precision)
    }
}

/// Round to a fixed number of decimal places for display.
pub fn round_to(value: f64, precision: u8) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

// ============================================================================
// Warnings and Recommendations
// ============================================================================

/// What a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningCategory {
    Safety,
    Performance,
    Accuracy,
}

/// How urgent a warning is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A domain-threshold warning attached to a successful result
/// (e.g., compression ratio beyond pump-fuel territory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub category: WarningCategory,
    pub message: String,
    pub severity: Severity,
}

impl Warning {
    pub fn new(category: WarningCategory, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            severity,
        }
    }

    pub fn safety(severity: Severity, message: impl Into<String>) -> Self {
        Self::new(WarningCategory::Safety, severity, message)
    }

    pub fn performance(severity: Severity, message: impl Into<String>) -> Self {
        Self::new(WarningCategory::Performance, severity, message)
    }

    pub fn accuracy(severity: Severity, message: impl Into<String>) -> Self {
        Self::new(WarningCategory::Accuracy, severity, message)
    }
}

/// What a recommendation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Performance,
    Safety,
    Tuning,
}

/// How strongly a recommendation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A follow-up suggestion attached to a result (e.g., "upgrade the fuel
/// system before running this much boost").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub message: String,
    pub priority: Priority,
}

impl Recommendation {
    pub fn new(
        category: RecommendationCategory,
        priority: Priority,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            priority,
        }
    }

    pub fn performance(priority: Priority, message: impl Into<String>) -> Self {
        Self::new(RecommendationCategory::Performance, priority, message)
    }

    pub fn safety(priority: Priority, message: impl Into<String>) -> Self {
        Self::new(RecommendationCategory::Safety, priority, message)
    }

    pub fn tuning(priority: Priority, message: impl Into<String>) -> Self {
        Self::new(RecommendationCategory::Tuning, priority, message)
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// How much to trust the number: exact arithmetic, a standard
/// approximation, or an empirical estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyTier {
    High,
    Medium,
    Estimated,
}

/// Metadata stamped on every envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeMetadata {
    /// When the calculation ran
    pub timestamp: DateTime<Utc>,
    /// Stable formula identifier (catalog slug, e.g., "gear-ratio")
    pub formula: String,
    /// Echo of the raw inputs the caller supplied
    pub inputs: RawInputs,
    /// Accuracy tier of this formula
    pub accuracy: AccuracyTier,
}

// ============================================================================
// Envelope
// ============================================================================

/// The wrapper every calculation returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    /// Whether the calculation produced a result
    pub success: bool,
    /// Present exactly when `success`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CalculationResult>,
    /// Human-readable failure reason, present exactly when `!success`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Ordered warnings (never absent; empty when there are none)
    pub warnings: Vec<Warning>,
    /// Ordered recommendations (never absent; empty when there are none)
    pub recommendations: Vec<Recommendation>,
    /// Calculation metadata
    pub metadata: EnvelopeMetadata,
}

impl ResultEnvelope {
    /// Build a successful envelope.
    pub fn ok(
        result: CalculationResult,
        warnings: Vec<Warning>,
        recommendations: Vec<Recommendation>,
        metadata: EnvelopeMetadata,
    ) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
            warnings,
            recommendations,
            metadata,
        }
    }

    /// Build a failed envelope from a calculation error.
    ///
    /// The error's Display form is what the presentation layer shows in
    /// place of a result.
    pub fn fail(error: CalcError, metadata: EnvelopeMetadata) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.to_string()),
            warnings: Vec::new(),
            recommendations: Vec::new(),
            metadata,
        }
    }

    /// Highest severity among attached warnings, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.warnings.iter().map(|w| w.severity).max()
    }
}
