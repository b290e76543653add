//! # Band Classification
//!
//! Several formulas categorize their numeric result into a qualitative
//! tier (volumetric efficiency bands, power-to-weight classes, carburetor
//! engine tiers). All of them consult the same [`Bands`] table so the
//! boundary semantics cannot drift between formulas: every threshold is an
//! inclusive lower bound. A value sitting exactly on the "good" boundary
//! is "good", not "average".
//!
//! ## Example
//!
//! ```rust
//! use gear_core::classify::Bands;
//!
//! const BANDS: Bands<&str> = Bands::new("poor", &[(75.0, "average"), (85.0, "good"), (95.0, "excellent")]);
//!
//! assert_eq!(BANDS.classify(70.0), "poor");
//! assert_eq!(BANDS.classify(85.0), "good");
//! assert_eq!(BANDS.classify(120.0), "excellent");
//! ```

/// An ordered boundary table mapping a value to a category.
///
/// `floor` is the category for values below every threshold. `steps` must
/// be in ascending threshold order; each threshold is an inclusive lower
/// bound for its category.
#[derive(Debug, Clone, Copy)]
pub struct Bands<C: Copy + 'static> {
    floor: C,
    steps: &'static [(f64, C)],
}

impl<C: Copy + 'static> Bands<C> {
    pub const fn new(floor: C, steps: &'static [(f64, C)]) -> Self {
        Self { floor, steps }
    }

    /// Classify a value. Inclusive lower bounds: `value >= threshold`
    /// selects that step's category.
    pub fn classify(&self, value: f64) -> C {
        debug_assert!(
            self.steps.windows(2).all(|w| w[0].0 < w[1].0),
            "band thresholds must be strictly ascending"
        );
        let mut current = self.floor;
        for &(threshold, category) in self.steps {
            if value >= threshold {
                current = category;
            } else {
                break;
            }
        }
        current
    }

    /// The threshold at which `category` begins, if it appears in the table.
    pub fn lower_bound_of(&self, category: C) -> Option<f64>
    where
        C: PartialEq,
    {
        self.steps
            .iter()
            .find(|(_, c)| *c == category)
            .map(|(threshold, _)| *threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BANDS: Bands<&str> =
        Bands::new("economy", &[(0.05, "sport"), (0.08, "performance"), (0.12, "supercar")]);

    #[test]
    fn test_below_all_thresholds() {
        assert_eq!(TEST_BANDS.classify(0.01), "economy");
    }

    #[test]
    fn test_inclusive_lower_bound() {
        assert_eq!(TEST_BANDS.classify(0.05), "sport");
        assert_eq!(TEST_BANDS.classify(0.08), "performance");
        assert_eq!(TEST_BANDS.classify(0.12), "supercar");
    }

    #[test]
    fn test_just_below_boundary() {
        assert_eq!(TEST_BANDS.classify(0.0799999), "sport");
    }

    #[test]
    fn test_above_all_thresholds() {
        assert_eq!(TEST_BANDS.classify(1.0), "supercar");
    }

    #[test]
    fn test_lower_bound_lookup() {
        assert_eq!(TEST_BANDS.lower_bound_of("performance"), Some(0.08));
        assert_eq!(TEST_BANDS.lower_bound_of("economy"), None);
    }
}
