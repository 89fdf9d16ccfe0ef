use serde::Serialize;

use crate::engine::constants::PER_1000_KCAL;
use crate::models::{Nutrient, NutrientProfile};

/// Scale absolute nutrient totals to a 1000 kcal basis.
///
/// Returns an empty profile when there is no energy to scale by.
pub fn per_1000_kcal(nutrients: &NutrientProfile, energy_kcal: f64) -> NutrientProfile {
    if energy_kcal <= 0.0 || !energy_kcal.is_finite() {
        return NutrientProfile::new();
    }
    nutrients.scaled(PER_1000_KCAL / energy_kcal)
}

/// A nutrient under its per-1000-kcal minimum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AafcoShortfall {
    pub nutrient: Nutrient,
    pub value: f64,
    pub minimum: f64,
    pub message: String,
}

/// Compare a per-1000-kcal profile against `minimums`.
pub fn evaluate(per_1000: &NutrientProfile, minimums: &[(Nutrient, f64)]) -> Vec<AafcoShortfall> {
    minimums
        .iter()
        .filter_map(|&(nutrient, minimum)| {
            let value = per_1000.get(nutrient);
            if value >= minimum {
                return None;
            }
            let unit = nutrient.unit();
            Some(AafcoShortfall {
                nutrient,
                value,
                minimum,
                message: format!(
                    "{} below minimum: {:.2}{} < {}{}",
                    nutrient, value, unit, minimum, unit
                ),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::constants::AAFCO_ADULT_MINIMUMS;

    #[test]
    fn test_per_1000_scaling() {
        let nutrients = NutrientProfile::new().with(Nutrient::Protein, 25.0);
        let scaled = per_1000_kcal(&nutrients, 500.0);
        assert!((scaled.get(Nutrient::Protein) - 50.0).abs() < 1e-9);
        assert_eq!(per_1000_kcal(&nutrients, 0.0), NutrientProfile::new());
    }

    #[test]
    fn test_shortfall_message() {
        let per_1000 = NutrientProfile::new().with(Nutrient::Protein, 40.0);
        let shortfalls = evaluate(&per_1000, &[(Nutrient::Protein, 45.0)]);
        assert_eq!(shortfalls.len(), 1);
        assert_eq!(shortfalls[0].message, "protein below minimum: 40.00g < 45g");
    }

    #[test]
    fn test_complete_profile_has_no_shortfalls() {
        let per_1000: NutrientProfile = AAFCO_ADULT_MINIMUMS
            .iter()
            .map(|&(n, min)| (n, min * 1.5))
            .collect();
        assert!(evaluate(&per_1000, &AAFCO_ADULT_MINIMUMS).is_empty());
    }
}
