use serde::Serialize;

use crate::engine::aggregate::AggregateTotals;
use crate::engine::constants::{
    HYDRATION_ML_PER_KG, HYDRATION_PROGRESS_CAP, KCAL_PER_G_CARBOHYDRATE, KCAL_PER_G_FAT,
    KCAL_PER_G_PROTEIN,
};
use crate::models::{MealPlan, Nutrient, NutrientProfile};

/// Share of macronutrient energy, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroShares {
    pub protein: f64,
    pub fat: f64,
    pub carbohydrate: f64,
}

/// Macro calorie split of `nutrients`, or `None` while there is no macro energy.
pub fn macro_shares(nutrients: &NutrientProfile) -> Option<MacroShares> {
    let protein_kcal = nutrients.get(Nutrient::Protein) * KCAL_PER_G_PROTEIN;
    let fat_kcal = nutrients.get(Nutrient::Fat) * KCAL_PER_G_FAT;
    let carb_kcal = nutrients.get(Nutrient::Carbohydrate) * KCAL_PER_G_CARBOHYDRATE;
    let total = protein_kcal + fat_kcal + carb_kcal;

    if total <= 0.0 {
        return None;
    }

    Some(MacroShares {
        protein: protein_kcal / total * 100.0,
        fat: fat_kcal / total * 100.0,
        carbohydrate: carb_kcal / total * 100.0,
    })
}

/// Calcium divided by phosphorus. `None` when phosphorus is zero.
pub fn calcium_phosphorus_ratio(nutrients: &NutrientProfile) -> Option<f64> {
    let phosphorus = nutrients.get(Nutrient::Phosphorus);
    if phosphorus > 0.0 {
        Some(nutrients.get(Nutrient::Calcium) / phosphorus)
    } else {
        None
    }
}

/// Protein grams per unit of body weight, in whatever unit `weight` is given.
pub fn protein_density(protein_g: f64, weight: f64) -> f64 {
    if weight > 0.0 {
        protein_g / weight
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Hydration {
    pub target_ml: f64,
    pub intake_ml: f64,
    /// Intake as a percentage of target, capped for the gauge.
    pub progress_pct: f64,
}

pub fn hydration(weight_kg: f64, intake_ml: f64) -> Hydration {
    let target_ml = weight_kg.max(0.0) * HYDRATION_ML_PER_KG;
    let intake_ml = intake_ml.max(0.0);
    let progress_pct = if target_ml > 0.0 {
        (intake_ml / target_ml * 100.0).min(HYDRATION_PROGRESS_CAP)
    } else {
        0.0
    };

    Hydration {
        target_ml,
        intake_ml,
        progress_pct,
    }
}

/// One meal's even share of the day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MealAllocation {
    pub label: String,
    pub energy_kcal: f64,
    pub nutrients: NutrientProfile,
    pub recipe_quantity: f64,
}

/// Divide the totals evenly across every meal label.
pub fn allocate_meals(meals: &MealPlan, totals: &AggregateTotals) -> Vec<MealAllocation> {
    let count = meals.len();
    if count == 0 {
        return Vec::new();
    }

    let count = count as f64;
    let nutrients: NutrientProfile = totals
        .nutrients
        .iter()
        .map(|(n, v)| (n, v / count))
        .collect();

    meals
        .labels()
        .iter()
        .map(|label| MealAllocation {
            label: label.clone(),
            energy_kcal: totals.energy_kcal / count,
            nutrients: nutrients.clone(),
            recipe_quantity: totals.recipe_quantity / count,
        })
        .collect()
}

/// Total minus target, sign preserved.
#[inline]
pub fn energy_delta(total_kcal: f64, target_kcal: f64) -> f64 {
    total_kcal - target_kcal
}

/// Energy the recipe may still supply after base food and treats.
pub fn homemade_budget(target_kcal: f64, base_food_kcal: f64, treat_kcal: f64) -> f64 {
    (target_kcal - base_food_kcal - treat_kcal).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_shares_awaiting_data() {
        assert!(macro_shares(&NutrientProfile::new()).is_none());
    }

    #[test]
    fn test_macro_shares_weights_fat_by_nine() {
        let nutrients = NutrientProfile::new()
            .with(Nutrient::Protein, 10.0)
            .with(Nutrient::Fat, 10.0)
            .with(Nutrient::Carbohydrate, 10.0);
        let shares = macro_shares(&nutrients).unwrap();
        assert!((shares.fat - 90.0 / 170.0 * 100.0).abs() < 1e-9);
        assert!((shares.protein - shares.carbohydrate).abs() < 1e-12);
    }

    #[test]
    fn test_ca_p_with_zero_calcium_is_zero_not_unavailable() {
        let nutrients = NutrientProfile::new().with(Nutrient::Phosphorus, 100.0);
        assert_eq!(calcium_phosphorus_ratio(&nutrients), Some(0.0));
    }

    #[test]
    fn test_hydration_capped() {
        let h = hydration(10.0, 2000.0);
        assert_eq!(h.target_ml, 600.0);
        assert_eq!(h.progress_pct, HYDRATION_PROGRESS_CAP);

        let h = hydration(10.0, 300.0);
        assert!((h.progress_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_hydration_zero_weight() {
        let h = hydration(0.0, 500.0);
        assert_eq!(h.target_ml, 0.0);
        assert_eq!(h.progress_pct, 0.0);
    }

    #[test]
    fn test_no_meals_no_allocation() {
        let totals = AggregateTotals {
            energy_kcal: 900.0,
            ..Default::default()
        };
        assert!(allocate_meals(&MealPlan::default(), &totals).is_empty());
    }

    #[test]
    fn test_homemade_budget_floors_at_zero() {
        assert_eq!(homemade_budget(600.0, 500.0, 50.0), 50.0);
        assert_eq!(homemade_budget(600.0, 700.0, 50.0), 0.0);
    }
}
