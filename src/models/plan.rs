use serde::{Deserialize, Serialize};

use crate::engine::aafco::AafcoShortfall;
use crate::engine::aggregate::AggregateTotals;
use crate::engine::diagnostics::Diagnostic;
use crate::engine::energy::EnergyRequirement;
use crate::engine::ratios::{Hydration, MacroShares, MealAllocation};
use crate::models::food::{NutrientProfile, Recipe, RecipeLine};
use crate::models::subject::{Subject, WeightUnit};

/// Ordered meal labels. Duplicates are allowed and order is preserved;
/// the plan only divides totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealPlan(Vec<String>);

impl MealPlan {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// Parse a comma-separated label list, dropping blanks.
    pub fn parse(input: &str) -> Self {
        Self::new(
            input
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty()),
        )
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Complete input state for one computation pass. This is also the unit
/// persisted as a named plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanInput {
    pub subject: Subject,

    /// Unit the caller is viewing weights in; defaults to the subject's own unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_unit: Option<WeightUnit>,

    #[serde(default)]
    pub base_food: Option<RecipeLine>,

    #[serde(default)]
    pub recipe: Recipe,

    /// Flat treat energy in kcal; carries no nutrient breakdown.
    #[serde(default)]
    pub treat_kcal: f64,

    #[serde(default)]
    pub water_intake_ml: f64,

    #[serde(default)]
    pub meals: MealPlan,
}

impl PlanInput {
    pub fn display_unit(&self) -> WeightUnit {
        self.display_unit.unwrap_or(self.subject.weight_unit)
    }
}

/// Everything one engine pass produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanPreview {
    pub weight_kg: f64,
    pub energy: EnergyRequirement,
    pub totals: AggregateTotals,

    /// Total energy minus maintenance energy; positive means over target.
    pub energy_delta: f64,

    /// Energy left for the recipe once base food and treats are counted.
    pub homemade_budget_kcal: f64,

    /// `None` while no macronutrient energy has been entered.
    pub macro_shares: Option<MacroShares>,

    /// `None` when phosphorus is zero.
    pub calcium_phosphorus: Option<f64>,

    pub protein_density: f64,
    pub display_unit: WeightUnit,
    pub hydration: Hydration,
    pub per_meal: Vec<MealAllocation>,
    pub per_1000_kcal: NutrientProfile,
    pub aafco_shortfalls: Vec<AafcoShortfall>,
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_plan_parse_keeps_order_and_duplicates() {
        let meals = MealPlan::parse("breakfast, snack,, dinner ,snack");
        assert_eq!(meals.labels(), ["breakfast", "snack", "dinner", "snack"]);
    }

    #[test]
    fn test_display_unit_defaults_to_subject_unit() {
        let mut input = PlanInput::default();
        input.subject.weight_unit = WeightUnit::Lb;
        assert_eq!(input.display_unit(), WeightUnit::Lb);

        input.display_unit = Some(WeightUnit::Kg);
        assert_eq!(input.display_unit(), WeightUnit::Kg);
    }

    #[test]
    fn test_sparse_plan_json_fills_defaults() {
        let json = r#"{"subject": {"weight": 12.5, "activity": "puppy_low"}}"#;
        let input: PlanInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.subject.weight, 12.5);
        assert!(input.base_food.is_none());
        assert!(input.recipe.is_empty());
        assert_eq!(input.treat_kcal, 0.0);
    }
}
