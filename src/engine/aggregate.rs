use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::models::{NutrientProfile, Recipe, RecipeLine};

/// Energy and nutrients summed over a group of lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NutrientTotals {
    pub energy_kcal: f64,
    pub nutrients: NutrientProfile,
}

impl AddAssign<&NutrientTotals> for NutrientTotals {
    fn add_assign(&mut self, rhs: &NutrientTotals) {
        self.energy_kcal += rhs.energy_kcal;
        self.nutrients += &rhs.nutrients;
    }
}

impl Add for NutrientTotals {
    type Output = NutrientTotals;

    fn add(mut self, rhs: NutrientTotals) -> NutrientTotals {
        self += &rhs;
        self
    }
}

/// What one line contributes: its per-100 profile scaled by `quantity / 100`.
pub fn line_contribution(line: &RecipeLine) -> NutrientTotals {
    let scale = line.scale();
    NutrientTotals {
        energy_kcal: line.food.energy_per_100.max(0.0) * scale,
        nutrients: line.food.nutrients.scaled(scale),
    }
}

/// Sum the contributions of every line.
///
/// Order of lines does not matter, and splitting a line into two with
/// proportionally split quantity gives the same totals.
pub fn aggregate<'a, I>(lines: I) -> NutrientTotals
where
    I: IntoIterator<Item = &'a RecipeLine>,
{
    lines
        .into_iter()
        .fold(NutrientTotals::default(), |mut acc, line| {
            acc += &line_contribution(line);
            acc
        })
}

/// Daily totals across base food, recipe and treats.
///
/// Rebuilt from scratch on every pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateTotals {
    pub base_food: NutrientTotals,
    pub recipe: NutrientTotals,

    /// Treats add energy only.
    pub treat_kcal: f64,

    /// Recipe quantity, used to split the recipe across meals.
    pub recipe_quantity: f64,

    pub energy_kcal: f64,
    pub nutrients: NutrientProfile,
}

impl AggregateTotals {
    pub fn nutrient(&self, nutrient: crate::models::Nutrient) -> f64 {
        self.nutrients.get(nutrient)
    }
}

pub fn aggregate_plan(
    base_food: Option<&RecipeLine>,
    recipe: &Recipe,
    treat_kcal: f64,
) -> AggregateTotals {
    let base_food = aggregate(base_food);
    let recipe_totals = aggregate(&recipe.lines);
    let treat_kcal = if treat_kcal.is_finite() {
        treat_kcal.max(0.0)
    } else {
        0.0
    };

    let combined = base_food.clone() + recipe_totals.clone();

    AggregateTotals {
        base_food,
        recipe: recipe_totals,
        treat_kcal,
        recipe_quantity: recipe.total_quantity(),
        energy_kcal: combined.energy_kcal + treat_kcal,
        nutrients: combined.nutrients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodItem, Nutrient};

    fn chicken() -> FoodItem {
        FoodItem::new(
            "Chicken",
            165.0,
            NutrientProfile::new()
                .with(Nutrient::Protein, 31.0)
                .with(Nutrient::Fat, 3.6),
        )
    }

    #[test]
    fn test_line_contribution_scales_per_100() {
        let totals = line_contribution(&RecipeLine::new(chicken(), 200.0));
        assert!((totals.energy_kcal - 330.0).abs() < 1e-9);
        assert!((totals.nutrients.get(Nutrient::Protein) - 62.0).abs() < 1e-9);
        assert_eq!(totals.nutrients.get(Nutrient::Zinc), 0.0);
    }

    #[test]
    fn test_empty_plan_is_zero() {
        let totals = aggregate_plan(None, &Recipe::default(), 0.0);
        assert_eq!(totals.energy_kcal, 0.0);
        assert_eq!(totals.nutrient(Nutrient::Protein), 0.0);
    }

    #[test]
    fn test_treats_add_energy_only() {
        let recipe = Recipe::new(vec![RecipeLine::new(chicken(), 100.0)]);
        let totals = aggregate_plan(None, &recipe, 50.0);
        assert!((totals.energy_kcal - 215.0).abs() < 1e-9);
        assert!((totals.nutrient(Nutrient::Protein) - 31.0).abs() < 1e-9);
        assert_eq!(totals.treat_kcal, 50.0);
    }

    #[test]
    fn test_negative_treats_ignored() {
        let totals = aggregate_plan(None, &Recipe::default(), -80.0);
        assert_eq!(totals.energy_kcal, 0.0);
    }
}
