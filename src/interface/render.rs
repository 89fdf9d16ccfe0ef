use std::path::Path;

use serde::Serialize;

use crate::engine::{EnergyRequirement, Severity};
use crate::error::Result;
use crate::models::{Nutrient, PlanPreview, WeightUnit};
use crate::state::Stored;

/// Display a plan preview as formatted text.
pub fn display_preview(preview: &PlanPreview) {
    let totals = &preview.totals;

    println!();
    println!("=== Daily Energy ===");
    println!();
    println!("Weight:            {:.2} kg", preview.weight_kg);
    println!(
        "RER / MER:         {:.0} / {:.0} kcal (factor {:.1})",
        preview.energy.rer, preview.energy.mer, preview.energy.factor
    );
    println!(
        "Intake:            {:.0} kcal (base {:.0}, recipe {:.0}, treats {:.0})",
        totals.energy_kcal,
        totals.base_food.energy_kcal,
        totals.recipe.energy_kcal,
        totals.treat_kcal
    );
    let sign = if preview.energy_delta >= 0.0 { "+" } else { "" };
    println!("Delta vs target:   {}{:.0} kcal", sign, preview.energy_delta);
    println!("Recipe budget:     {:.0} kcal", preview.homemade_budget_kcal);

    println!();
    println!("=== Ratios & Targets ===");
    println!();
    match &preview.macro_shares {
        Some(shares) => println!(
            "Macro split:       P {:.1}% | F {:.1}% | C {:.1}%",
            shares.protein, shares.fat, shares.carbohydrate
        ),
        None => println!("Macro split:       awaiting data"),
    }
    match preview.calcium_phosphorus {
        Some(ratio) => println!("Ca:P ratio:        {:.2}", ratio),
        None => println!("Ca:P ratio:        unavailable"),
    }
    println!(
        "Protein density:   {:.2} g/{}",
        preview.protein_density, preview.display_unit
    );
    println!(
        "Hydration:         {:.0} / {:.0} ml ({:.0}%)",
        preview.hydration.intake_ml, preview.hydration.target_ml, preview.hydration.progress_pct
    );

    println!();
    println!("--- Nutrient Totals ---");
    for nutrient in Nutrient::ALL {
        println!(
            "  {:<14} {:>10.2} {}",
            nutrient.label(),
            totals.nutrients.get(nutrient),
            nutrient.unit()
        );
    }

    if !preview.per_meal.is_empty() {
        println!();
        println!("--- Per Meal ---");
        let width = preview
            .per_meal
            .iter()
            .map(|m| m.label.len())
            .max()
            .unwrap_or(10);
        for meal in &preview.per_meal {
            println!(
                "  {:<width$} {:>6.0} kcal | recipe {:>6.1} g | protein {:>6.1} g",
                meal.label,
                meal.energy_kcal,
                meal.recipe_quantity,
                meal.nutrients.get(Nutrient::Protein),
                width = width
            );
        }
    }

    if !preview.diagnostics.is_empty() {
        println!();
        println!("--- Diagnostics ---");
        for diag in &preview.diagnostics {
            let marker = match diag.severity {
                Severity::Info => "  ok ",
                Severity::Warning => "  !! ",
            };
            println!("{}{}", marker, diag.message);
        }
    }

    if !preview.aafco_shortfalls.is_empty() {
        println!();
        println!("--- AAFCO (per 1000 kcal) ---");
        for shortfall in &preview.aafco_shortfalls {
            println!("  !! {}", shortfall.message);
        }
    }

    println!();
}

/// Display resting and maintenance energy for a single weight.
pub fn display_energy(weight: f64, unit: WeightUnit, energy: &EnergyRequirement) {
    println!(
        "{} {}: RER {:.2} kcal, MER {:.2} kcal (factor {:.1})",
        weight, unit, energy.rer, energy.mer, energy.factor
    );
}

/// Display stored snapshots as a list.
pub fn display_snapshots<T>(snapshots: &[Stored<T>], title: &str) {
    if snapshots.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, snapshots.len());
    println!();

    for s in snapshots {
        println!(
            "  {}  {}  (updated {})",
            s.id,
            s.name,
            s.updated_at.format("%Y-%m-%d %H:%M")
        );
    }

    println!();
}

/// Pretty JSON for machine consumers.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Debug, Serialize)]
struct MealRow<'a> {
    meal: &'a str,
    energy_kcal: f64,
    recipe_grams: f64,
    protein_g: f64,
    fat_g: f64,
    carbohydrate_g: f64,
    calcium_mg: f64,
    phosphorus_mg: f64,
}

/// Write the per-meal allocation as CSV.
pub fn write_meals_csv(preview: &PlanPreview, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    for meal in &preview.per_meal {
        writer.serialize(MealRow {
            meal: &meal.label,
            energy_kcal: meal.energy_kcal,
            recipe_grams: meal.recipe_quantity,
            protein_g: meal.nutrients.get(Nutrient::Protein),
            fat_g: meal.nutrients.get(Nutrient::Fat),
            carbohydrate_g: meal.nutrients.get(Nutrient::Carbohydrate),
            calcium_mg: meal.nutrients.get(Nutrient::Calcium),
            phosphorus_mg: meal.nutrients.get(Nutrient::Phosphorus),
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NutritionEngine;
    use crate::models::{FoodItem, MealPlan, NutrientProfile, PlanInput, Recipe, RecipeLine};

    #[test]
    fn test_meals_csv_has_row_per_label() {
        let food = FoodItem::new(
            "Turkey",
            150.0,
            NutrientProfile::new().with(Nutrient::Protein, 20.0),
        );
        let input = PlanInput {
            recipe: Recipe::new(vec![RecipeLine::new(food, 300.0)]),
            meals: MealPlan::new(["am", "noon", "pm"]),
            ..Default::default()
        };
        let preview = NutritionEngine::default().preview(&input);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meals.csv");
        write_meals_csv(&preview, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("meal,energy_kcal"));
        assert!(lines[1].starts_with("am,150"));
    }
}
