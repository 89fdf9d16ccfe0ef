use dialoguer::{Confirm, Input, Select};

use crate::error::{PlannerError, Result};
use crate::models::{
    ActivityClass, FoodItem, MealPlan, Nutrient, NutrientProfile, PlanInput, Recipe, RecipeLine,
    Sex, Subject, WeightUnit,
};

/// Prompt for a non-negative number.
pub fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(format!("{}", default))
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| PlannerError::InvalidInput(format!("'{}' is not a number", input)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(PlannerError::InvalidInput(format!(
            "{} must be a non-negative number",
            prompt
        )));
    }

    Ok(value)
}

/// Prompt for an optional number; empty input means none.
pub fn prompt_optional_number(prompt: &str) -> Result<Option<f64>> {
    let input: String = Input::new()
        .with_prompt(format!("{} (Enter to skip)", prompt))
        .allow_empty(true)
        .interact_text()?;

    parse_optional_positive(prompt, &input)
}

/// Empty input is none; anything else must be a finite number above zero.
fn parse_optional_positive(prompt: &str, input: &str) -> Result<Option<f64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| PlannerError::InvalidInput(format!("'{}' is not a number", trimmed)))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(PlannerError::InvalidInput(format!(
            "{} must be a positive number",
            prompt
        )));
    }

    Ok(Some(value))
}

/// Simple yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    let result = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?;
    Ok(result)
}

pub fn prompt_subject() -> Result<Subject> {
    let units = [WeightUnit::Kg, WeightUnit::Lb];
    let unit_idx = Select::new()
        .with_prompt("Weight unit")
        .items(&units.iter().map(|u| u.symbol()).collect::<Vec<_>>())
        .default(0)
        .interact()?;
    let weight_unit = units[unit_idx];

    let weight = prompt_number(&format!("Current weight ({})", weight_unit), 10.0)?;
    let target_weight = prompt_optional_number(&format!("Target weight ({})", weight_unit))?;
    let age = prompt_number("Age (years)", 3.0)?;

    let sexes = [Sex::Male, Sex::Female];
    let sex_idx = Select::new()
        .with_prompt("Sex")
        .items(&["male", "female"])
        .default(0)
        .interact()?;

    let neutered = prompt_yes_no("Neutered/spayed?", true)?;

    let classes: Vec<String> = ActivityClass::KNOWN.iter().map(|c| c.to_string()).collect();
    let default_class = if neutered { 0 } else { 1 };
    let class_idx = Select::new()
        .with_prompt("Activity class")
        .items(&classes)
        .default(default_class)
        .interact()?;

    Ok(Subject {
        weight,
        weight_unit,
        target_weight,
        age,
        sex: sexes[sex_idx],
        neutered,
        activity: ActivityClass::KNOWN[class_idx].clone(),
    })
}

/// Prompt for a food's per-100 profile.
///
/// Only the macronutrients and calcium/phosphorus are asked; anything else can be
/// filled in through an ingredient lookup.
pub fn prompt_food(default_name: &str) -> Result<FoodItem> {
    let name: String = Input::new()
        .with_prompt("Food name")
        .default(default_name.to_string())
        .interact_text()?;

    let energy = prompt_number("Energy per 100 g (kcal)", 0.0)?;

    let mut nutrients = NutrientProfile::new();
    for nutrient in [
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbohydrate,
        Nutrient::Calcium,
        Nutrient::Phosphorus,
    ] {
        let prompt = format!("{} per 100 g ({})", capitalize(nutrient.label()), nutrient.unit());
        nutrients.set(nutrient, prompt_number(&prompt, 0.0)?);
    }

    Ok(FoodItem::new(name.trim(), energy, nutrients))
}

/// Prompt for recipe ingredients until the user stops.
pub fn prompt_recipe() -> Result<Recipe> {
    let mut lines = Vec::new();

    while prompt_yes_no("Add a recipe ingredient?", lines.is_empty())? {
        let food = prompt_food("Ingredient")?;
        let quantity = prompt_number(&format!("Grams of {}", food.name), 100.0)?;
        lines.push(RecipeLine::new(food, quantity));
    }

    Ok(Recipe::new(lines))
}

/// Walk the user through a complete plan input.
pub fn collect_plan_input(default_meals: &MealPlan) -> Result<PlanInput> {
    let subject = prompt_subject()?;

    let base_food = if prompt_yes_no("Include a base food (e.g. kibble)?", true)? {
        let food = prompt_food("Kibble")?;
        let quantity = prompt_number(&format!("Grams of {} per day", food.name), 100.0)?;
        Some(RecipeLine::new(food, quantity))
    } else {
        None
    };

    let recipe = prompt_recipe()?;
    let treat_kcal = prompt_number("Treats per day (kcal)", 0.0)?;
    let water_intake_ml = prompt_number("Water intake per day (ml)", 0.0)?;

    let meals_input: String = Input::new()
        .with_prompt("Meals (comma-separated)")
        .default(default_meals.labels().join(", "))
        .interact_text()?;
    let meals = MealPlan::parse(&meals_input);

    Ok(PlanInput {
        subject,
        display_unit: None,
        base_food,
        recipe,
        treat_kcal,
        water_intake_ml,
        meals,
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("vitamin A"), "Vitamin A");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_optional_positive_rejects_invalid() {
        assert_eq!(parse_optional_positive("Target", "  ").unwrap(), None);
        assert_eq!(parse_optional_positive("Target", " 12.5 ").unwrap(), Some(12.5));
        for bad in ["nan", "inf", "-inf", "-5", "0", "abc"] {
            assert!(
                matches!(
                    parse_optional_positive("Target", bad),
                    Err(PlannerError::InvalidInput(_))
                ),
                "accepted {}",
                bad
            );
        }
    }
}
