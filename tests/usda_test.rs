use std::collections::HashMap;

use dog_meal_planner_rs::engine::NutritionEngine;
use dog_meal_planner_rs::error::{PlannerError, Result};
use dog_meal_planner_rs::lookup::{food_from_usda, IngredientLookup, UsdaFood};
use dog_meal_planner_rs::models::{FoodItem, Nutrient, PlanInput, Recipe, RecipeLine, Subject};

const SAMPLE: &str = r#"{
    "fdcId": 171077,
    "description": "Chicken, broilers or fryers, breast, meat only, cooked, roasted",
    "foodNutrients": [
        {"nutrient": {"name": "Protein", "unitName": "g"}, "amount": 31.02},
        {"nutrient": {"name": "Total lipid (fat)", "unitName": "g"}, "amount": 3.57},
        {"nutrient": {"name": "Carbohydrate, by difference", "unitName": "g"}, "amount": 0.0},
        {"nutrient": {"name": "Energy", "unitName": "kcal"}, "amount": 165.0},
        {"nutrient": {"name": "Energy", "unitName": "kJ"}, "amount": 690.0},
        {"nutrient": {"name": "Calcium, Ca", "unitName": "mg"}, "amount": 15.0},
        {"nutrient": {"name": "Phosphorus, P", "unitName": "mg"}, "amount": 228.0},
        {"nutrient": {"name": "Iron, Fe", "unitName": "mg"}, "amount": 1.04},
        {"nutrient": {"name": "Zinc, Zn", "unitName": "mg"}, "amount": 1.0},
        {"nutrient": {"name": "Water", "unitName": "g"}, "amount": 65.26},
        {"nutrient": {"name": "Vitamin B-12", "unitName": "µg"}}
    ]
}"#;

#[test]
fn test_parse_food_nutrients() {
    let food: UsdaFood = serde_json::from_str(SAMPLE).unwrap();
    let item = food_from_usda(&food, None);

    assert_eq!(
        item.name,
        "Chicken, broilers or fryers, breast, meat only, cooked, roasted"
    );
    assert_eq!(item.energy_per_100, 165.0);
    assert_eq!(item.nutrients.get(Nutrient::Protein), 31.02);
    assert_eq!(item.nutrients.get(Nutrient::Fat), 3.57);
    assert_eq!(item.nutrients.get(Nutrient::Phosphorus), 228.0);
    // Not reported by this record.
    assert_eq!(item.nutrients.get(Nutrient::VitaminA), 0.0);
}

#[test]
fn test_name_override() {
    let food: UsdaFood = serde_json::from_str(SAMPLE).unwrap();
    assert_eq!(food_from_usda(&food, Some("Roast chicken")).name, "Roast chicken");
    // Blank overrides are ignored.
    assert!(food_from_usda(&food, Some("  ")).name.starts_with("Chicken"));
}

/// In-memory stand-in for the remote database.
struct FixedLookup {
    foods: HashMap<u64, UsdaFood>,
}

impl IngredientLookup for FixedLookup {
    fn fetch_food(&self, id: u64, name_override: Option<&str>) -> Result<FoodItem> {
        self.foods
            .get(&id)
            .map(|f| food_from_usda(f, name_override))
            .ok_or_else(|| PlannerError::Lookup {
                status: 404,
                message: "food not found".to_string(),
            })
    }
}

#[test]
fn test_looked_up_food_is_ordinary_food() {
    let food: UsdaFood = serde_json::from_str(SAMPLE).unwrap();
    let lookup = FixedLookup {
        foods: HashMap::from([(food.fdc_id, food)]),
    };

    let chicken = lookup.fetch_food(171077, None).unwrap();
    let input = PlanInput {
        subject: Subject {
            weight: 10.0,
            ..Default::default()
        },
        recipe: Recipe::new(vec![RecipeLine::new(chicken, 200.0)]),
        ..Default::default()
    };
    let preview = NutritionEngine::default().preview(&input);
    assert!((preview.totals.energy_kcal - 330.0).abs() < 1e-9);
    assert!(preview.calcium_phosphorus.is_some());

    let missing = lookup.fetch_food(1, None);
    assert!(matches!(missing, Err(PlannerError::Lookup { status: 404, .. })));
}
