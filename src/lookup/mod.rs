//! Ingredient lookup against an external food database.

pub mod usda;

use crate::error::Result;
use crate::models::FoodItem;

pub use usda::{UsdaClient, UsdaFood, food_from_usda};

/// Anything that can resolve an external database id into a food.
pub trait IngredientLookup {
    fn fetch_food(&self, id: u64, name_override: Option<&str>) -> Result<FoodItem>;
}
