pub mod food;
pub mod plan;
pub mod subject;

pub use food::{FoodItem, Nutrient, NutrientProfile, Recipe, RecipeLine};
pub use plan::{MealPlan, PlanInput, PlanPreview};
pub use subject::{ActivityClass, Sex, Subject, WeightUnit};
