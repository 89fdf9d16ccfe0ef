pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod state;

pub use engine::{EngineConfig, NutritionEngine};
pub use error::{PlannerError, Result};
pub use models::{FoodItem, MealPlan, NutrientProfile, PlanInput, PlanPreview, RecipeLine};
