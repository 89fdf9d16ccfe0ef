use crate::models::{ActivityClass, Nutrient};

/// Coefficient of the allometric resting energy model (kcal/day).
pub const RER_COEFFICIENT: f64 = 70.0;

/// Exponent applied to body weight in kg.
pub const RER_EXPONENT: f64 = 0.75;

/// Multiplier used when the activity class is missing from the factor table.
pub const DEFAULT_ACTIVITY_FACTOR: f64 = 1.6;

/// Kilograms per pound.
pub const KG_PER_LB: f64 = 0.45359237;

/// Atwater factors, kcal per gram.
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;
pub const KCAL_PER_G_CARBOHYDRATE: f64 = 4.0;

/// Daily water target per kg of body weight (ml).
pub const HYDRATION_ML_PER_KG: f64 = 60.0;

/// Upper bound of the hydration progress gauge (percent).
pub const HYDRATION_PROGRESS_CAP: f64 = 140.0;

/// Mass basis that food profiles are quoted on.
pub const PER_100_BASIS: f64 = 100.0;

/// Energy basis for nutrient-density comparisons.
pub const PER_1000_KCAL: f64 = 1000.0;

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostic thresholds
// ─────────────────────────────────────────────────────────────────────────────

/// Protein per unit body weight at or above which intake is adequate.
pub const PROTEIN_DENSITY_MIN: f64 = 2.5;

/// Recommended calcium:phosphorus band, inclusive.
pub const CA_P_RATIO_MIN: f64 = 1.1;
pub const CA_P_RATIO_MAX: f64 = 1.6;

/// Absolute energy delta (kcal) above which intake is flagged.
pub const ENERGY_DELTA_LIMIT: f64 = 200.0;

/// Maintenance multipliers by activity class.
pub const DEFAULT_ACTIVITY_FACTORS: [(ActivityClass, f64); 6] = [
    (ActivityClass::NeuteredAdult, 1.6),
    (ActivityClass::IntactAdult, 1.8),
    (ActivityClass::WeightLoss, 1.1),
    (ActivityClass::WeightGain, 1.8),
    (ActivityClass::PuppyLow, 2.0),
    (ActivityClass::PuppyHigh, 3.0),
];

/// Adult-maintenance minimums per 1000 kcal.
pub const AAFCO_ADULT_MINIMUMS: [(Nutrient, f64); 9] = [
    (Nutrient::Protein, 45.0),
    (Nutrient::Fat, 13.0),
    (Nutrient::Calcium, 1250.0),
    (Nutrient::Phosphorus, 1000.0),
    (Nutrient::Iron, 7.5),
    (Nutrient::Zinc, 15.0),
    (Nutrient::VitaminA, 1250.0),
    (Nutrient::VitaminD, 125.0),
    (Nutrient::VitaminE, 12.5),
];

/// Meal labels used when a plan names none.
pub const DEFAULT_MEAL_LABELS: [&str; 2] = ["breakfast", "dinner"];
