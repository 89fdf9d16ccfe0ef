use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Nutrients tracked per food, on top of energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Protein,
    Fat,
    Carbohydrate,
    Calcium,
    Phosphorus,
    Iron,
    Zinc,
    VitaminA,
    VitaminD,
    VitaminE,
}

impl Nutrient {
    pub const ALL: [Nutrient; 10] = [
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbohydrate,
        Nutrient::Calcium,
        Nutrient::Phosphorus,
        Nutrient::Iron,
        Nutrient::Zinc,
        Nutrient::VitaminA,
        Nutrient::VitaminD,
        Nutrient::VitaminE,
    ];

    /// Micronutrients whose complete absence is reported as missing data.
    pub const MICRONUTRIENTS: [Nutrient; 7] = [
        Nutrient::Calcium,
        Nutrient::Phosphorus,
        Nutrient::Iron,
        Nutrient::Zinc,
        Nutrient::VitaminA,
        Nutrient::VitaminD,
        Nutrient::VitaminE,
    ];

    /// Mass (or activity) unit the quantity is expressed in.
    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Protein | Nutrient::Fat | Nutrient::Carbohydrate => "g",
            Nutrient::Calcium
            | Nutrient::Phosphorus
            | Nutrient::Iron
            | Nutrient::Zinc
            | Nutrient::VitaminE => "mg",
            Nutrient::VitaminA | Nutrient::VitaminD => "IU",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Carbohydrate => "carbohydrate",
            Nutrient::Calcium => "calcium",
            Nutrient::Phosphorus => "phosphorus",
            Nutrient::Iron => "iron",
            Nutrient::Zinc => "zinc",
            Nutrient::VitaminA => "vitamin A",
            Nutrient::VitaminD => "vitamin D",
            Nutrient::VitaminE => "vitamin E",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Nutrient quantities keyed by nutrient.
///
/// Used both for per-100 profiles and for absolute totals. Absent keys read as zero,
/// and values are clamped to be finite and non-negative on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutrientProfile(BTreeMap<Nutrient, f64>);

impl NutrientProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, nutrient: Nutrient, amount: f64) -> Self {
        self.set(nutrient, amount);
        self
    }

    pub fn set(&mut self, nutrient: Nutrient, amount: f64) {
        self.0.insert(nutrient, sanitize(amount));
    }

    /// Quantity for `nutrient`, zero when absent.
    #[inline]
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.0.get(&nutrient).copied().unwrap_or(0.0)
    }

    /// Every value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self(
            self.0
                .iter()
                .map(|(&n, &v)| (n, sanitize(v * factor)))
                .collect(),
        )
    }

    /// True when at least one of `nutrients` has a positive quantity.
    pub fn any_present(&self, nutrients: &[Nutrient]) -> bool {
        nutrients.iter().any(|&n| self.get(n) > 0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        self.0.iter().map(|(&n, &v)| (n, v))
    }

    /// Re-applies the non-negative clamp, e.g. after deserializing raw input.
    pub fn sanitized(self) -> Self {
        Self(self.0.into_iter().map(|(n, v)| (n, sanitize(v))).collect())
    }
}

impl AddAssign<&NutrientProfile> for NutrientProfile {
    fn add_assign(&mut self, rhs: &NutrientProfile) {
        for (nutrient, amount) in rhs.iter() {
            *self.0.entry(nutrient).or_insert(0.0) += amount;
        }
    }
}

impl Add for NutrientProfile {
    type Output = NutrientProfile;

    fn add(mut self, rhs: NutrientProfile) -> NutrientProfile {
        self += &rhs;
        self
    }
}

impl FromIterator<(Nutrient, f64)> for NutrientProfile {
    fn from_iter<I: IntoIterator<Item = (Nutrient, f64)>>(iter: I) -> Self {
        let mut profile = NutrientProfile::new();
        for (nutrient, amount) in iter {
            profile.set(nutrient, amount);
        }
        profile
    }
}

#[inline]
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// A food with energy and nutrients expressed per 100 mass units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,

    #[serde(default)]
    pub energy_per_100: f64,

    #[serde(default)]
    pub nutrients: NutrientProfile,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, energy_per_100: f64, nutrients: NutrientProfile) -> Self {
        Self {
            name: name.into(),
            energy_per_100: sanitize(energy_per_100),
            nutrients: nutrients.sanitized(),
        }
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{}: {} kcal/100, P:{} F:{} C:{}",
            self.name,
            self.energy_per_100,
            self.nutrients.get(Nutrient::Protein),
            self.nutrients.get(Nutrient::Fat),
            self.nutrients.get(Nutrient::Carbohydrate),
        )
    }
}

/// A food and the quantity consumed, in the mass unit of the per-100 basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub food: FoodItem,

    #[serde(default)]
    pub quantity: f64,
}

impl RecipeLine {
    pub fn new(food: FoodItem, quantity: f64) -> Self {
        Self {
            food,
            quantity: sanitize(quantity),
        }
    }

    /// Factor applied to the per-100 profile.
    #[inline]
    pub fn scale(&self) -> f64 {
        sanitize(self.quantity) / 100.0
    }
}

/// A named list of ingredient lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub lines: Vec<RecipeLine>,
}

impl Recipe {
    pub fn new(lines: Vec<RecipeLine>) -> Self {
        Self { lines }
    }

    /// Total mass of all lines.
    pub fn total_quantity(&self) -> f64 {
        self.lines.iter().map(|l| sanitize(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
