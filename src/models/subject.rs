use std::fmt;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

/// Body-weight units accepted from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Canonical unit for every energy formula.
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lb),
            other => Err(format!("unknown weight unit '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

/// Activity or life-stage class selecting the maintenance multiplier.
///
/// Text that matches no known class is preserved in `Other` so that lookups
/// can fall back to the default multiplier instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityClass {
    #[default]
    NeuteredAdult,
    IntactAdult,
    WeightLoss,
    WeightGain,
    PuppyLow,
    PuppyHigh,
    Other(String),
}

impl ActivityClass {
    pub const KNOWN: [ActivityClass; 6] = [
        ActivityClass::NeuteredAdult,
        ActivityClass::IntactAdult,
        ActivityClass::WeightLoss,
        ActivityClass::WeightGain,
        ActivityClass::PuppyLow,
        ActivityClass::PuppyHigh,
    ];

    /// Parse a class key, accepting `-`, `_` or spaces as separators.
    pub fn parse(input: &str) -> Self {
        let key = input.trim().to_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "neutered_adult" => ActivityClass::NeuteredAdult,
            "intact_adult" => ActivityClass::IntactAdult,
            "weight_loss" => ActivityClass::WeightLoss,
            "weight_gain" => ActivityClass::WeightGain,
            "puppy_low" => ActivityClass::PuppyLow,
            "puppy_high" => ActivityClass::PuppyHigh,
            _ => ActivityClass::Other(input.trim().to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            ActivityClass::NeuteredAdult => "neutered_adult",
            ActivityClass::IntactAdult => "intact_adult",
            ActivityClass::WeightLoss => "weight_loss",
            ActivityClass::WeightGain => "weight_gain",
            ActivityClass::PuppyLow => "puppy_low",
            ActivityClass::PuppyHigh => "puppy_high",
            ActivityClass::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ActivityClass::Other(_))
    }

    /// Closest known class by Jaro-Winkler similarity, for "did you mean" hints.
    pub fn closest_known(input: &str) -> Option<ActivityClass> {
        let needle = input.trim().to_lowercase().replace(['-', ' '], "_");
        ActivityClass::KNOWN
            .iter()
            .map(|class| (class, jaro_winkler(&needle, class.key())))
            .filter(|(_, score)| *score > 0.7)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(class, _)| class.clone())
    }
}

impl From<String> for ActivityClass {
    fn from(value: String) -> Self {
        ActivityClass::parse(&value)
    }
}

impl From<ActivityClass> for String {
    fn from(value: ActivityClass) -> Self {
        value.key().to_string()
    }
}

impl fmt::Display for ActivityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The animal being fed. Only `weight`, `weight_unit` and `activity` feed the math;
/// the remaining fields travel with saved plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub weight: f64,

    #[serde(default)]
    pub weight_unit: WeightUnit,

    #[serde(default)]
    pub target_weight: Option<f64>,

    #[serde(default)]
    pub age: f64,

    #[serde(default)]
    pub sex: Sex,

    #[serde(default)]
    pub neutered: bool,

    #[serde(default)]
    pub activity: ActivityClass,
}

impl Default for Subject {
    fn default() -> Self {
        Self {
            weight: 0.0,
            weight_unit: WeightUnit::Kg,
            target_weight: None,
            age: 0.0,
            sex: Sex::default(),
            neutered: true,
            activity: ActivityClass::default(),
        }
    }
}
