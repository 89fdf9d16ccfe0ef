use serde::{Deserialize, Serialize};

use crate::engine::constants::KG_PER_LB;
use crate::models::WeightUnit;

/// Converts body weight between kilograms and pounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitConverter {
    kg_per_lb: f64,
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self {
            kg_per_lb: KG_PER_LB,
        }
    }
}

impl UnitConverter {
    /// A converter with a custom ratio. Non-positive or non-finite ratios fall back
    /// to the standard pound.
    pub fn new(kg_per_lb: f64) -> Self {
        if kg_per_lb.is_finite() && kg_per_lb > 0.0 {
            Self { kg_per_lb }
        } else {
            Self::default()
        }
    }

    pub fn kg_per_lb(&self) -> f64 {
        self.kg_per_lb
    }

    /// Convert `weight` from one unit to another.
    ///
    /// Same-unit conversion returns the input untouched.
    pub fn convert(&self, weight: f64, from: WeightUnit, to: WeightUnit) -> f64 {
        match (from, to) {
            (WeightUnit::Lb, WeightUnit::Kg) => weight * self.kg_per_lb,
            (WeightUnit::Kg, WeightUnit::Lb) => weight / self.kg_per_lb,
            _ => weight,
        }
    }

    /// Weight in the canonical unit (kg).
    pub fn normalize(&self, weight: f64, from: WeightUnit) -> f64 {
        self.convert(weight, from, WeightUnit::Kg)
    }
}
