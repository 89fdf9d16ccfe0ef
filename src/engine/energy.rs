use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::constants::{
    DEFAULT_ACTIVITY_FACTOR, DEFAULT_ACTIVITY_FACTORS, PER_100_BASIS, RER_COEFFICIENT,
    RER_EXPONENT,
};
use crate::models::ActivityClass;

/// Maintenance multiplier per activity class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyFactorTable(BTreeMap<ActivityClass, f64>);

impl Default for EnergyFactorTable {
    fn default() -> Self {
        Self(DEFAULT_ACTIVITY_FACTORS.into_iter().collect())
    }
}

impl EnergyFactorTable {
    /// An empty table; every lookup falls back to the default multiplier.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, class: ActivityClass, factor: f64) -> Self {
        self.0.insert(class, factor);
        self
    }

    /// Multiplier for `class`.
    ///
    /// Missing entries and non-positive factors resolve to `DEFAULT_ACTIVITY_FACTOR`.
    pub fn lookup(&self, class: &ActivityClass) -> f64 {
        match self.0.get(class) {
            Some(&factor) if factor.is_finite() && factor > 0.0 => factor,
            _ => {
                tracing::debug!(
                    "No activity factor for '{}', using {}",
                    class,
                    DEFAULT_ACTIVITY_FACTOR
                );
                DEFAULT_ACTIVITY_FACTOR
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActivityClass, f64)> {
        self.0.iter().map(|(class, &factor)| (class, factor))
    }

    /// Overlay `other` on top of this table.
    pub fn merged(mut self, other: &EnergyFactorTable) -> Self {
        for (class, factor) in other.iter() {
            self.0.insert(class.clone(), factor);
        }
        self
    }
}

/// Resting and maintenance energy for one subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EnergyRequirement {
    /// Resting energy requirement (kcal/day).
    pub rer: f64,
    pub factor: f64,
    /// Maintenance energy requirement (kcal/day).
    pub mer: f64,
}

/// RER = 70 * kg^0.75, zero for non-positive weight.
pub fn resting_energy(weight_kg: f64) -> f64 {
    if weight_kg.is_finite() && weight_kg > 0.0 {
        RER_COEFFICIENT * weight_kg.powf(RER_EXPONENT)
    } else {
        0.0
    }
}

#[inline]
pub fn maintenance_energy(rer: f64, factor: f64) -> f64 {
    rer * factor
}

pub fn estimate(weight_kg: f64, class: &ActivityClass, table: &EnergyFactorTable) -> EnergyRequirement {
    let rer = resting_energy(weight_kg);
    let factor = table.lookup(class);
    EnergyRequirement {
        rer,
        factor,
        mer: maintenance_energy(rer, factor),
    }
}

/// Grams of a food needed to supply `desired_kcal`. `None` for foods without energy.
pub fn calories_to_grams(desired_kcal: f64, kcal_per_100: f64) -> Option<f64> {
    if kcal_per_100 > 0.0 {
        Some(desired_kcal / kcal_per_100 * PER_100_BASIS)
    } else {
        None
    }
}

/// Energy supplied by `grams` of a food. Negative quantities count as zero.
pub fn grams_to_calories(grams: f64, kcal_per_100: f64) -> f64 {
    grams.max(0.0) / PER_100_BASIS * kcal_per_100
}
