//! Nutrition and energy calculation engine.
//!
//! A pure pipeline: normalize weight, estimate energy, aggregate nutrients,
//! derive ratios and targets, classify. Every call rebuilds all values from the
//! input snapshot; the engine holds only its injected configuration.

pub mod aafco;
pub mod aggregate;
pub mod constants;
pub mod diagnostics;
pub mod energy;
pub mod ratios;
pub mod units;

use serde::{Deserialize, Serialize};

use crate::models::{ActivityClass, Nutrient, PlanInput, PlanPreview, WeightUnit};

pub use aafco::{per_1000_kcal, AafcoShortfall};
pub use aggregate::{aggregate, aggregate_plan, AggregateTotals, NutrientTotals};
pub use constants::*;
pub use diagnostics::{classify, Diagnostic, DiagnosticInputs, DiagnosticKind, Severity};
pub use energy::{
    calories_to_grams, grams_to_calories, maintenance_energy, resting_energy, EnergyFactorTable,
    EnergyRequirement,
};
pub use ratios::{Hydration, MacroShares, MealAllocation};
pub use units::UnitConverter;

/// Lookup data injected into the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_kg_per_lb")]
    pub kg_per_lb: f64,

    /// Overrides layered on top of the built-in factor table.
    #[serde(default = "EnergyFactorTable::empty")]
    pub activity_factors: EnergyFactorTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kg_per_lb: default_kg_per_lb(),
            activity_factors: EnergyFactorTable::empty(),
        }
    }
}

fn default_kg_per_lb() -> f64 {
    KG_PER_LB
}

/// Shared by the interactive preview and the one-shot compute commands so both
/// report identical numbers.
#[derive(Debug, Clone, Default)]
pub struct NutritionEngine {
    units: UnitConverter,
    factors: EnergyFactorTable,
}

impl NutritionEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            units: UnitConverter::new(config.kg_per_lb),
            factors: EnergyFactorTable::default().merged(&config.activity_factors),
        }
    }

    pub fn units(&self) -> &UnitConverter {
        &self.units
    }

    pub fn factors(&self) -> &EnergyFactorTable {
        &self.factors
    }

    /// RER and MER for a weight given in any unit.
    pub fn energy_requirement(
        &self,
        weight: f64,
        unit: WeightUnit,
        activity: &ActivityClass,
    ) -> EnergyRequirement {
        let weight_kg = self.units.normalize(weight, unit);
        energy::estimate(weight_kg, activity, &self.factors)
    }

    /// Run the full pipeline over one input snapshot.
    pub fn preview(&self, input: &PlanInput) -> PlanPreview {
        let subject = &input.subject;
        let weight_kg = self.units.normalize(subject.weight, subject.weight_unit);
        let energy = energy::estimate(weight_kg, &subject.activity, &self.factors);

        let totals = aggregate_plan(input.base_food.as_ref(), &input.recipe, input.treat_kcal);

        let display_unit = input.display_unit();
        let display_weight = self
            .units
            .convert(subject.weight, subject.weight_unit, display_unit);

        let protein_density =
            ratios::protein_density(totals.nutrient(Nutrient::Protein), display_weight);
        let calcium_phosphorus = ratios::calcium_phosphorus_ratio(&totals.nutrients);
        let energy_delta = ratios::energy_delta(totals.energy_kcal, energy.mer);

        let diagnostics = classify(&DiagnosticInputs {
            protein_density,
            calcium_phosphorus,
            micronutrients_present: totals.nutrients.any_present(&Nutrient::MICRONUTRIENTS),
            energy_delta,
        });

        let per_1000 = per_1000_kcal(&totals.nutrients, totals.energy_kcal);
        let aafco_shortfalls = if totals.energy_kcal > 0.0 {
            aafco::evaluate(&per_1000, &AAFCO_ADULT_MINIMUMS)
        } else {
            Vec::new()
        };

        tracing::debug!(
            weight_kg,
            rer = energy.rer,
            mer = energy.mer,
            total_kcal = totals.energy_kcal,
            diagnostics = diagnostics.len(),
            "computed plan preview"
        );

        PlanPreview {
            weight_kg,
            energy,
            homemade_budget_kcal: ratios::homemade_budget(
                energy.mer,
                totals.base_food.energy_kcal,
                totals.treat_kcal,
            ),
            energy_delta,
            macro_shares: ratios::macro_shares(&totals.nutrients),
            calcium_phosphorus,
            protein_density,
            display_unit,
            hydration: ratios::hydration(weight_kg, input.water_intake_ml),
            per_meal: ratios::allocate_meals(&input.meals, &totals),
            per_1000_kcal: per_1000,
            aafco_shortfalls,
            diagnostics,
            totals,
        }
    }
}
