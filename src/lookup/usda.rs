//! USDA FoodData Central client.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{PlannerError, Result};
use crate::lookup::IngredientLookup;
use crate::models::{FoodItem, Nutrient, NutrientProfile};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// FoodData Central nutrient names (lowercased) mapped onto tracked nutrients.
const NUTRIENT_NAMES: [(&str, Nutrient); 10] = [
    ("protein", Nutrient::Protein),
    ("total lipid (fat)", Nutrient::Fat),
    ("carbohydrate, by difference", Nutrient::Carbohydrate),
    ("calcium, ca", Nutrient::Calcium),
    ("phosphorus, p", Nutrient::Phosphorus),
    ("iron, fe", Nutrient::Iron),
    ("zinc, zn", Nutrient::Zinc),
    ("vitamin a, iu", Nutrient::VitaminA),
    ("vitamin d (d2 + d3)", Nutrient::VitaminD),
    ("vitamin e (alpha-tocopherol)", Nutrient::VitaminE),
];

const ENERGY_NAME: &str = "energy";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdaFood {
    pub fdc_id: u64,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub food_nutrients: Vec<UsdaFoodNutrient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsdaFoodNutrient {
    pub nutrient: UsdaNutrient,

    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsdaNutrient {
    pub name: String,

    #[serde(default, rename = "unitName")]
    pub unit_name: Option<String>,
}

impl UsdaFood {
    /// Amounts keyed by lowercased nutrient name. Later duplicates win, except
    /// that kcal entries are preferred over kJ for energy.
    fn amounts(&self) -> HashMap<String, f64> {
        let mut map = HashMap::new();
        for entry in &self.food_nutrients {
            let Some(amount) = entry.amount else { continue };
            let name = entry.nutrient.name.trim().to_lowercase();
            if name == ENERGY_NAME {
                let is_kj = entry
                    .nutrient
                    .unit_name
                    .as_deref()
                    .is_some_and(|u| u.eq_ignore_ascii_case("kj"));
                if is_kj {
                    map.entry(name).or_insert(amount / 4.184);
                    continue;
                }
            }
            map.insert(name, amount);
        }
        map
    }
}

/// Convert a FoodData Central record into a food. Missing nutrients read as zero.
pub fn food_from_usda(food: &UsdaFood, name_override: Option<&str>) -> FoodItem {
    let amounts = food.amounts();
    let nutrients: NutrientProfile = NUTRIENT_NAMES
        .iter()
        .map(|&(name, nutrient)| (nutrient, amounts.get(name).copied().unwrap_or(0.0)))
        .collect();

    let name = name_override
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .or_else(|| food.description.clone())
        .unwrap_or_else(|| "unknown".to_string());

    FoodItem::new(
        name,
        amounts.get(ENERGY_NAME).copied().unwrap_or(0.0),
        nutrients,
    )
}

pub struct UsdaClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl UsdaClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Fetch one food record by FoodData Central id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the body is not a food record.
    pub fn fetch(&self, fdc_id: u64) -> Result<UsdaFood> {
        let url = format!("{}/food/{}", self.base_url, fdc_id);
        tracing::debug!(fdc_id, "fetching food from FoodData Central");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()?;

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            tracing::warn!(fdc_id, status = status.as_u16(), "food lookup failed");
            return Err(PlannerError::Lookup {
                status: status.as_u16(),
                message: describe_failure(status.as_u16(), &text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

impl IngredientLookup for UsdaClient {
    fn fetch_food(&self, id: u64, name_override: Option<&str>) -> Result<FoodItem> {
        let food = self.fetch(id)?;
        Ok(food_from_usda(&food, name_override))
    }
}

fn describe_failure(status: u16, body: &str) -> String {
    let detail = body.trim();
    let reason = match status {
        401 | 403 => "invalid or missing API key",
        404 => "food not found",
        429 => "rate limited",
        _ => "request rejected",
    };
    if detail.is_empty() {
        reason.to_string()
    } else {
        format!("{}: {}", reason, detail)
    }
}
