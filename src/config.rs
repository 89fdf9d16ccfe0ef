//! Configuration file support.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/dog-meal-planner/config.toml`
//! unless a path is given explicitly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::{DEFAULT_MEAL_LABELS, EngineConfig};
use crate::error::{PlannerError, Result};
use crate::models::MealPlan;

const APP_DIR: &str = "dog-meal-planner";

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub lookup: LookupConfig,

    #[serde(default)]
    pub meals: MealsConfig,
}

/// Where plan and recipe snapshots are stored
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl DataConfig {
    pub fn plans_path(&self) -> PathBuf {
        self.data_dir.join("plans.json")
    }

    pub fn recipes_path(&self) -> PathBuf {
        self.data_dir.join("recipes.json")
    }
}

/// Ingredient database access
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_lookup_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_lookup_base_url(),
            api_key: None,
        }
    }
}

impl LookupConfig {
    /// Resolve the API key: explicit flag, then `USDA_API_KEY`, then the config file.
    pub fn resolve_api_key(&self, flag: Option<&str>) -> Result<String> {
        flag.map(str::to_string)
            .or_else(|| std::env::var("USDA_API_KEY").ok())
            .or_else(|| self.api_key.clone())
            .filter(|key| !key.trim().is_empty())
            .ok_or(PlannerError::MissingCredential)
    }
}

/// Meal labels applied when a plan names none
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MealsConfig {
    #[serde(default = "default_meal_labels")]
    pub default_labels: Vec<String>,
}

impl Default for MealsConfig {
    fn default() -> Self {
        Self {
            default_labels: default_meal_labels(),
        }
    }
}

impl MealsConfig {
    pub fn default_plan(&self) -> MealPlan {
        MealPlan::new(self.default_labels.iter().cloned())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_lookup_base_url() -> String {
    "https://api.nal.usda.gov/fdc/v1".to_string()
}

fn default_meal_labels() -> Vec<String> {
    DEFAULT_MEAL_LABELS.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load configuration from `path`, or from the standard location when `None`.
    ///
    /// A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path(),
        };
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        if !(config.engine.kg_per_lb.is_finite() && config.engine.kg_per_lb > 0.0) {
            return Err(PlannerError::Config(format!(
                "engine.kg_per_lb must be positive, got {}",
                config.engine.kg_per_lb
            )));
        }
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }
}
