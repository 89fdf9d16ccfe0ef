use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::models::WeightUnit;

/// Dog meal planner: previews daily energy and nutrient intake against targets.
#[derive(Parser, Debug)]
#[command(name = "dog-meal-planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding saved plans and recipes (overrides the config file).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactively enter a plan and preview it.
    New {
        /// Save the entered plan under this name.
        #[arg(long)]
        save: Option<String>,
    },

    /// Preview a plan from a JSON file or a saved plan.
    Preview {
        /// Plan input JSON file.
        #[arg(long, conflicts_with = "plan", required_unless_present = "plan")]
        input: Option<PathBuf>,

        /// Id of a saved plan.
        #[arg(long)]
        plan: Option<Uuid>,

        /// Unit to report protein density in (defaults to the subject's unit).
        #[arg(long)]
        display_unit: Option<WeightUnit>,

        /// Print the preview as JSON instead of tables.
        #[arg(long)]
        json: bool,

        /// Also write the per-meal allocation to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Manage saved plans.
    #[command(subcommand)]
    Plan(StoreCommand),

    /// Manage saved recipes.
    #[command(subcommand)]
    Recipe(StoreCommand),

    /// Fetch an ingredient from USDA FoodData Central.
    Lookup {
        /// FoodData Central id.
        fdc_id: u64,

        /// Name to use instead of the database description.
        #[arg(long)]
        name: Option<String>,

        /// API key (falls back to USDA_API_KEY, then the config file).
        #[arg(long)]
        api_key: Option<String>,

        /// Append the ingredient to this saved recipe.
        #[arg(long, requires = "grams")]
        add_to: Option<Uuid>,

        /// Grams of the ingredient when appending to a recipe.
        #[arg(long)]
        grams: Option<f64>,
    },

    /// Resting and maintenance energy for a weight.
    Rer {
        weight: f64,

        #[arg(long, default_value = "kg")]
        unit: WeightUnit,

        #[arg(long, default_value = "neutered_adult")]
        activity: String,
    },

    /// Grams of a food needed to supply an amount of energy.
    KcalToGrams {
        /// Desired energy (kcal).
        kcal: f64,

        /// Energy density of the food (kcal per 100 g).
        kcal_per_100: f64,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::New { save: None }
    }
}

/// Create/read/list/update/delete for a snapshot store.
#[derive(Subcommand, Debug)]
pub enum StoreCommand {
    /// Save a JSON file under a name.
    Save {
        #[arg(long)]
        name: String,

        file: PathBuf,
    },

    /// List saved entries.
    List,

    /// Print one entry as JSON.
    Show { id: Uuid },

    /// Find entries by approximate name.
    Find { query: String },

    /// Replace an entry's contents from a JSON file.
    Update {
        id: Uuid,

        file: PathBuf,

        /// Rename the entry.
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete an entry.
    Delete { id: Uuid },
}
