use std::fs;
use std::path::Path;

use clap::Parser;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use dog_meal_planner_rs::cli::{Cli, Command, StoreCommand};
use dog_meal_planner_rs::config::Config;
use dog_meal_planner_rs::engine::{calories_to_grams, NutritionEngine};
use dog_meal_planner_rs::error::{PlannerError, Result};
use dog_meal_planner_rs::interface::{
    collect_plan_input, display_energy, display_preview, display_snapshots, print_json,
    prompt_yes_no, write_meals_csv,
};
use dog_meal_planner_rs::logging;
use dog_meal_planner_rs::lookup::{IngredientLookup, UsdaClient};
use dog_meal_planner_rs::models::{ActivityClass, PlanInput, Recipe, RecipeLine, WeightUnit};
use dog_meal_planner_rs::state::{plan_store, recipe_store, SnapshotStore};

fn main() {
    let cli = Cli::parse();
    logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = dir;
    }
    let engine = NutritionEngine::new(&config.engine);
    let command = cli.command.unwrap_or_default();

    match command {
        Command::New { save } => cmd_new(&config, &engine, save.as_deref()),
        Command::Preview {
            input,
            plan,
            display_unit,
            json,
            csv,
        } => {
            let mut plan_input = match (input, plan) {
                (Some(path), _) => read_json::<PlanInput>(&path)?,
                (None, Some(id)) => plan_store(&config.data).get(id)?.payload,
                (None, None) => {
                    return Err(PlannerError::InvalidInput(
                        "either --input or --plan is required".to_string(),
                    ));
                }
            };
            if display_unit.is_some() {
                plan_input.display_unit = display_unit;
            }
            cmd_preview(&config, &engine, plan_input, json, csv.as_deref())
        }
        Command::Plan(cmd) => cmd_store(&plan_store(&config.data), cmd, "Saved plans"),
        Command::Recipe(cmd) => cmd_store(&recipe_store(&config.data), cmd, "Saved recipes"),
        Command::Lookup {
            fdc_id,
            name,
            api_key,
            add_to,
            grams,
        } => cmd_lookup(&config, fdc_id, name.as_deref(), api_key.as_deref(), add_to, grams),
        Command::Rer {
            weight,
            unit,
            activity,
        } => cmd_rer(&engine, weight, unit, &activity),
        Command::KcalToGrams { kcal, kcal_per_100 } => {
            match calories_to_grams(kcal, kcal_per_100) {
                Some(grams) => println!("{:.1} g supplies {:.0} kcal", grams, kcal),
                None => println!("Food has no energy; cannot reach {:.0} kcal.", kcal),
            }
            Ok(())
        }
    }
}

/// Enter a plan interactively, preview it, optionally save it.
fn cmd_new(config: &Config, engine: &NutritionEngine, save: Option<&str>) -> Result<()> {
    let input = collect_plan_input(&config.meals.default_plan())?;
    warn_unknown_activity(&input.subject.activity);

    display_preview(&engine.preview(&input));

    let name = match save {
        Some(name) => Some(name.to_string()),
        None if prompt_yes_no("Save this plan?", false)? => Some(
            dialoguer::Input::<String>::new()
                .with_prompt("Plan name")
                .interact_text()?,
        ),
        None => None,
    };

    if let Some(name) = name {
        let stored = plan_store(&config.data).create(&name, input)?;
        println!("Plan saved as {}", stored.id);
    }

    Ok(())
}

fn cmd_preview(
    config: &Config,
    engine: &NutritionEngine,
    mut input: PlanInput,
    json: bool,
    csv: Option<&Path>,
) -> Result<()> {
    warn_unknown_activity(&input.subject.activity);
    if input.meals.is_empty() {
        input.meals = config.meals.default_plan();
    }

    let preview = engine.preview(&input);

    if json {
        print_json(&preview)?;
    } else {
        display_preview(&preview);
    }

    if let Some(path) = csv {
        write_meals_csv(&preview, path)?;
        eprintln!("Per-meal allocation written to {}", path.display());
    }

    Ok(())
}

fn cmd_store<T>(store: &SnapshotStore<T>, cmd: StoreCommand, title: &str) -> Result<()>
where
    T: serde::Serialize + DeserializeOwned + Clone,
{
    match cmd {
        StoreCommand::Save { name, file } => {
            let payload: T = read_json(&file)?;
            let stored = store.create(&name, payload)?;
            println!("Saved '{}' as {}", stored.name, stored.id);
        }
        StoreCommand::List => display_snapshots(&store.list()?, title),
        StoreCommand::Show { id } => print_json(&store.get(id)?)?,
        StoreCommand::Find { query } => {
            let hits = store.find_by_name(&query)?;
            if hits.is_empty() {
                println!("Nothing matches '{}'.", query);
            } else {
                display_snapshots(&hits, title);
            }
        }
        StoreCommand::Update { id, file, name } => {
            let payload: T = read_json(&file)?;
            let stored = store.update(id, name.as_deref(), payload)?;
            println!("Updated '{}'", stored.name);
        }
        StoreCommand::Delete { id } => {
            store.delete(id)?;
            println!("Deleted {}", id);
        }
    }
    Ok(())
}

fn cmd_lookup(
    config: &Config,
    fdc_id: u64,
    name: Option<&str>,
    api_key: Option<&str>,
    add_to: Option<Uuid>,
    grams: Option<f64>,
) -> Result<()> {
    let key = config.lookup.resolve_api_key(api_key)?;
    let client = UsdaClient::new(&config.lookup.base_url, key)?;
    let food = client.fetch_food(fdc_id, name)?;
    tracing::debug!("fetched {}", food.debug_string());

    print_json(&food)?;

    if let (Some(id), Some(grams)) = (add_to, grams) {
        let store = recipe_store(&config.data);
        let stored = store.get(id)?;
        let mut recipe: Recipe = stored.payload;
        recipe.lines.push(RecipeLine::new(food, grams));
        store.update(id, None, recipe)?;
        println!("Added {:.0} g to recipe '{}'", grams, stored.name);
    }

    Ok(())
}

fn cmd_rer(engine: &NutritionEngine, weight: f64, unit: WeightUnit, activity: &str) -> Result<()> {
    let class = ActivityClass::parse(activity);
    warn_unknown_activity(&class);
    let energy = engine.energy_requirement(weight, unit, &class);
    display_energy(weight, unit, &energy);
    Ok(())
}

fn warn_unknown_activity(class: &ActivityClass) {
    if class.is_known() {
        return;
    }
    match ActivityClass::closest_known(class.key()) {
        Some(hint) => eprintln!(
            "Unknown activity class '{}' (did you mean '{}'?); using the default factor.",
            class, hint
        ),
        None => eprintln!(
            "Unknown activity class '{}'; using the default factor.",
            class
        ),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
