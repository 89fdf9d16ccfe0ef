use tempfile::tempdir;

use dog_meal_planner_rs::config::DataConfig;
use dog_meal_planner_rs::error::PlannerError;
use dog_meal_planner_rs::models::{
    ActivityClass, FoodItem, MealPlan, Nutrient, NutrientProfile, PlanInput, Recipe, RecipeLine,
    Sex, Subject, WeightUnit,
};
use dog_meal_planner_rs::state::{plan_store, recipe_store};

fn sample_plan() -> PlanInput {
    let kibble = FoodItem::new(
        "Adult Kibble",
        362.7,
        NutrientProfile::new()
            .with(Nutrient::Protein, 25.1)
            .with(Nutrient::Fat, 14.3)
            .with(Nutrient::Calcium, 1180.0)
            .with(Nutrient::Phosphorus, 930.0)
            .with(Nutrient::VitaminD, 0.1),
    );
    let chicken = FoodItem::new(
        "Chicken breast",
        165.0,
        NutrientProfile::new()
            .with(Nutrient::Protein, 31.0)
            .with(Nutrient::Fat, 3.6),
    );

    PlanInput {
        subject: Subject {
            weight: 44.1,
            weight_unit: WeightUnit::Lb,
            target_weight: Some(40.0),
            age: 6.5,
            sex: Sex::Female,
            neutered: true,
            activity: ActivityClass::WeightLoss,
        },
        display_unit: Some(WeightUnit::Kg),
        base_food: Some(RecipeLine::new(kibble, 95.0)),
        recipe: Recipe::new(vec![RecipeLine::new(chicken, 133.3)]),
        treat_kcal: 35.0,
        water_intake_ml: 1100.0,
        meals: MealPlan::new(["breakfast", "dinner", "breakfast"]),
    }
}

fn data_config(dir: &std::path::Path) -> DataConfig {
    DataConfig {
        data_dir: dir.join("data"),
    }
}

#[test]
fn test_plan_save_load_roundtrip_exact() {
    let dir = tempdir().unwrap();
    let store = plan_store(&data_config(dir.path()));
    let plan = sample_plan();

    let stored = store.create("Weight loss plan", plan.clone()).unwrap();
    let loaded = store.get(stored.id).unwrap();

    assert_eq!(loaded.name, "Weight loss plan");
    assert_eq!(loaded.payload, plan);
}

#[test]
fn test_unknown_activity_survives_roundtrip() {
    let dir = tempdir().unwrap();
    let store = plan_store(&data_config(dir.path()));
    let mut plan = sample_plan();
    plan.subject.activity = ActivityClass::Other("herding".to_string());

    let stored = store.create("Herder", plan.clone()).unwrap();
    assert_eq!(store.get(stored.id).unwrap().payload, plan);
}

#[test]
fn test_list_sorted_by_name() {
    let dir = tempdir().unwrap();
    let store = plan_store(&data_config(dir.path()));
    store.create("zeta", sample_plan()).unwrap();
    store.create("Alpha", sample_plan()).unwrap();
    store.create("mid", sample_plan()).unwrap();

    let names: Vec<String> = store.list().unwrap().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Alpha", "mid", "zeta"]);
}

#[test]
fn test_update_and_delete() {
    let dir = tempdir().unwrap();
    let store = recipe_store(&data_config(dir.path()));

    let rice = FoodItem::new("Rice", 130.0, NutrientProfile::new());
    let original = Recipe::new(vec![RecipeLine::new(rice.clone(), 100.0)]);
    let stored = store.create("Rice bowl", original).unwrap();

    let changed = Recipe::new(vec![
        RecipeLine::new(rice.clone(), 80.0),
        RecipeLine::new(rice, 40.0),
    ]);
    let updated = store
        .update(stored.id, Some("Rice bowl v2"), changed.clone())
        .unwrap();
    assert_eq!(updated.id, stored.id);
    assert_eq!(updated.created_at, stored.created_at);
    assert!(updated.updated_at >= stored.updated_at);

    let loaded = store.get(stored.id).unwrap();
    assert_eq!(loaded.name, "Rice bowl v2");
    assert_eq!(loaded.payload, changed);

    store.delete(stored.id).unwrap();
    assert!(store.list().unwrap().is_empty());
    assert!(matches!(
        store.get(stored.id),
        Err(PlannerError::RecipeNotFound(id)) if id == stored.id
    ));
}

#[test]
fn test_update_missing_plan_errors() {
    let dir = tempdir().unwrap();
    let store = plan_store(&data_config(dir.path()));
    let id = uuid::Uuid::new_v4();
    assert!(matches!(
        store.update(id, None, sample_plan()),
        Err(PlannerError::PlanNotFound(_))
    ));
}

#[test]
fn test_plans_and_recipes_are_separate_files() {
    let dir = tempdir().unwrap();
    let data = data_config(dir.path());
    plan_store(&data).create("p", sample_plan()).unwrap();
    recipe_store(&data).create("r", Recipe::default()).unwrap();

    assert!(data.plans_path().exists());
    assert!(data.recipes_path().exists());
    assert_eq!(plan_store(&data).list().unwrap().len(), 1);
    assert_eq!(recipe_store(&data).list().unwrap().len(), 1);
}

#[test]
fn test_full_precision_floats_survive_roundtrip() {
    let dir = tempdir().unwrap();
    let store = plan_store(&data_config(dir.path()));

    // Thirds and a simple LCG give values that need all 17 significant digits.
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut plans = Vec::new();
    for k in 1..=40u32 {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let noise = (seed >> 11) as f64 / (1u64 << 53) as f64;

        let mut plan = sample_plan();
        plan.subject.weight = 1.0 + noise * 80.0;
        plan.treat_kcal = 1.0 / 3.0 * f64::from(k) + 0.2;
        plan.water_intake_ml = 1000.0 * noise;
        plan.recipe.lines[0].quantity = 100.0 / 7.0 * f64::from(k);
        plans.push(store.create(&format!("plan {}", k), plan).unwrap());
    }

    let mut plan = sample_plan();
    plan.subject.weight = 17.17247001991735;
    plan.treat_kcal = 1.5666666666666667;
    plans.push(store.create("last digit", plan).unwrap());

    for stored in plans {
        let loaded = store.get(stored.id).unwrap();
        assert_eq!(loaded.payload, stored.payload);
    }
}
