mod persistence;

pub use persistence::{load_snapshots, save_snapshots, SnapshotKind, SnapshotStore, Stored};

use crate::config::DataConfig;
use crate::models::{PlanInput, Recipe};

/// Named full-input snapshots.
pub type PlanStore = SnapshotStore<PlanInput>;

/// Named ingredient line lists.
pub type RecipeStore = SnapshotStore<Recipe>;

pub fn plan_store(data: &DataConfig) -> PlanStore {
    SnapshotStore::new(data.plans_path(), SnapshotKind::Plan)
}

pub fn recipe_store(data: &DataConfig) -> RecipeStore {
    SnapshotStore::new(data.recipes_path(), SnapshotKind::Recipe)
}
