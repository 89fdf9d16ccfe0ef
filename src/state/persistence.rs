use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PlannerError, Result};

/// A named snapshot as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub payload: T,
}

/// Load every snapshot in `path`. A missing file is an empty store.
pub fn load_snapshots<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<Stored<T>>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let snapshots: Vec<Stored<T>> = serde_json::from_str(&content)?;
    Ok(snapshots)
}

/// Write every snapshot to `path` as pretty JSON, creating parent directories.
pub fn save_snapshots<T: Serialize, P: AsRef<Path>>(path: P, snapshots: &[Stored<T>]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(snapshots)?;
    fs::write(path, json)?;
    Ok(())
}

/// What kind of snapshot a store holds; picks the not-found error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    Plan,
    Recipe,
}

impl SnapshotKind {
    fn not_found(self, id: Uuid) -> PlannerError {
        match self {
            SnapshotKind::Plan => PlannerError::PlanNotFound(id),
            SnapshotKind::Recipe => PlannerError::RecipeNotFound(id),
        }
    }
}

/// File-backed collection of named snapshots with create/read/list/update/delete.
///
/// Every operation reads the file and every mutation rewrites it whole.
pub struct SnapshotStore<T> {
    path: PathBuf,
    kind: SnapshotKind,
    _payload: std::marker::PhantomData<T>,
}

impl<T> SnapshotStore<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(path: impl Into<PathBuf>, kind: SnapshotKind) -> Self {
        Self {
            path: path.into(),
            kind,
            _payload: std::marker::PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn create(&self, name: &str, payload: T) -> Result<Stored<T>> {
        let mut snapshots = load_snapshots::<T, _>(&self.path)?;
        let now = Utc::now();
        let stored = Stored {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            created_at: now,
            updated_at: now,
            payload,
        };
        snapshots.push(stored.clone());
        save_snapshots(&self.path, &snapshots)?;
        tracing::info!("Saved {:?} '{}' as {}", self.kind, stored.name, stored.id);
        Ok(stored)
    }

    pub fn get(&self, id: Uuid) -> Result<Stored<T>> {
        load_snapshots::<T, _>(&self.path)?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| self.kind.not_found(id))
    }

    /// All snapshots sorted by name (case-insensitive), then creation time.
    pub fn list(&self) -> Result<Vec<Stored<T>>> {
        let mut snapshots = load_snapshots::<T, _>(&self.path)?;
        snapshots.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(snapshots)
    }

    /// Replace the payload (and optionally the name) of an existing snapshot.
    pub fn update(&self, id: Uuid, name: Option<&str>, payload: T) -> Result<Stored<T>> {
        let mut snapshots = load_snapshots::<T, _>(&self.path)?;
        let entry = snapshots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| self.kind.not_found(id))?;

        if let Some(name) = name {
            entry.name = name.trim().to_string();
        }
        entry.payload = payload;
        entry.updated_at = Utc::now();
        let updated = entry.clone();

        save_snapshots(&self.path, &snapshots)?;
        tracing::info!("Updated {:?} {}", self.kind, id);
        Ok(updated)
    }

    pub fn delete(&self, id: Uuid) -> Result<()> {
        let mut snapshots = load_snapshots::<T, _>(&self.path)?;
        let before = snapshots.len();
        snapshots.retain(|s| s.id != id);
        if snapshots.len() == before {
            return Err(self.kind.not_found(id));
        }
        save_snapshots(&self.path, &snapshots)?;
        tracing::info!("Deleted {:?} {}", self.kind, id);
        Ok(())
    }

    /// Snapshots whose name is closest to `query`, best first.
    pub fn find_by_name(&self, query: &str) -> Result<Vec<Stored<T>>> {
        let needle = query.trim().to_lowercase();
        let mut scored: Vec<(f64, Stored<T>)> = self
            .list()?
            .into_iter()
            .map(|s| (strsim::jaro_winkler(&needle, &s.name.to_lowercase()), s))
            .filter(|(score, _)| *score >= 0.8)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored.into_iter().map(|(_, s)| s).collect())
    }
}
