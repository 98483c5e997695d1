//! Model table: maps the game's model roles to asset paths and hands out
//! opaque [`ModelHandle`]s.
//!
//! The game core draws by handle, never by path. The application registers
//! each model once at startup and resolves the table into a [`ModelSet`].
//!
//! # Layout
//! The table can be written to and read from a JSON manifest so a backend
//! and the headless runner agree on handles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thicket_common::{ModelHandle, ModelSet};

/// The roles a model can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Ground,
    Tree,
    Bullet,
    Enemy,
    Sky,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::Ground,
        ModelKind::Tree,
        ModelKind::Bullet,
        ModelKind::Enemy,
        ModelKind::Sky,
    ];
}

/// One registered model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub handle: ModelHandle,
    pub path: PathBuf,
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no model registered for {0:?}")]
    Unregistered(ModelKind),
    #[error("model file missing: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Registry of model paths keyed by role.
///
/// Handles are assigned in registration order and stay stable when a role is
/// re-registered with a new path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetTable {
    models: BTreeMap<ModelKind, ModelEntry>,
    next_handle: u32,
}

impl AssetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock forest models, relative to the asset root.
    pub fn forest() -> Self {
        let mut table = Self::new();
        table.register(ModelKind::Ground, "forest/ground.obj");
        table.register(ModelKind::Tree, "forest/tree.obj");
        table.register(ModelKind::Bullet, "forest/bullet.obj");
        table.register(ModelKind::Enemy, "forest/enemy.obj");
        table.register(ModelKind::Sky, "forest/sky.obj");
        table
    }

    /// Register a model path for a role and return its handle.
    pub fn register(&mut self, kind: ModelKind, path: impl Into<PathBuf>) -> ModelHandle {
        let path = path.into();
        if let Some(entry) = self.models.get_mut(&kind) {
            tracing::debug!(?kind, path = %path.display(), "model path replaced");
            entry.path = path;
            return entry.handle;
        }
        let handle = ModelHandle(self.next_handle);
        self.next_handle += 1;
        tracing::debug!(?kind, ?handle, path = %path.display(), "model registered");
        self.models.insert(kind, ModelEntry { handle, path });
        handle
    }

    pub fn get(&self, kind: ModelKind) -> Option<&ModelEntry> {
        self.models.get(&kind)
    }

    pub fn handle(&self, kind: ModelKind) -> Result<ModelHandle, AssetError> {
        self.models
            .get(&kind)
            .map(|e| e.handle)
            .ok_or(AssetError::Unregistered(kind))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Resolve every role into the handle set the game core draws with.
    pub fn model_set(&self) -> Result<ModelSet, AssetError> {
        Ok(ModelSet {
            ground: self.handle(ModelKind::Ground)?,
            tree: self.handle(ModelKind::Tree)?,
            bullet: self.handle(ModelKind::Bullet)?,
            enemy: self.handle(ModelKind::Enemy)?,
            sky: self.handle(ModelKind::Sky)?,
        })
    }

    /// Check that every registered path exists under `root`.
    pub fn verify_files(&self, root: impl AsRef<Path>) -> Result<(), AssetError> {
        for entry in self.models.values() {
            let full = root.as_ref().join(&entry.path);
            if !full.is_file() {
                return Err(AssetError::MissingFile(full));
            }
        }
        Ok(())
    }

    /// Save the table to a JSON manifest.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a table from a JSON manifest.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path)?;
        let table: Self = serde_json::from_reader(file)?;
        Ok(table)
    }
}

pub fn crate_info() -> &'static str {
    "thicket-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forest_resolves_every_role() {
        let table = AssetTable::forest();
        let set = table.model_set().unwrap();
        assert_eq!(table.len(), ModelKind::ALL.len());
        assert_eq!(set, ModelSet::default());
        assert_eq!(
            table.get(ModelKind::Sky).unwrap().path,
            PathBuf::from("forest/sky.obj")
        );
    }

    #[test]
    fn reregistering_keeps_handle() {
        let mut table = AssetTable::new();
        let first = table.register(ModelKind::Tree, "a.obj");
        let second = table.register(ModelKind::Tree, "b.obj");
        assert_eq!(first, second);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(ModelKind::Tree).unwrap().path, PathBuf::from("b.obj"));
    }

    #[test]
    fn incomplete_table_is_an_error() {
        let mut table = AssetTable::new();
        table.register(ModelKind::Ground, "ground.obj");
        assert!(matches!(
            table.model_set(),
            Err(AssetError::Unregistered(ModelKind::Tree))
        ));
    }

    #[test]
    fn verify_reports_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut table = AssetTable::new();
        table.register(ModelKind::Ground, "ground.obj");
        table.register(ModelKind::Sky, "sky.obj");
        std::fs::write(tmp.path().join("ground.obj"), "o ground\n").unwrap();

        match table.verify_files(tmp.path()) {
            Err(AssetError::MissingFile(path)) => assert!(path.ends_with("sky.obj")),
            other => panic!("expected missing sky.obj, got {other:?}"),
        }

        std::fs::write(tmp.path().join("sky.obj"), "o sky\n").unwrap();
        assert!(table.verify_files(tmp.path()).is_ok());
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let table = AssetTable::forest();
        table.save(tmp.path()).unwrap();

        let loaded = AssetTable::load(tmp.path()).unwrap();
        assert_eq!(loaded.model_set().unwrap(), table.model_set().unwrap());
    }

    #[test]
    fn loaded_table_continues_numbering() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut table = AssetTable::new();
        table.register(ModelKind::Ground, "g.obj");
        table.save(tmp.path()).unwrap();

        let mut loaded = AssetTable::load(tmp.path()).unwrap();
        assert_eq!(loaded.register(ModelKind::Sky, "s.obj"), ModelHandle(1));
    }
}
