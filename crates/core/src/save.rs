//! Snapshot persistence.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::{catalog::Catalog, models::ActiveProject};

/// Default key of the single save slot.
pub const DEFAULT_SAVE_KEY: &str = "hideout_data.json";

/// Full snapshot written on every change and read once at start-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Catalog including user-created items and modules.
    #[serde(default)]
    pub database: Catalog,
    /// Projects in progress.
    #[serde(default)]
    pub active_projects: Vec<ActiveProject>,
}

impl SaveData {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(StoreError::Serialize)
    }
}

/// Failures raised by a [`SaveStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Stored snapshot is not valid JSON for [`SaveData`].
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// Snapshot could not be encoded.
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The key is not usable as a slot name.
    #[error("invalid save key {0:?}")]
    InvalidKey(String),
    /// Store-specific failure.
    #[error("{0}")]
    Backend(String),
}

/// Narrow load/save contract between the tracker and its storage.
pub trait SaveStore {
    /// Read the snapshot stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<SaveData>, StoreError>;

    /// Replace the snapshot stored under `key` with `snapshot`.
    fn write(&self, key: &str, snapshot: &str) -> Result<(), StoreError>;
}

impl<S: SaveStore + ?Sized> SaveStore for &S {
    fn read(&self, key: &str) -> Result<Option<SaveData>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, snapshot: &str) -> Result<(), StoreError> {
        (**self).write(key, snapshot)
    }
}

/// Stores each slot as a JSON file inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the save files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\'])
            && key.chars().all(|ch| !ch.is_control());
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl SaveStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<SaveData>, StoreError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let data = serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok(Some(data))
    }

    fn write(&self, key: &str, snapshot: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        // Write beside the target and rename so readers never see a partial file.
        let mut temp = NamedTempFile::new_in(&self.root).map_err(io_err)?;
        temp.write_all(snapshot.as_bytes()).map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?;
        temp.persist(&path).map_err(|err| io_err(err.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActiveProject;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn missing_slot_reads_as_none() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path().join("nested"));
        assert!(store.read(DEFAULT_SAVE_KEY)?.is_none());
        Ok(())
    }

    #[test]
    fn write_then_read_returns_snapshot() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path().join("nested"));
        let mut data = SaveData::default();
        let mut project = ActiveProject::new("module-vents", 2);
        project.owned_materials.insert("bolts".to_string(), 3);
        data.active_projects.push(project);

        store.write(DEFAULT_SAVE_KEY, &data.to_json()?)?;
        assert!(store.path_for(DEFAULT_SAVE_KEY)?.exists());

        let restored = store.read(DEFAULT_SAVE_KEY)?.expect("snapshot present");
        assert_eq!(restored, data);

        // Only the slot file remains; the temporary file was renamed into place.
        let files = fs::read_dir(store.root())?.count();
        assert_eq!(files, 1);
        Ok(())
    }

    #[test]
    fn corrupt_snapshot_is_a_parse_error() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonFileStore::new(dir.path());
        fs::write(dir.path().join(DEFAULT_SAVE_KEY), "{ not json")?;
        let err = store.read(DEFAULT_SAVE_KEY).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        Ok(())
    }

    #[test]
    fn rejects_path_like_keys() {
        let store = JsonFileStore::new("/tmp");
        for key in ["", "..", "a/b", "a\\b"] {
            assert!(matches!(
                store.path_for(key),
                Err(StoreError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn accepts_snapshots_written_by_older_versions() -> Result<()> {
        let raw = r#"{
            "database": {
                "items": {
                    "n1": { "id": "n1", "name": "Nails", "image_path": null, "category": "building" }
                },
                "modules": {
                    "m1": { "id": "m1", "name": "Shed", "levels": {
                        "1": { "level": 1, "requirements": [ { "item_id": "n1", "quantity": 5 } ] }
                    } }
                }
            },
            "active_projects": [ { "module_id": "m1", "level": 1, "owned_materials": { "n1": 2 } } ]
        }"#;
        let data: SaveData = serde_json::from_str(raw)?;
        assert_eq!(data.active_projects[0].owned("n1"), 2);
        assert_eq!(
            data.database.item_by_name("NAILS").map(|i| i.id.as_str()),
            Some("n1")
        );
        Ok(())
    }
}
