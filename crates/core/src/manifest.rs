//! Manifest stored alongside the generated seed catalog.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Describes where a cached seed came from.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SeedMetadata {
    /// Upstream item table URL.
    pub items_url: Option<String>,
    /// Upstream hideout module URL.
    pub hideout_url: Option<String>,
    /// When the seed was generated.
    pub fetched_at: Option<DateTime<Utc>>,
    /// Number of items in the generated catalog.
    #[serde(default)]
    pub item_count: usize,
    /// Number of modules in the generated catalog.
    #[serde(default)]
    pub module_count: usize,
}

impl SeedMetadata {
    /// Load metadata from the given path, returning `None` if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let metadata = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;
        Ok(Some(metadata))
    }

    /// Persist metadata to the given file, creating parent directories if needed.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create manifest directory {}", parent.display())
            })?;
        }

        let serialized =
            serde_json::to_string_pretty(self).context("failed to serialize seed metadata")?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write manifest {}", path.display()))
    }

    /// Short label for status lines.
    pub fn describe(&self) -> String {
        match self.fetched_at {
            Some(at) => format!(
                "{} items, {} modules (fetched {})",
                self.item_count,
                self.module_count,
                at.format("%Y-%m-%d %H:%M")
            ),
            None => format!("{} items, {} modules", self.item_count, self.module_count),
        }
    }
}

/// Path of the manifest inside a seed cache directory.
pub fn manifest_path(cache_root: impl AsRef<Path>) -> PathBuf {
    cache_root.as_ref().join("seed-manifest.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn persists_and_reloads() -> Result<()> {
        let dir = tempdir()?;
        let path = manifest_path(dir.path().join("cache"));
        assert!(SeedMetadata::load(&path)?.is_none());

        let metadata = SeedMetadata {
            items_url: Some("https://example.com/items.json".to_string()),
            hideout_url: None,
            fetched_at: Some(Utc::now()),
            item_count: 12,
            module_count: 3,
        };
        metadata.persist(&path)?;
        assert_eq!(SeedMetadata::load(&path)?, Some(metadata.clone()));
        assert!(metadata.describe().starts_with("12 items, 3 modules"));
        Ok(())
    }
}
