use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use parking_lot::RwLock;
use tracing::warn;

use crate::{
    catalog::Catalog,
    manifest::{self, SeedMetadata},
};

const BUNDLED_SEED: &str = include_str!("../../data/seed_catalog.json");

/// Catalog compiled into the binary.
pub fn bundled_catalog() -> Result<Catalog> {
    serde_json::from_str(BUNDLED_SEED).context("failed to parse bundled seed catalog")
}

/// Path of the generated seed inside a cache directory.
pub fn seed_path(cache_root: impl AsRef<Path>) -> PathBuf {
    cache_root.as_ref().join("seed_catalog.json")
}

/// Thread-safe access to the current seed catalog.
///
/// Prefers the generated seed under the cache root and falls back to the
/// bundled one when no usable cache exists.
#[derive(Clone)]
pub struct SeedLoader {
    inner: Arc<RwLock<Inner>>,
}

struct Inner {
    cache_root: PathBuf,
    metadata: Option<SeedMetadata>,
    cache: Option<Catalog>,
}

impl SeedLoader {
    /// Build a loader reading from `cache_root`.
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                cache_root: cache_root.into(),
                metadata: None,
                cache: None,
            })),
        }
    }

    /// Metadata of the generated seed, if one is in use.
    pub fn metadata(&self) -> Option<SeedMetadata> {
        self.inner.read().metadata.clone()
    }

    /// Replace the current seed with a freshly generated one.
    pub fn refresh(&self, catalog: Catalog, metadata: SeedMetadata) {
        let mut inner = self.inner.write();
        inner.cache = Some(catalog);
        inner.metadata = Some(metadata);
    }

    /// Current seed, reading it on first use.
    pub fn catalog(&self) -> Result<Catalog> {
        let mut inner = self.inner.write();
        if let Some(catalog) = &inner.cache {
            return Ok(catalog.clone());
        }

        let (catalog, metadata) = match read_cached(&inner.cache_root) {
            Ok(Some((catalog, metadata))) => (catalog, metadata),
            Ok(None) => (bundled_catalog()?, None),
            Err(err) => {
                warn!("Ignoring cached seed: {err:#}");
                (bundled_catalog()?, None)
            }
        };
        inner.cache = Some(catalog.clone());
        inner.metadata = metadata;
        Ok(catalog)
    }
}

fn read_cached(cache_root: &Path) -> Result<Option<(Catalog, Option<SeedMetadata>)>> {
    let path = seed_path(cache_root);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let catalog = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let metadata = SeedMetadata::load(manifest::manifest_path(cache_root))?;
    Ok(Some((catalog, metadata)))
}
