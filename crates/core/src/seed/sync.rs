use std::{collections::HashMap, path::PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tracing::info;

use crate::{
    catalog::Catalog,
    config::AppConfig,
    manifest::{self, SeedMetadata},
};

use super::{
    generate::{build_catalog, UpstreamHideout, UpstreamItem},
    loader::seed_path,
};

/// Events emitted by the background seed refresh.
#[derive(Debug)]
pub enum SeedEvent {
    /// A new seed was generated and cached.
    Updated {
        /// Freshly generated catalog.
        catalog: Catalog,
        /// Manifest written beside it.
        metadata: SeedMetadata,
    },
    /// Refresh failed; the previous seed stays in use.
    Error(anyhow::Error),
}

/// Regenerates the seed catalog from the upstream data source.
pub struct SeedSync {
    config: AppConfig,
    client: reqwest::Client,
}

impl SeedSync {
    /// Create a synchroniser from configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Path of the cached seed catalog.
    pub fn seed_path(&self) -> PathBuf {
        seed_path(&self.config.cache_root)
    }

    fn manifest_path(&self) -> PathBuf {
        manifest::manifest_path(&self.config.cache_root)
    }

    /// Fetch, convert and cache a new seed, then report it on `sender`.
    pub async fn run(self, sender: mpsc::Sender<SeedEvent>) -> Result<()> {
        let event = match self.refresh().await {
            Ok((catalog, metadata)) => SeedEvent::Updated { catalog, metadata },
            Err(err) => SeedEvent::Error(err),
        };
        sender
            .send(event)
            .await
            .context("failed to send seed event")?;
        Ok(())
    }

    /// Fetch and cache a new seed.
    pub async fn refresh(&self) -> Result<(Catalog, SeedMetadata)> {
        info!(
            items = %self.config.items_url,
            hideout = %self.config.hideout_url,
            "Fetching seed data"
        );
        let items: HashMap<String, UpstreamItem> = self.fetch_json(&self.config.items_url).await?;
        let hideout: UpstreamHideout = self.fetch_json(&self.config.hideout_url).await?;

        let catalog = build_catalog(&items, &hideout);
        let metadata = SeedMetadata {
            items_url: Some(self.config.items_url.clone()),
            hideout_url: Some(self.config.hideout_url.clone()),
            fetched_at: Some(Utc::now()),
            item_count: catalog.items().len(),
            module_count: catalog.modules().len(),
        };
        self.write_cache(&catalog, &metadata).await?;
        info!(
            items = metadata.item_count,
            modules = metadata.module_count,
            "Seed cached at {}",
            self.seed_path().display()
        );
        Ok((catalog, metadata))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to request {url}"))?
            .error_for_status()
            .with_context(|| format!("unexpected status from {url}"))?
            .json::<T>()
            .await
            .with_context(|| format!("failed to decode {url}"))
    }

    async fn write_cache(&self, catalog: &Catalog, metadata: &SeedMetadata) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.cache_root)
            .await
            .context("failed to create seed cache directory")?;
        let serialized =
            serde_json::to_vec_pretty(catalog).context("failed to serialize seed catalog")?;
        let path = self.seed_path();
        tokio::fs::write(&path, serialized)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        metadata.persist(self.manifest_path())
    }
}
