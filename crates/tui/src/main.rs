mod app;
mod forms;

use anyhow::Result;
use std::fs::{self, OpenOptions};

use hideout_core::{
    config::{self, AppConfig},
    JsonFileStore, ProjectTracker, SeedLoader, SeedSync,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let seeds = SeedLoader::new(&config.cache_root);
    let seed = seeds.catalog()?;
    let store = JsonFileStore::new(&config.data_dir);
    let mut tracker = ProjectTracker::new(seed, store, config.save_key.clone());
    let load_error = match tracker.load() {
        Ok(true) => {
            info!(projects = tracker.projects().len(), "Loaded saved projects");
            None
        }
        Ok(false) => None,
        Err(err) => {
            warn!("Starting from the seed catalog: {err}");
            Some(err)
        }
    };

    let mut app = app::HideoutApp::new(tracker, seeds);
    if let Some(err) = load_error {
        app.set_status(format!("Saved data ignored: {err}"));
    }

    if config.refresh_seed {
        let sync = SeedSync::new(config.clone());
        let (seed_tx, seed_rx) = mpsc::channel(4);
        tokio::spawn(async move {
            if let Err(err) = sync.run(seed_tx).await {
                error!("Seed refresh task error: {err}");
            }
        });
        app.attach_seed(seed_rx);
    }

    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("hideout.log");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal belongs to the UI; log to file only.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
