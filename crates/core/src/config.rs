//! Application configuration.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::save::DEFAULT_SAVE_KEY;

/// Directory name used under the platform config, data and cache roots.
pub const APP_DIR: &str = "hideout";
/// Upstream item table used to generate the seed catalog.
pub const DEFAULT_ITEMS_URL: &str =
    "https://raw.githubusercontent.com/TarkovTracker/tarkovdata/master/items.en.json";
/// Upstream hideout module list used to generate the seed catalog.
pub const DEFAULT_HIDEOUT_URL: &str =
    "https://raw.githubusercontent.com/TarkovTracker/tarkovdata/master/hideout.json";

/// Runtime settings, read from `config.toml` and `HIDEOUT_*` variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Directory holding the save slot.
    pub data_dir: PathBuf,
    /// Name of the save slot.
    pub save_key: String,
    /// Directory holding the generated seed and its manifest.
    pub cache_root: PathBuf,
    /// Upstream item table.
    pub items_url: String,
    /// Upstream hideout module list.
    pub hideout_url: String,
    /// Fetch a fresh seed in the background on start.
    pub refresh_seed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR),
            save_key: DEFAULT_SAVE_KEY.to_string(),
            cache_root: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR),
            items_url: DEFAULT_ITEMS_URL.to_string(),
            hideout_url: DEFAULT_HIDEOUT_URL.to_string(),
            refresh_seed: false,
        }
    }
}

impl AppConfig {
    /// Load from the default config file.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from `path` (optional) layered over defaults and the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = AppConfig::default();
        let settings = Config::builder()
            .set_default("data_dir", defaults.data_dir.display().to_string())?
            .set_default("save_key", defaults.save_key)?
            .set_default("cache_root", defaults.cache_root.display().to_string())?
            .set_default("items_url", defaults.items_url)?
            .set_default("hideout_url", defaults.hideout_url)?
            .set_default("refresh_seed", defaults.refresh_seed)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("HIDEOUT").try_parsing(true))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Location of `config.toml`.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Write a default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(config_path())
}

/// Write a default config file at `path` if none exists yet.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, default_config_toml(&AppConfig::default()))
        .with_context(|| format!("failed to write {}", path.display()))
}

fn default_config_toml(config: &AppConfig) -> String {
    format!(
        "# Hideout tracker settings\n\
         data_dir = {:?}\n\
         save_key = {:?}\n\
         cache_root = {:?}\n\
         items_url = {:?}\n\
         hideout_url = {:?}\n\
         refresh_seed = {}\n",
        config.data_dir.display().to_string(),
        config.save_key,
        config.cache_root.display().to_string(),
        config.items_url,
        config.hideout_url,
        config.refresh_seed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_file_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("hideout").join("config.toml");
        ensure_default_config_at(&path)?;
        assert!(path.exists());

        let loaded = AppConfig::load_from(&path)?;
        let defaults = AppConfig::default();
        assert_eq!(loaded.save_key, defaults.save_key);
        assert_eq!(loaded.items_url, defaults.items_url);
        assert!(!loaded.refresh_seed);
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data_dir = \"/tmp/hideout-test\"\nsave_key = \"slot.json\"\nrefresh_seed = true\n",
        )?;
        let loaded = AppConfig::load_from(&path)?;
        assert_eq!(loaded.data_dir, PathBuf::from("/tmp/hideout-test"));
        assert_eq!(loaded.save_key, "slot.json");
        assert!(loaded.refresh_seed);
        assert_eq!(loaded.hideout_url, DEFAULT_HIDEOUT_URL);
        Ok(())
    }

    #[test]
    fn existing_files_are_left_alone() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "save_key = \"mine.json\"\n")?;
        ensure_default_config_at(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "save_key = \"mine.json\"\n");
        Ok(())
    }
}
