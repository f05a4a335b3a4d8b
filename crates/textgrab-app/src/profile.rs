use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use textgrab_config::Config;
use textgrab_config::settings::{JsonFileStore, MemoryStore, SettingsStore};

const CONFIG_FILE: &str = "config.json";

/// Load the config from `path`, or from the user config dir (created with
/// defaults on first run). Environment overrides are applied last.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => match Config::app_dir() {
            Some(dir) => load_or_create(&dir.join(CONFIG_FILE))?,
            None => {
                tracing::warn!("No config directory on this platform, using defaults");
                Config::default()
            }
        },
    };
    config.apply_env();
    Ok(config)
}

pub fn read_config(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Invalid config {}", path.display()))
}

/// Read `path`, writing the defaults there first if it does not exist
pub fn load_or_create(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        return read_config(path);
    }

    let config = Config::default();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, serde_json::to_string_pretty(&config)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created default config at {}", path.display());
    Ok(config)
}

/// The persisted settings, or an in-memory store when there is nowhere to
/// keep them
pub fn open_settings(config: &Config) -> Arc<dyn SettingsStore> {
    match config.settings_file() {
        Some(path) => {
            let store = JsonFileStore::open_or_reset(path);
            tracing::info!("Settings at {}", store.path().display());
            Arc::new(store)
        }
        None => {
            tracing::warn!("No settings location, changes will not persist");
            Arc::new(MemoryStore::new())
        }
    }
}
