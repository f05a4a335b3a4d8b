//! Persistent key-value settings.
//!
//! Three independent keys are stored: the shortcut code (integer), the
//! vocalization toggle (bool) and the recent captures (list of strings).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub const SHORTCUT_KEY: &str = "KeyboardShortcut";
pub const VOCALIZATION_KEY: &str = "Vocalization";
pub const RECENT_CAPTURES_KEY: &str = "RecentCaptures";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait SettingsStore: Send + Sync {
    fn load(&self, key: &str) -> Option<Value>;

    fn save(&self, key: &str, value: Value) -> Result<(), SettingsError>;
}

/// Typed read; a value of the wrong shape counts as missing
pub fn load_as<T: DeserializeOwned>(store: &dyn SettingsStore, key: &str) -> Option<T> {
    let value = store.load(key)?;
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Stored setting '{}' has unexpected shape: {}", key, e);
            None
        }
    }
}

pub fn save_as<T: Serialize>(
    store: &dyn SettingsStore,
    key: &str,
    value: &T,
) -> Result<(), SettingsError> {
    let value = serde_json::to_value(value).map_err(|source| SettingsError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.save(key, value)
}

/// Settings kept in a single pretty-printed JSON object on disk.
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store, starting empty when the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = if path.exists() {
            let data = fs::read_to_string(&path).map_err(|source| SettingsError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&data).map_err(|source| SettingsError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            Map::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Like [`JsonFileStore::open`] but a corrupt file is discarded
    pub fn open_or_reset(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Resetting settings: {}", e);
                Self {
                    path,
                    values: Mutex::new(Map::new()),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, values: &Map<String, Value>) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_string_pretty(values).map_err(|source| SettingsError::Encode {
            key: "*".to_string(),
            source,
        })?;
        fs::write(&self.path, data).map_err(io_err)
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<Value> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn save(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value);
        self.write(&values)
    }
}

/// Process-local settings, nothing touches the disk.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Value> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn save(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        {
            let store = JsonFileStore::open(&path).unwrap();
            save_as(&store, SHORTCUT_KEY, &7).unwrap();
            save_as(&store, VOCALIZATION_KEY, &true).unwrap();
            save_as(&store, RECENT_CAPTURES_KEY, &vec!["b", "a"]).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(load_as::<i32>(&store, SHORTCUT_KEY), Some(7));
        assert_eq!(load_as::<bool>(&store, VOCALIZATION_KEY), Some(true));
        assert_eq!(
            load_as::<Vec<String>>(&store, RECENT_CAPTURES_KEY),
            Some(vec!["b".to_string(), "a".to_string()])
        );
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("settings.json")).unwrap();
        assert!(store.load(SHORTCUT_KEY).is_none());
    }

    #[test]
    fn test_corrupt_file_is_reported_then_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(SettingsError::Parse { .. })
        ));

        let store = JsonFileStore::open_or_reset(&path);
        assert!(store.load(VOCALIZATION_KEY).is_none());
        save_as(&store, VOCALIZATION_KEY, &false).unwrap();
        assert_eq!(
            load_as::<bool>(&JsonFileStore::open(&path).unwrap(), VOCALIZATION_KEY),
            Some(false)
        );
    }

    #[test]
    fn test_wrong_shape_reads_as_missing() {
        let store = MemoryStore::new();
        save_as(&store, SHORTCUT_KEY, &"nine").unwrap();
        assert_eq!(load_as::<i32>(&store, SHORTCUT_KEY), None);
    }
}
