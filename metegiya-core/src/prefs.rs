//! Persistent preference storage.
//!
//! Ordered string lists, one JSON file per key under the application data
//! directory. Loading is total: a missing or unreadable file, or content
//! that is not a JSON array of strings, yields the empty list. Saving
//! overwrites the whole list; writes are single-writer and last-write-wins,
//! so no versioning or merge logic exists.

use crate::error::Result;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Storage keys used by the application.
pub mod keys {
    /// Trusted phone numbers, insertion order preserved.
    pub const TRUSTED_NUMBERS: &str = "trusted_numbers";
    /// Names of map packs whose simulated download completed.
    pub const DOWNLOADED_MAPS: &str = "downloaded_maps";
}

/// File-backed store for ordered lists of strings.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    dir: PathBuf,
}

impl PreferenceStore {
    /// Create a store rooted at `dir`. The directory is created on first
    /// save, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the per-key files.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Path of the JSON file backing `key`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Load the list stored under `key`.
    ///
    /// Never fails: absence and corruption both degrade to an empty list,
    /// with corruption logged at warn level.
    pub fn load(&self, key: &str) -> Vec<String> {
        let path = self.key_path(key);
        if !path.exists() {
            debug!("No stored value for {}, starting empty", key);
            return Vec::new();
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(values) => {
                debug!("Loaded {} entries for {}", values.len(), key);
                values
            }
            Err(e) => {
                warn!("Discarding corrupt value for {}: {}", key, e);
                Vec::new()
            }
        }
    }

    /// Overwrite the list stored under `key` with `values`.
    pub fn save(&self, key: &str, values: &[String]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(values)?;
        fs::write(self.key_path(key), json)?;
        debug!("Saved {} entries for {}", values.len(), key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, PreferenceStore) {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_load_missing_key_yields_empty() {
        let (_dir, store) = store();
        assert!(store.load(keys::TRUSTED_NUMBERS).is_empty());
        assert!(store.load(keys::DOWNLOADED_MAPS).is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_dir, store) = store();
        let values = vec!["+971501111111".to_string(), "999".to_string()];
        store.save(keys::TRUSTED_NUMBERS, &values).unwrap();
        assert_eq!(store.load(keys::TRUSTED_NUMBERS), values);
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let (_dir, store) = store();
        store
            .save(keys::DOWNLOADED_MAPS, &["old".to_string()])
            .unwrap();
        store
            .save(keys::DOWNLOADED_MAPS, &["new".to_string()])
            .unwrap();
        assert_eq!(store.load(keys::DOWNLOADED_MAPS), vec!["new".to_string()]);
    }

    #[test]
    fn test_keys_are_independent() {
        let (_dir, store) = store();
        store
            .save(keys::TRUSTED_NUMBERS, &["+971501111111".to_string()])
            .unwrap();
        assert!(store.load(keys::DOWNLOADED_MAPS).is_empty());
    }

    #[test]
    fn test_corrupt_content_yields_empty() {
        let (_dir, store) = store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.key_path("broken"), "{ not json").unwrap();
        assert!(store.load("broken").is_empty());
    }

    #[test]
    fn test_wrong_shape_yields_empty() {
        let (_dir, store) = store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.key_path("shape"), r#"{"a": 1}"#).unwrap();
        assert!(store.load("shape").is_empty());

        fs::write(store.key_path("shape"), "[1, 2, 3]").unwrap();
        assert!(store.load("shape").is_empty());
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path().join("nested"));
        store.save("k", &["v".to_string()]).unwrap();
        assert_eq!(store.load("k"), vec!["v".to_string()]);
    }

    #[test]
    fn test_empty_list_round_trips() {
        let (_dir, store) = store();
        store.save(keys::TRUSTED_NUMBERS, &[]).unwrap();
        assert!(store.key_path(keys::TRUSTED_NUMBERS).exists());
        assert!(store.load(keys::TRUSTED_NUMBERS).is_empty());
    }
}
