//! Named string slots: the persistence behind the favorites ledger.
//!
//! [`MemoryStore`] backs tests and ephemeral sessions; [`FileStore`] keeps
//! one JSON file per slot under a data directory.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::StoreError;

/// A durable key-value slot store.
///
/// A missing slot reads as `Ok(None)`. Writes replace the whole value.
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StoreError`] if the slot exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the value cannot be stored.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        // A poisoned lock still holds consistent data: every write is a
        // single insert.
        let slots = self
            .slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each slot as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file that is then renamed over the slot,
/// so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        let write_err = |source| StoreError::Write {
            path: path.display().to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        let mut file = std::fs::File::create(&tmp).map_err(write_err)?;
        file.write_all(value.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);
        std::fs::rename(&tmp, &path).map_err(write_err)?;

        tracing::debug!(key, path = %path.display(), "slot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("slot").unwrap(), None);
        store.set("slot", "[1,2]").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn file_store_creates_directory_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path().join("nested"));

        assert_eq!(store.get("homefinder_favorites").unwrap(), None);
        store.set("homefinder_favorites", "[1]").unwrap();
        store.set("homefinder_favorites", "[1,2]").unwrap();

        assert_eq!(
            store.get("homefinder_favorites").unwrap().as_deref(),
            Some("[1,2]")
        );
        assert!(tmp.path().join("nested/homefinder_favorites.json").exists());
        assert!(!tmp.path().join("nested/.homefinder_favorites.json.tmp").exists());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::new(tmp.path());
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));
    }
}
