//! Synchronous string-keyed key-value storage for user data.
//!
//! Writes are best-effort: a failed write is logged and reported as `false`,
//! never raised, so an in-memory mutation always survives a broken disk.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::warn;

use crate::error::{Error, Result};

/// A synchronous string-keyed store of UTF-8 text.
pub trait KeyValueStore {
    /// Stored text for `key`, or `None` when absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`. Returns whether the write landed.
    fn write(&mut self, key: &str, value: &str) -> bool;

    /// Remove `key`. Returns whether an entry existed and was removed.
    fn remove(&mut self, key: &str) -> bool;
}

/// Store backed by one file per key under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|_| Error::StorageDirUnavailable { path: dir.clone() })?;
        Ok(Self { dir })
    }

    /// Open a store in the platform-default data directory.
    pub fn open_default() -> Result<Self> {
        let dirs =
            ProjectDirs::from("com", "broadside", "broadside").ok_or(Error::ProjectDirsUnavailable)?;
        Self::open(dirs.data_dir())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        let path = self.path_for(key);
        match fs::write(&path, value) {
            Ok(()) => true,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to persist key");
                false
            }
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => false,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to remove key");
                false
            }
        }
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    /// When set, writes report failure without storing.
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        if self.fail_writes {
            return false;
        }
        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(store.read("builds").is_none());
        assert!(store.write("builds", "{}"));
        assert_eq!(store.read("builds").as_deref(), Some("{}"));
        assert!(store.remove("builds"));
        assert!(!store.remove("builds"));
    }

    #[test]
    fn memory_store_failure_mode_drops_writes() {
        let mut store = MemoryStore::new();
        store.fail_writes = true;
        assert!(!store.write("builds", "{}"));
        assert!(store.read("builds").is_none());
    }
}
