//! JSON file-based key-value store.
//!
//! The whole store is one small JSON document kept in memory and rewritten on
//! every change. Writes go to a temporary file that is then renamed over the
//! target, so a crash never leaves a half-written file behind.

use crate::domain::error::{Result, ZcountriesError};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// On-disk container.
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "favorites": "[\"Japan\",\"Peru\"]"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// Key-value store persisted as a JSON file.
///
/// Single-threaded by construction: the plugin owns one instance.
#[derive(Debug)]
pub struct FileStore {
    file_path: PathBuf,
    data: StorageData,
}

impl FileStore {
    /// Opens the store at `file_path`, creating parent directories.
    ///
    /// A missing file starts empty. So does an unreadable or corrupt one: its
    /// contents are logged and replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        let _span = tracing::debug_span!("file_store_open", path = %file_path.display()).entered();

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "store file unreadable, starting empty");
                StorageData::default()
            })
        } else {
            tracing::debug!("no store file yet");
            StorageData::default()
        };

        tracing::debug!(entries = data.entries.len(), "store opened");
        Ok(Self { file_path, data })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| ZcountriesError::Storage(format!("failed to parse JSON: {e}")))?;
        if data.version != FORMAT_VERSION {
            tracing::debug!(version = data.version, "store written by a different format version");
        }
        Ok(data)
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| ZcountriesError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = %self.file_path.display(), "store saved");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("file_store_set", key = key).entered();
        let previous = self.data.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.save_to_file() {
            // Keep memory consistent with disk.
            match previous {
                Some(old) => self.data.entries.insert(key.to_string(), old),
                None => self.data.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("file_store_remove", key = key).entered();
        if let Some(old) = self.data.entries.remove(key) {
            if let Err(e) = self.save_to_file() {
                self.data.entries.insert(key.to_string(), old);
                return Err(e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("favorites.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("favorites", r#"["Chile"]"#).unwrap();
        assert!(!path.with_extension("tmp").exists());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("favorites").unwrap().as_deref(), Some(r#"["Chile"]"#));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("favorites").unwrap(), None);

        store.set("favorites", "[]").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"version\": 1"));
    }

    #[test]
    fn remove_absent_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("s.json")).unwrap();
        store.remove("missing").unwrap();
        assert!(!store.path().exists());
    }
}
