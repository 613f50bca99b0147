//! Key-value storage abstraction.
//!
//! The favorites list is the only thing the plugin persists, and it is stored
//! as a single string value under a well-known key. Backends therefore only
//! need string get/set/remove, synchronously and without transactions.

use crate::domain::error::Result;

/// A string-keyed persistent store.
///
/// # Implementations
///
/// - [`crate::storage::FileStore`]: JSON file with atomic writes (used by the plugin)
/// - [`crate::storage::MemoryStore`]: in-memory map (tests, fallback when the data
///   directory is unavailable)
///
/// # Examples
///
/// ```
/// use zcountries::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set("favorites", "[\"Peru\"]")?;
/// assert_eq!(store.get("favorites")?.as_deref(), Some("[\"Peru\"]"));
/// store.remove("favorites")?;
/// assert_eq!(store.get("favorites")?, None);
/// # Ok::<(), zcountries::ZcountriesError>(())
/// ```
pub trait KeyValueStore {
    /// Reads the value stored under `key`. Returns `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value, and persists it.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<()>;
}
