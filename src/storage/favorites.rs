//! Bounded, persisted favorites list.
//!
//! The list lives in memory and is written through to the backend on every
//! mutation as a JSON array of common names under [`FAVORITES_KEY`].

use crate::domain::error::Result;
use crate::storage::backend::KeyValueStore;

/// Storage key holding the JSON array.
pub const FAVORITES_KEY: &str = "favorites";

/// Maximum number of favorites.
pub const MAX_FAVORITES: usize = 5;

/// Notice shown when adding to a full list.
pub const CAPACITY_NOTICE: &str = "You can only have up to 5 favorites!";

/// Result of [`FavoritesStore::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    CapacityReached,
}

impl AddOutcome {
    #[must_use]
    pub const fn is_added(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Owns the favorites list and its backend.
pub struct FavoritesStore {
    backend: Box<dyn KeyValueStore>,
    names: Vec<String>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Wraps `backend` and loads the persisted list.
    #[must_use]
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            backend,
            names: Vec::new(),
        };
        store.names = store.load();
        store
    }

    /// Reads the persisted list.
    ///
    /// A missing key, a read failure or a value that is not a JSON array of
    /// strings all yield an empty list. Duplicates are dropped and the list is
    /// cut to [`MAX_FAVORITES`].
    ///
    /// # Examples
    ///
    /// ```
    /// use zcountries::storage::{FavoritesStore, MemoryStore};
    ///
    /// let backend = MemoryStore::with_entry("favorites", r#"["Peru","Peru","Chile"]"#);
    /// let favorites = FavoritesStore::new(Box::new(backend));
    /// assert_eq!(favorites.names(), ["Peru", "Chile"]);
    /// ```
    #[must_use]
    pub fn load(&self) -> Vec<String> {
        let raw = match self.backend.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::debug!(error = %e, "favorites unreadable");
                return Vec::new();
            }
        };

        let parsed: Vec<String> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "favorites not a JSON string array");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = Vec::with_capacity(MAX_FAVORITES);
        for name in parsed {
            if names.len() == MAX_FAVORITES {
                break;
            }
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Appends `name` unless the list is full or already holds it.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be persisted; the in-memory
    /// list is left unchanged in that case.
    pub fn add(&mut self, name: &str) -> Result<AddOutcome> {
        let _span = tracing::debug_span!("favorites_add", name = name).entered();

        if self.names.len() >= MAX_FAVORITES {
            return Ok(AddOutcome::CapacityReached);
        }
        if self.contains(name) {
            return Ok(AddOutcome::AlreadyPresent);
        }

        let mut updated = self.names.clone();
        updated.push(name.to_string());
        self.persist(updated)?;
        Ok(AddOutcome::Added)
    }

    /// Removes every occurrence of `name` and persists the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be persisted.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let _span = tracing::debug_span!("favorites_remove", name = name).entered();
        let updated: Vec<String> = self.names.iter().filter(|n| *n != name).cloned().collect();
        self.persist(updated)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn persist(&mut self, updated: Vec<String>) -> Result<()> {
        let json = serde_json::to_string(&updated)?;
        self.backend.set(FAVORITES_KEY, &json)?;
        tracing::debug!(count = updated.len(), "favorites saved");
        self.names = updated;
        Ok(())
    }
}
