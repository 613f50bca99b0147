//! Persistence for the favorites list.
//!
//! # Modules
//!
//! - `backend`: the [`KeyValueStore`] trait
//! - `file`: JSON file store with atomic writes
//! - `memory`: in-memory store
//! - `favorites`: the bounded favorites list on top of a store

pub mod backend;
pub mod favorites;
pub mod file;
pub mod memory;

pub use backend::KeyValueStore;
pub use favorites::{AddOutcome, FavoritesStore, CAPACITY_NOTICE, FAVORITES_KEY, MAX_FAVORITES};
pub use file::FileStore;
pub use memory::MemoryStore;
