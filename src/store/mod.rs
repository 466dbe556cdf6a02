//! Durable key-value slots for saved games.
//!
//! A saved game occupies two slots: the shuffled deck and the move
//! history, each an opaque JSON string.

mod error;
mod memory;
mod models;
mod schema; // Diesel generated schema - internal use only
mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::Slot;
pub use sqlite::{MIGRATIONS, SqliteStore};

/// Read, write and clear named string slots.
pub trait KvStore: Send + Sync + std::fmt::Debug {
    /// Stores `value` under `key`, replacing what was there.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Reads the value under `key`, `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Empties the slot. Clearing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn clear(&self, key: &str) -> Result<(), StoreError>;
}
