//! In-process slot store.

use crate::store::{KvStore, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument};

/// Slots held in memory, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.slots
            .lock()
            .map_err(|e| StoreError::new(format!("Slot map poisoned: {}", e)))
    }
}

impl KvStore for MemoryStore {
    #[instrument(skip(self, value), fields(len = value.len()))]
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots()
            .map_err(|e| e.on_slot(key))?
            .insert(key.to_string(), value.to_string());
        debug!("Slot written");
        Ok(())
    }

    #[instrument(skip(self))]
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .slots()
            .map_err(|e| e.on_slot(key))?
            .get(key)
            .cloned();
        debug!(found = value.is_some(), "Slot read");
        Ok(value)
    }

    #[instrument(skip(self))]
    fn clear(&self, key: &str) -> Result<(), StoreError> {
        self.slots().map_err(|e| e.on_slot(key))?.remove(key);
        debug!("Slot cleared");
        Ok(())
    }
}
