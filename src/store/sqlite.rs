//! SQLite slot store.

use chrono::Utc;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::store::models::NewSlot;
use crate::store::{KvStore, Slot, StoreError, schema};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Slots persisted in a SQLite database file.
///
/// Each call opens its own connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at `db_path`, creating it and its schema if needed.
    ///
    /// Use `":memory:"` only with care: every call gets a fresh connection,
    /// so an in-memory database does not survive between calls.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        let store = Self { db_path };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migrations failed: {}", e)))?;
        info!(path = %store.db_path, applied = applied.len(), "SqliteStore ready");
        Ok(store)
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Loads the full row for `key`, including when it was last written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn slot(&self, key: &str) -> Result<Option<Slot>, StoreError> {
        let mut conn = self.connection().map_err(|e| e.on_slot(key))?;
        schema::slots::table
            .find(key)
            .select(Slot::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| StoreError::from(e).on_slot(key))
    }
}

impl KvStore for SqliteStore {
    #[instrument(skip(self, value), fields(len = value.len()))]
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().map_err(|e| e.on_slot(key))?;
        let row = NewSlot::new(key.to_string(), value.to_string(), Utc::now().naive_utc());
        diesel::replace_into(schema::slots::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| StoreError::from(e).on_slot(key))?;
        debug!("Slot written");
        Ok(())
    }

    #[instrument(skip(self))]
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().map_err(|e| e.on_slot(key))?;
        let value = schema::slots::table
            .find(key)
            .select(schema::slots::value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(|e| StoreError::from(e).on_slot(key))?;
        debug!(found = value.is_some(), "Slot read");
        Ok(value)
    }

    #[instrument(skip(self))]
    fn clear(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().map_err(|e| e.on_slot(key))?;
        let removed = diesel::delete(schema::slots::table.find(key))
            .execute(&mut conn)
            .map_err(|e| StoreError::from(e).on_slot(key))?;
        debug!(removed, "Slot cleared");
        Ok(())
    }
}
