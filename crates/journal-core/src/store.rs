//! Persistence trait for journal entries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::{Entry, NewEntry};

/// Core trait for entry storage operations.
///
/// Implementations handle the actual storage backend (SQLite, in-memory, etc.).
/// Missing ids are never an error: reads return `None`, deletes are no-ops.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Persist a new entry with `created_at = updated_at = now`; the store assigns the id.
    async fn create(&self, entry: &NewEntry, now: DateTime<Utc>) -> Result<Entry>;

    /// All entries in storage order.
    async fn list(&self) -> Result<Vec<Entry>>;

    /// Retrieve an entry by ID.
    async fn get(&self, id: &str) -> Result<Option<Entry>>;

    /// Overwrite the stored record for `entry.id`.
    async fn update(&self, entry: &Entry) -> Result<()>;

    /// Delete an entry.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Delete every entry.
    async fn delete_all(&self) -> Result<()>;
}

#[cfg(feature = "db")]
#[async_trait]
impl EntryStore for crate::db::Database {
    async fn create(&self, entry: &NewEntry, now: DateTime<Utc>) -> Result<Entry> {
        self.create_entry(entry, now)
    }

    async fn list(&self) -> Result<Vec<Entry>> {
        self.list_entries()
    }

    async fn get(&self, id: &str) -> Result<Option<Entry>> {
        self.get_entry(id)
    }

    async fn update(&self, entry: &Entry) -> Result<()> {
        self.update_entry(entry).map(|_| ())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.delete_entry(id).map(|_| ())
    }

    async fn delete_all(&self) -> Result<()> {
        self.delete_all_entries().map(|_| ())
    }
}
