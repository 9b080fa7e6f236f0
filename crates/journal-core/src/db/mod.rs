//! Direct SQLite database access for the journal.
//!
//! Schema migrations are embedded and applied every time a connection is
//! opened, so a fresh file is usable immediately.

use crate::error::{Error, Result};
use crate::types::{Entry, NewEntry};
use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

const MIGRATIONS: &[&str] = &[include_str!("./migrations/001_entries.sql")];

/// Database connection wrapper.
///
/// Thread-safe via internal Mutex. All database operations acquire the lock.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open database at specific path, creating parent directories as needed
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path).map_err(Error::Database)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        debug!("Opened database at {:?}", path);
        Self::with_connection(conn)
    }

    /// Open a private in-memory database (tests, ephemeral runs)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::Database)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        for migration in MIGRATIONS {
            conn.execute_batch(migration)?;
        }
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Check database connectivity
    pub fn ping(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        conn.execute_batch("SELECT 1").map_err(Error::Database)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entry Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a new entry stamped with `now` and return the stored row
    pub fn create_entry(&self, entry: &NewEntry, now: DateTime<Utc>) -> Result<Entry> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let id = uuid::Uuid::new_v4().to_string();

        conn.execute(
            "INSERT INTO entries (id, work, struggle, intention, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![
                id,
                entry.work,
                entry.struggle,
                entry.intention,
                now.timestamp_millis(),
            ],
        )?;

        let mut stmt = conn.prepare(
            "SELECT id, work, struggle, intention, created_at, updated_at
             FROM entries WHERE id = ?1",
        )?;
        Ok(stmt.query_row(params![id], Self::map_entry)?)
    }

    /// List all entries in insertion order
    pub fn list_entries(&self) -> Result<Vec<Entry>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, work, struggle, intention, created_at, updated_at
             FROM entries ORDER BY rowid",
        )?;
        let entries = stmt
            .query_map([], Self::map_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Get entry by ID
    pub fn get_entry(&self, id: &str) -> Result<Option<Entry>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, work, struggle, intention, created_at, updated_at
             FROM entries WHERE id = ?1",
        )?;

        Ok(stmt.query_row(params![id], Self::map_entry).optional()?)
    }

    /// Overwrite the stored row for `entry.id`. Returns whether a row was hit.
    pub fn update_entry(&self, entry: &Entry) -> Result<bool> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let changed = conn.execute(
            "UPDATE entries
             SET work = ?1, struggle = ?2, intention = ?3, created_at = ?4, updated_at = ?5
             WHERE id = ?6",
            params![
                entry.work,
                entry.struggle,
                entry.intention,
                entry.created_at.timestamp_millis(),
                entry.updated_at.timestamp_millis(),
                entry.id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete entry by ID. Returns whether a row was removed.
    pub fn delete_entry(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let changed = conn.execute("DELETE FROM entries WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Delete every entry. Returns the number of rows removed.
    pub fn delete_all_entries(&self) -> Result<usize> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        Ok(conn.execute("DELETE FROM entries", [])?)
    }

    /// Count stored entries
    pub fn count_entries(&self) -> Result<u64> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn map_entry(row: &rusqlite::Row) -> rusqlite::Result<Entry> {
        Ok(Entry {
            id: row.get(0)?,
            work: row.get(1)?,
            struggle: row.get(2)?,
            intention: row.get(3)?,
            created_at: millis_to_datetime(4, row.get(4)?)?,
            updated_at: millis_to_datetime(5, row.get(5)?)?,
        })
    }
}

fn millis_to_datetime(idx: usize, millis: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp out of range: {}", millis).into(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::timestamp_now;
    use chrono::Duration;

    fn new_entry(work: &str) -> NewEntry {
        NewEntry {
            work: work.to_string(),
            struggle: "struggle".to_string(),
            intention: "intention".to_string(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let db = Database::open_in_memory().unwrap();
        let now = timestamp_now();

        let created = db.create_entry(&new_entry("X"), now).unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.created_at, now);
        assert_eq!(created.updated_at, now);

        let fetched = db.get_entry(&created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_entry("does-not-exist").unwrap().is_none());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let db = Database::open_in_memory().unwrap();
        let now = timestamp_now();
        for work in ["first", "second", "third"] {
            db.create_entry(&new_entry(work), now).unwrap();
        }

        let works: Vec<String> = db
            .list_entries()
            .unwrap()
            .into_iter()
            .map(|e| e.work)
            .collect();
        assert_eq!(works, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_update_overwrites_row() {
        let db = Database::open_in_memory().unwrap();
        let now = timestamp_now();
        let mut entry = db.create_entry(&new_entry("X"), now).unwrap();

        entry.work = "changed".to_string();
        entry.updated_at = now + Duration::seconds(5);
        assert!(db.update_entry(&entry).unwrap());

        let fetched = db.get_entry(&entry.id).unwrap().unwrap();
        assert_eq!(fetched.work, "changed");
        assert_eq!(fetched.created_at, now);
        assert_eq!(fetched.updated_at, now + Duration::seconds(5));
    }

    #[test]
    fn test_update_missing_row_reports_false() {
        let db = Database::open_in_memory().unwrap();
        let now = timestamp_now();
        let ghost = Entry {
            id: "ghost".to_string(),
            work: String::new(),
            struggle: String::new(),
            intention: String::new(),
            created_at: now,
            updated_at: now,
        };
        assert!(!db.update_entry(&ghost).unwrap());
        assert_eq!(db.count_entries().unwrap(), 0);
    }

    #[test]
    fn test_delete_and_delete_all() {
        let db = Database::open_in_memory().unwrap();
        let now = timestamp_now();
        let a = db.create_entry(&new_entry("a"), now).unwrap();
        db.create_entry(&new_entry("b"), now).unwrap();
        db.create_entry(&new_entry("c"), now).unwrap();

        assert!(db.delete_entry(&a.id).unwrap());
        assert!(!db.delete_entry(&a.id).unwrap());
        assert_eq!(db.count_entries().unwrap(), 2);

        assert_eq!(db.delete_all_entries().unwrap(), 2);
        assert!(db.list_entries().unwrap().is_empty());
    }

    #[test]
    fn test_open_path_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("journal.db");
        let now = timestamp_now();

        let id = {
            let db = Database::open_path(&path).unwrap();
            db.ping().unwrap();
            db.create_entry(&new_entry("persisted"), now).unwrap().id
        };

        let db = Database::open_path(&path).unwrap();
        let entry = db.get_entry(&id).unwrap().unwrap();
        assert_eq!(entry.work, "persisted");
    }
}
