//! Storage layer for rollcall.
//!
//! The original application persisted its state as two JSON documents in
//! browser local storage. This crate keeps those exact document
//! semantics - two keys, JSON array values, ISO 8601 timestamps - in a
//! small key-value table backed by `rusqlite` (browsers back local
//! storage with sqlite themselves).
//!
//! # Thread Safety
//!
//! [`Store`] wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`. The shell is single-threaded, so no synchronization is needed;
//! multi-threaded callers would have to serialize access externally.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use rollcall_core::{AttendanceRecord, Student};

/// Key under which the student roster is stored.
pub const ROSTER_KEY: &str = "attendanceApp-students";

/// Key under which the attendance record log is stored.
pub const RECORDS_KEY: &str = "attendanceApp-records";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A persisted JSON document could not be parsed.
    #[error("corrupt persisted JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store of the two persisted JSON documents.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens a store at the given path, creating it if necessary.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        tracing::debug!(path = %path.display(), "opening store");
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Opens an in-memory store. Useful for testing.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?, ?)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Loads the persisted roster, if any.
    ///
    /// `Ok(None)` means nothing was ever saved; a [`StoreError::Json`]
    /// means the stored document is corrupt and the caller should fall
    /// back to the seed roster.
    pub fn load_roster(&self) -> Result<Option<Vec<Student>>, StoreError> {
        match self.load_raw(ROSTER_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Persists the full roster, replacing the previous document.
    pub fn save_roster(&self, students: &[Student]) -> Result<(), StoreError> {
        let json = serde_json::to_string(students)?;
        self.save_raw(ROSTER_KEY, &json)
    }

    /// Loads the persisted attendance log, if any. Timestamps are parsed
    /// back from their ISO 8601 string form.
    pub fn load_records(&self) -> Result<Option<Vec<AttendanceRecord>>, StoreError> {
        match self.load_raw(RECORDS_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Persists the full attendance log, replacing the previous document.
    pub fn save_records(&self, records: &[AttendanceRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.save_raw(RECORDS_KEY, &json)
    }

    /// Removes both persisted documents (full reset).
    pub fn clear(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "DELETE FROM kv WHERE key IN (?, ?)",
            params![ROSTER_KEY, RECORDS_KEY],
        )?;
        Ok(())
    }
}
