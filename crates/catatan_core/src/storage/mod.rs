//! Durable key-value storage boundary.
//!
//! # Responsibility
//! - Define the persistence seam the note store writes through.
//! - Provide an in-memory test double alongside the SQLite adapter.
//!
//! # Invariants
//! - Adapters are `Send + Sync`: the debounced persistence worker saves
//!   from a background thread.
//! - `save` overwrites the previous value for the key atomically.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

mod sqlite;

pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer error for adapter open/load/save operations.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Durable key-value string storage used by the note store.
///
/// One key holds the whole serialized state blob; load happens once at
/// store open, saves are debounced fire-and-forget writes.
pub trait StorageAdapter: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-memory adapter for tests and ephemeral sessions.
///
/// Tracks the number of completed saves so debounce behavior can be
/// asserted deterministically.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    saves: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter pre-seeded with one stored value.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::default();
        storage
            .entries
            .lock()
            .expect("memory storage lock poisoned")
            .insert(key.into(), value.into());
        storage
    }

    /// Number of `save` calls that have completed.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Returns a copy of the value stored under `key`, if any.
    pub fn stored(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("memory storage lock poisoned")
            .get(key)
            .cloned()
    }
}

impl StorageAdapter for MemoryStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.stored(key))
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .lock()
            .expect("memory storage lock poisoned")
            .insert(key.to_string(), value.to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
