//! Durable key-value storage contracts and implementations.
//!
//! # Responsibility
//! - Define the string-to-string store that persisted task state lives in.
//! - Keep SQL and in-memory details behind one trait.
//!
//! # Invariants
//! - Values are opaque strings; encoding belongs to the persistence layer.
//! - `set` replaces any existing value for the key.

use crate::db::DbError;
use thiserror::Error;

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type KvResult<T> = Result<T, KvError>;

/// Failure of the underlying key-value backend.
#[derive(Debug, Error)]
pub enum KvError {
    #[error(transparent)]
    Db(#[from] DbError),
    /// Backend refused the operation (disabled, full, simulated failure).
    #[error("key-value store unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Minimal key-value interface in the shape of browser local storage.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when the key has never been written or was removed.
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> KvResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        (**self).remove(key)
    }
}
