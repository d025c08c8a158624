//! Core state management for the task list.
//! This crate is the single source of truth for task invariants.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod store;

pub use config::StorageKeys;
pub use kv::{KeyValueStore, KvError, MemoryKeyValueStore, SqliteKeyValueStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Filter, ParseFilterError, Task, TaskCounts, TaskId, TaskValidationError};
pub use persistence::{
    KvPersistenceAdapter, PersistedState, PersistenceAdapter, StorageError, StorageObserver,
    StorageOp,
};
pub use store::task_store::{TaskError, TaskResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
