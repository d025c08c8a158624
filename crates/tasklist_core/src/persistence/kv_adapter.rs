//! Persistence adapter writing three independent key-value entries.
//!
//! # Responsibility
//! - Encode tasks as a JSON array, the counter as a decimal string and the
//!   filter as its raw wire name.
//! - Degrade each unreadable entry to its default on load.
//!
//! # Invariants
//! - Entries are written tasks, counter, filter; writing stops at the first
//!   failure.
//! - Task text never appears in log events.

use super::{PersistedState, PersistenceAdapter, StorageError, StorageObserver, StorageOp};
use crate::config::{StorageKeys, DEFAULT_COUNTER};
use crate::kv::KeyValueStore;
use crate::model::task::{Filter, Task, TaskId};
use log::{debug, error, info, warn};
use std::time::Instant;

/// [`PersistenceAdapter`] over any [`KeyValueStore`].
pub struct KvPersistenceAdapter<S> {
    store: S,
    keys: StorageKeys,
    observer: Option<Box<dyn StorageObserver>>,
}

impl<S: KeyValueStore> KvPersistenceAdapter<S> {
    /// Creates an adapter using the default key names.
    pub fn new(store: S) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    pub fn with_keys(store: S, keys: StorageKeys) -> Self {
        Self {
            store,
            keys,
            observer: None,
        }
    }

    /// Registers the observer notified on every storage failure.
    pub fn with_observer(mut self, observer: impl StorageObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Fallible save used by [`PersistenceAdapter::save`].
    pub fn try_save(
        &self,
        tasks: &[Task],
        counter: TaskId,
        filter: Filter,
    ) -> Result<(), StorageError> {
        let encoded_tasks = serde_json::to_string(tasks)?;
        self.write(&self.keys.tasks, &encoded_tasks)?;
        self.write(&self.keys.counter, &counter.to_string())?;
        self.write(&self.keys.filter, filter.as_str())?;
        Ok(())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store
            .set(key, value)
            .map_err(|source| StorageError::Backend {
                key: key.to_string(),
                source,
            })
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store.get(key).map_err(|source| StorageError::Backend {
            key: key.to_string(),
            source,
        })
    }

    fn load_tasks(&self) -> Result<Vec<Task>, StorageError> {
        let key = &self.keys.tasks;
        match self.read(key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|err| StorageError::Malformed {
                key: key.clone(),
                message: err.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn load_counter(&self) -> Result<TaskId, StorageError> {
        let key = &self.keys.counter;
        match self.read(key)? {
            Some(raw) => raw
                .trim()
                .parse::<TaskId>()
                .map_err(|err| StorageError::Malformed {
                    key: key.clone(),
                    message: format!("`{raw}` is not a counter: {err}"),
                }),
            None => Ok(DEFAULT_COUNTER),
        }
    }

    fn load_filter(&self) -> Result<Filter, StorageError> {
        let key = &self.keys.filter;
        match self.read(key)? {
            Some(raw) => raw.parse::<Filter>().map_err(|err| StorageError::Malformed {
                key: key.clone(),
                message: err.to_string(),
            }),
            None => Ok(Filter::All),
        }
    }

    fn recover<T>(&self, result: Result<T, StorageError>, fallback: T) -> T {
        result.unwrap_or_else(|err| {
            warn!(
                "event=state_load module=persistence status=degraded fallback=default error={err}"
            );
            self.report(StorageOp::Load, &err);
            fallback
        })
    }

    fn report(&self, op: StorageOp, err: &StorageError) {
        if let Some(observer) = &self.observer {
            observer.on_storage_error(op, err);
        }
    }
}

impl<S: KeyValueStore> PersistenceAdapter for KvPersistenceAdapter<S> {
    fn save(&self, tasks: &[Task], counter: TaskId, filter: Filter) {
        let started_at = Instant::now();
        match self.try_save(tasks, counter, filter) {
            Ok(()) => debug!(
                "event=state_save module=persistence status=ok tasks={} counter={} filter={} duration_ms={}",
                tasks.len(),
                counter,
                filter,
                started_at.elapsed().as_millis()
            ),
            Err(err) => {
                error!(
                    "event=state_save module=persistence status=error error_code=save_failed error={err}"
                );
                self.report(StorageOp::Save, &err);
            }
        }
    }

    fn load(&self) -> PersistedState {
        let started_at = Instant::now();
        let tasks = self.recover(self.load_tasks(), Vec::new());
        let counter = self.recover(self.load_counter(), DEFAULT_COUNTER);
        let filter = self.recover(self.load_filter(), Filter::All);

        let state = PersistedState::reconcile(tasks, counter, filter);
        info!(
            "event=state_load module=persistence status=ok tasks={} counter={} filter={} duration_ms={}",
            state.tasks.len(),
            state.counter,
            state.filter,
            started_at.elapsed().as_millis()
        );
        state
    }
}
