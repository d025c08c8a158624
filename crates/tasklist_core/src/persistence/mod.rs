//! Persistence boundary for task state.
//!
//! # Responsibility
//! - Define the `save`/`load` contract the task store depends on.
//! - Define storage error reporting that never interrupts the caller.
//!
//! # Invariants
//! - `load` always returns a complete, internally consistent state.
//! - `save` never returns an error; failures go to the log and the observer.
//! - Loaded task ids are positive, pairwise distinct and below the loaded counter.

use crate::config::DEFAULT_COUNTER;
use crate::kv::KvError;
use crate::model::task::{Filter, Task, TaskId};
use log::warn;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use thiserror::Error;

mod kv_adapter;

pub use kv_adapter::KvPersistenceAdapter;

/// Recoverable persistence failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key-value backend failed to read or write `key`.
    #[error("storage backend failed for key `{key}`: {source}")]
    Backend {
        key: String,
        #[source]
        source: KvError,
    },
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A stored value could not be decoded.
    #[error("malformed persisted value for key `{key}`: {message}")]
    Malformed { key: String, message: String },
}

/// Which side of the round-trip failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Save,
    Load,
}

impl Display for StorageOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Save => "save",
            Self::Load => "load",
        })
    }
}

/// Receives storage failures, e.g. to show a notification in the view.
pub trait StorageObserver {
    fn on_storage_error(&self, op: StorageOp, error: &StorageError);
}

impl<F> StorageObserver for F
where
    F: Fn(StorageOp, &StorageError),
{
    fn on_storage_error(&self, op: StorageOp, error: &StorageError) {
        self(op, error)
    }
}

/// Task state as read from or written to durable storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedState {
    /// Newest first.
    pub tasks: Vec<Task>,
    pub counter: TaskId,
    pub filter: Filter,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            counter: DEFAULT_COUNTER,
            filter: Filter::All,
        }
    }
}

impl PersistedState {
    /// Builds a consistent state from possibly inconsistent parts.
    ///
    /// Drops tasks whose id is zero or leaves no room for a successor, drops
    /// repeated ids (first occurrence wins), raises a counter below
    /// `DEFAULT_COUNTER` and raises the counter above the highest id.
    pub fn reconcile(tasks: Vec<Task>, counter: TaskId, filter: Filter) -> Self {
        let before = tasks.len();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| task.id != 0 && task.id.checked_add(1).is_some())
            .collect();
        if tasks.len() != before {
            warn!(
                "event=state_reconcile module=persistence status=ok dropped_invalid_ids={}",
                before - tasks.len()
            );
        }

        let mut seen = HashSet::with_capacity(tasks.len());
        let before = tasks.len();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| seen.insert(task.id))
            .collect();
        if tasks.len() != before {
            warn!(
                "event=state_reconcile module=persistence status=ok dropped_duplicates={}",
                before - tasks.len()
            );
        }

        let mut effective = counter.max(DEFAULT_COUNTER);
        let successor = tasks
            .iter()
            .map(|task| task.id)
            .max()
            .and_then(|max_id| max_id.checked_add(1));
        if let Some(successor) = successor {
            if successor > effective {
                warn!(
                    "event=counter_corrected module=persistence status=ok from={} to={}",
                    effective, successor
                );
                effective = successor;
            }
        }

        Self {
            tasks,
            counter: effective,
            filter,
        }
    }
}

/// Durable round-trip of task state.
pub trait PersistenceAdapter {
    /// Writes all three values; failures are reported, never returned.
    fn save(&self, tasks: &[Task], counter: TaskId, filter: Filter);
    /// Reads all three values, substituting defaults for anything unusable.
    fn load(&self) -> PersistedState;
}

impl<A: PersistenceAdapter + ?Sized> PersistenceAdapter for Box<A> {
    fn save(&self, tasks: &[Task], counter: TaskId, filter: Filter) {
        (**self).save(tasks, counter, filter)
    }

    fn load(&self) -> PersistedState {
        (**self).load()
    }
}

#[cfg(test)]
mod tests {
    use super::PersistedState;
    use crate::model::task::{Filter, Task};

    #[test]
    fn reconcile_raises_counter_past_max_id() {
        let tasks = vec![Task::new(5, "five"), Task::new(3, "three")];
        let state = PersistedState::reconcile(tasks, 2, Filter::Active);
        assert_eq!(state.counter, 6);
        assert_eq!(state.filter, Filter::Active);
    }

    #[test]
    fn reconcile_keeps_higher_counter() {
        let state = PersistedState::reconcile(vec![Task::new(2, "two")], 10, Filter::All);
        assert_eq!(state.counter, 10);
    }

    #[test]
    fn reconcile_drops_repeated_ids_and_zero_counter() {
        let tasks = vec![Task::new(1, "first"), Task::new(1, "again")];
        let state = PersistedState::reconcile(tasks, 0, Filter::All);
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].text, "first");
        assert_eq!(state.counter, 2);

        let empty = PersistedState::reconcile(Vec::new(), 0, Filter::All);
        assert_eq!(empty, PersistedState::default());
    }

    #[test]
    fn reconcile_drops_zero_and_unfollowable_ids() {
        let tasks = vec![
            Task::new(0, "zero"),
            Task::new(u64::MAX, "last"),
            Task::new(4, "four"),
        ];
        let state = PersistedState::reconcile(tasks, 2, Filter::All);
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].id, 4);
        assert_eq!(state.counter, 5);
    }
}
