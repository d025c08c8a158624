//! Task store: sole owner of the task collection, id counter and filter.
//!
//! # Responsibility
//! - Apply add/toggle/edit/delete/clear/filter commands to in-memory state.
//! - Mirror every applied change to the persistence adapter.
//! - Answer filtered and aggregate queries for the view layer.
//!
//! # Invariants
//! - Task ids are pairwise distinct and strictly below `next_id`.
//! - Ids are never reused, even after deletion.
//! - New tasks are inserted at index 0.
//! - A change is applied in memory first, then saved exactly once.
//! - Commands on an absent id, blank edits, rejected adds and clearing with
//!   nothing completed do not save.

use crate::model::task::{
    validate_task_text, Filter, Task, TaskCounts, TaskId, TaskValidationError,
};
use crate::persistence::PersistenceAdapter;
use log::{debug, warn};
use thiserror::Error;

pub type TaskResult<T> = Result<T, TaskError>;

/// Error surfaced to the view for a rejected command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// The id counter has no successor left to hand out.
    #[error("task ids are exhausted")]
    IdsExhausted,
}

/// In-memory task state backed by a [`PersistenceAdapter`].
pub struct TaskStore<P: PersistenceAdapter> {
    adapter: P,
    tasks: Vec<Task>,
    next_id: TaskId,
    filter: Filter,
}

impl<P: PersistenceAdapter> TaskStore<P> {
    /// Creates a store and synchronously loads persisted state.
    pub fn new(adapter: P) -> Self {
        let state = adapter.load();
        debug!(
            "event=store_init module=store status=ok tasks={} next_id={} filter={}",
            state.tasks.len(),
            state.counter,
            state.filter
        );
        Self {
            adapter,
            tasks: state.tasks,
            next_id: state.counter,
            filter: state.filter,
        }
    }

    /// Adds a task at the front of the collection.
    ///
    /// # Errors
    /// - `TaskError::Validation` when the trimmed text is shorter than two
    ///   characters. Nothing is changed or saved.
    /// - `TaskError::IdsExhausted` when `next_id` cannot be advanced.
    pub fn add_task(&mut self, text: &str) -> TaskResult<Task> {
        let text = validate_task_text(text)?;
        let Some(following) = self.next_id.checked_add(1) else {
            warn!(
                "event=task_add module=store status=error reason=ids_exhausted next_id={}",
                self.next_id
            );
            return Err(TaskError::IdsExhausted);
        };
        let task = Task::new(self.next_id, text);
        self.next_id = following;
        self.tasks.insert(0, task.clone());
        debug!(
            "event=task_add module=store status=ok id={} next_id={}",
            task.id, self.next_id
        );
        self.persist();
        Ok(task)
    }

    /// Removes the task with `id`. Returns `false` when it was absent.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.tasks.remove(index);
        debug!("event=task_delete module=store status=ok id={id}");
        self.persist();
        true
    }

    /// Flips completion of the task with `id`.
    ///
    /// Returns the new completion state, or `None` when absent.
    pub fn toggle_task(&mut self, id: TaskId) -> Option<bool> {
        let completed = self.tasks.iter_mut().find(|task| task.id == id)?.toggle();
        debug!("event=task_toggle module=store status=ok id={id} completed={completed}");
        self.persist();
        Some(completed)
    }

    /// Replaces the text of the task with `id` by the trimmed `new_text`.
    ///
    /// Unlike [`TaskStore::add_task`], only blank text is refused; a single
    /// character is accepted. Returns whether the edit was applied and saved.
    pub fn edit_task(&mut self, id: TaskId, new_text: &str) -> bool {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return false;
        };
        task.text = trimmed.to_string();
        debug!("event=task_edit module=store status=ok id={id}");
        self.persist();
        true
    }

    /// Switches the active filter. The collection is untouched.
    ///
    /// Always saves, so repeating the current filter rewrites durable state.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        debug!("event=filter_set module=store status=ok filter={filter}");
        self.persist();
    }

    /// Removes every completed task and returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();
        if removed == 0 {
            return 0;
        }
        debug!("event=clear_completed module=store status=ok removed={removed}");
        self.persist();
        removed
    }

    /// Tasks matching the current filter, in collection order.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// Full collection, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Id the next added task will receive.
    pub fn next_id(&self) -> TaskId {
        self.next_id
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::from_tasks(&self.tasks)
    }

    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|task| task.completed)
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn persist(&self) {
        self.adapter.save(&self.tasks, self.next_id, self.filter);
    }
}
