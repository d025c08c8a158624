//! Terminal view over an injected task store.
//!
//! # Responsibility
//! - Translate parsed commands into store operations.
//! - Render the filtered list, counters and progress line.
//!
//! # Invariants
//! - The view never touches persistence; it only calls store operations.

use crate::args::Commands;
use std::io::{self, Write};
use tasklist_core::model::task::format_timestamp;
use tasklist_core::{PersistenceAdapter, TaskStore};

/// Renders and drives one [`TaskStore`].
pub struct TaskView<P: PersistenceAdapter> {
    store: TaskStore<P>,
}

impl<P: PersistenceAdapter> TaskView<P> {
    pub fn new(store: TaskStore<P>) -> Self {
        Self { store }
    }

    /// Applies `command` and writes user-facing output to `out`.
    ///
    /// Validation failures are reported on `out` and do not fail the call.
    pub fn run(&mut self, command: &Commands, out: &mut impl Write) -> io::Result<()> {
        match command {
            Commands::Add { text } => match self.store.add_task(&text.join(" ")) {
                Ok(task) => writeln!(out, "Added task {}.", task.id)?,
                Err(err) => writeln!(out, "Not added: {err}.")?,
            },
            Commands::List { filter } => {
                if let Some(filter) = filter {
                    self.store.set_filter(*filter);
                }
            }
            Commands::Toggle { id } => match self.store.toggle_task(*id) {
                Some(true) => writeln!(out, "Task {id} completed.")?,
                Some(false) => writeln!(out, "Task {id} marked as pending.")?,
                None => writeln!(out, "No task {id}.")?,
            },
            Commands::Edit { id, text } => {
                if self.store.edit_task(*id, &text.join(" ")) {
                    writeln!(out, "Task {id} updated.")?;
                } else {
                    writeln!(out, "Task {id} unchanged.")?;
                }
            }
            Commands::Delete { id } => {
                if self.store.delete_task(*id) {
                    writeln!(out, "Task {id} deleted.")?;
                } else {
                    writeln!(out, "No task {id}.")?;
                }
            }
            Commands::ClearCompleted => match self.store.clear_completed() {
                0 => writeln!(out, "No completed tasks to clear.")?,
                1 => writeln!(out, "Cleared 1 completed task.")?,
                removed => writeln!(out, "Cleared {removed} completed tasks.")?,
            },
            Commands::Filter { filter } => self.store.set_filter(*filter),
        }
        self.render(out)
    }

    /// Writes the filtered list followed by the summary line.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let tasks = self.store.filtered_tasks();
        if tasks.is_empty() {
            if self.store.tasks().is_empty() {
                writeln!(out, "No tasks yet.")?;
            } else {
                writeln!(out, "No {} tasks.", self.store.filter())?;
            }
        }
        for task in tasks {
            let mark = if task.completed { 'x' } else { ' ' };
            writeln!(
                out,
                "[{mark}] {:>3}  {}  ({})",
                task.id,
                task.text,
                format_timestamp(&task.created_at)
            )?;
        }

        let counts = self.store.counts();
        writeln!(
            out,
            "filter={} all={} active={} completed={} progress={}%",
            self.store.filter(),
            counts.all,
            counts.active,
            counts.completed,
            counts.completion_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::TaskView;
    use crate::args::Commands;
    use tasklist_core::{
        Filter, KvPersistenceAdapter, MemoryKeyValueStore, PersistenceAdapter, TaskStore,
    };

    fn run(view: &mut TaskView<impl PersistenceAdapter>, command: Commands) -> String {
        let mut out = Vec::new();
        view.run(&command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_toggle_and_filter_render_expected_lines() {
        let kv = MemoryKeyValueStore::new();
        let mut view = TaskView::new(TaskStore::new(KvPersistenceAdapter::new(&kv)));

        let output = run(
            &mut view,
            Commands::Add {
                text: vec!["Buy".to_string(), "milk".to_string()],
            },
        );
        assert!(output.starts_with("Added task 1.\n[ ]   1  Buy milk  ("));
        assert!(output.ends_with("filter=all all=1 active=1 completed=0 progress=0%\n"));

        let output = run(&mut view, Commands::Toggle { id: 1 });
        assert!(output.contains("Task 1 completed."));
        assert!(output.contains("[x]   1  Buy milk"));

        let output = run(
            &mut view,
            Commands::List {
                filter: Some(Filter::Active),
            },
        );
        assert_eq!(
            output,
            "No active tasks.\nfilter=active all=1 active=0 completed=1 progress=100%\n"
        );
    }

    #[test]
    fn short_text_is_reported_not_added() {
        let kv = MemoryKeyValueStore::new();
        let mut view = TaskView::new(TaskStore::new(KvPersistenceAdapter::new(&kv)));

        let output = run(
            &mut view,
            Commands::Add {
                text: vec!["x".to_string()],
            },
        );
        assert!(output.starts_with("Not added: task text must be at least 2 characters long"));
        assert!(output.contains("No tasks yet.\n"));
    }

    #[test]
    fn clear_completed_reports_count() {
        let kv = MemoryKeyValueStore::new();
        let mut view = TaskView::new(TaskStore::new(KvPersistenceAdapter::new(&kv)));

        let output = run(&mut view, Commands::ClearCompleted);
        assert!(output.starts_with("No completed tasks to clear.\nNo tasks yet.\n"));
    }
}
