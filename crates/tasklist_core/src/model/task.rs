//! Task domain model.
//!
//! # Responsibility
//! - Define the task record, its id type and the view filter.
//! - Validate and normalize user-entered task text.
//!
//! # Invariants
//! - `id` is positive and never reused for another task.
//! - `text` is stored trimmed.
//! - `created_at` has millisecond precision and never changes after creation.

use crate::config::MIN_TASK_TEXT_CHARS;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Identifier minted from the store's id counter.
pub type TaskId = u64;

/// Validation failure for user-entered task text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("task text must be at least {min} characters long, got {actual}")]
    TextTooShort { min: usize, actual: usize },
}

/// One user-visible to-do item.
///
/// Serialized with the `createdAt` wire name so persisted entries keep the
/// browser build's layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates an active task stamped with the current time.
    ///
    /// `text` is trimmed; callers validate it first with
    /// [`validate_task_text`].
    pub fn new(id: TaskId, text: &str) -> Self {
        Self::with_created_at(id, text, Utc::now())
    }

    /// Creates an active task with a caller-provided creation time.
    ///
    /// The timestamp is truncated to milliseconds.
    pub fn with_created_at(id: TaskId, text: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.trim().to_string(),
            completed: false,
            created_at: created_at.trunc_subsecs(3),
        }
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

/// Checks the minimum-length rule applied when a task is created.
///
/// Returns the trimmed text on success. Length is counted in characters,
/// not bytes.
pub fn validate_task_text(text: &str) -> Result<&str, TaskValidationError> {
    let trimmed = text.trim();
    let actual = trimmed.chars().count();
    if actual < MIN_TASK_TEXT_CHARS {
        return Err(TaskValidationError::TextTooShort {
            min: MIN_TASK_TEXT_CHARS,
            actual,
        });
    }
    Ok(trimmed)
}

/// View predicate restricting which tasks are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Stable wire name, also the persisted value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown filter name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter `{0}`; expected all|active|completed")]
pub struct ParseFilterError(pub String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

/// Per-filter task totals over the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            all: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }

    /// Count matching `filter`.
    pub fn for_filter(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.all,
            Filter::Active => self.active,
            Filter::Completed => self.completed,
        }
    }

    /// Share of completed tasks, rounded to the nearest whole percent.
    ///
    /// Returns 0 for an empty collection.
    pub fn completion_percent(&self) -> u8 {
        if self.all == 0 {
            return 0;
        }
        let percent = (self.completed as f64 / self.all as f64 * 100.0).round();
        percent as u8
    }
}

/// `createdAt` as an ISO-8601 string with millisecond precision and `Z`.
mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Formats a timestamp the way it is persisted.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::{validate_task_text, Filter, Task, TaskCounts, TaskValidationError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn validate_trims_and_counts_chars() {
        assert_eq!(validate_task_text("  Buy milk \n").unwrap(), "Buy milk");
        assert_eq!(validate_task_text("éé").unwrap(), "éé");
        assert_eq!(
            validate_task_text("  x  ").unwrap_err(),
            TaskValidationError::TextTooShort { min: 2, actual: 1 }
        );
        assert_eq!(
            validate_task_text("   ").unwrap_err(),
            TaskValidationError::TextTooShort { min: 2, actual: 0 }
        );
    }

    #[test]
    fn new_task_is_trimmed_and_active() {
        let task = Task::new(3, "  walk dog ");
        assert_eq!(task.id, 3);
        assert_eq!(task.text, "walk dog");
        assert!(!task.completed);
        assert_eq!(task.created_at.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn filter_parses_wire_names_only() {
        for filter in Filter::ALL {
            assert_eq!(filter.as_str().parse::<Filter>().unwrap(), filter);
        }
        assert!("Active".parse::<Filter>().is_err());
        assert!("".parse::<Filter>().is_err());
    }

    #[test]
    fn task_serializes_browser_layout() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let task = Task::with_created_at(7, "Buy milk", created_at);

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "text": "Buy milk",
                "completed": false,
                "createdAt": "2024-03-01T09:30:00.000Z"
            })
        );
    }

    #[test]
    fn counts_and_percent() {
        let mut tasks = vec![Task::new(1, "aa"), Task::new(2, "bb"), Task::new(3, "cc")];
        tasks[0].toggle();

        let counts = TaskCounts::from_tasks(&tasks);
        assert_eq!(
            counts,
            TaskCounts {
                all: 3,
                active: 2,
                completed: 1
            }
        );
        assert_eq!(counts.for_filter(Filter::Active), 2);
        assert_eq!(counts.completion_percent(), 33);
        assert_eq!(TaskCounts::default().completion_percent(), 0);
    }
}
