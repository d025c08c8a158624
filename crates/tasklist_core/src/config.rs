//! Core configuration values.
//!
//! # Responsibility
//! - Name the key-value entries that hold persisted task state.
//! - Hold the numeric defaults shared by the store and persistence layers.

use serde::{Deserialize, Serialize};

/// Minimum number of characters a new task needs after trimming.
pub const MIN_TASK_TEXT_CHARS: usize = 2;

/// Id counter value for an empty, never-persisted store.
pub const DEFAULT_COUNTER: u64 = 1;

/// Keys of the three independent key-value entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub tasks: String,
    pub counter: String,
    pub filter: String,
}

impl StorageKeys {
    /// Key names used by the browser build (`localStorage`), for reading
    /// state exported from it.
    pub fn legacy_browser() -> Self {
        Self {
            tasks: "todoAppTasks".to_string(),
            counter: "todoAppTaskCounter".to_string(),
            filter: "todoAppFilter".to_string(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            tasks: "tasks".to_string(),
            counter: "taskCounter".to_string(),
            filter: "filter".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StorageKeys;

    #[test]
    fn partial_config_falls_back_to_default_keys() {
        let keys: StorageKeys = serde_json::from_str(r#"{"tasks":"myTasks"}"#).unwrap();
        assert_eq!(keys.tasks, "myTasks");
        assert_eq!(keys.counter, "taskCounter");
        assert_eq!(keys.filter, "filter");
    }
}
