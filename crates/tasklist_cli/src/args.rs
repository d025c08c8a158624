use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tasklist_core::{Filter, TaskId};

#[derive(Parser, Debug)]
#[command(name = "tasklist")]
#[command(about = "Keep a short list of tasks", long_about = None, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// SQLite file holding the task list
    #[arg(long, global = true, env = "TASKLIST_DB")]
    pub db: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "TASKLIST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true, env = "TASKLIST_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add a task at the top of the list
    #[command(alias = "a")]
    Add {
        /// Task text, at least 2 characters
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List tasks matching the active filter
    #[command(alias = "ls")]
    List {
        /// Switch the active filter before listing
        #[arg(short, long)]
        filter: Option<Filter>,
    },

    /// Mark a task done, or undone again
    #[command(alias = "t")]
    Toggle { id: TaskId },

    /// Replace the text of a task
    #[command(alias = "e")]
    Edit {
        id: TaskId,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete { id: TaskId },

    /// Delete every completed task
    ClearCompleted,

    /// Set the active filter (all|active|completed)
    Filter { filter: Filter },
}
