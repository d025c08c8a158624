//! Command-line view for the task list.
//!
//! # Responsibility
//! - Resolve the database path and logging configuration.
//! - Build one `TaskStore` and hand it to the `TaskView`.

mod args;
mod view;

use anyhow::{Context, Result};
use args::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use log::info;
use std::path::PathBuf;
use tasklist_core::db::open_db;
use tasklist_core::{
    default_log_level, init_logging, KvPersistenceAdapter, SqliteKeyValueStore, StorageError,
    StorageOp, TaskStore,
};
use view::TaskView;

const DB_FILE_NAME: &str = "tasklist.sqlite3";

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = log_dir.to_string_lossy();
        init_logging(level, &log_dir).map_err(anyhow::Error::msg)?;
    }

    let db_path = resolve_db_path(cli.db)?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open task database `{}`", db_path.display()))?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        tasklist_core::core_version()
    );

    let adapter = KvPersistenceAdapter::new(SqliteKeyValueStore::new(&conn)).with_observer(
        |op: StorageOp, err: &StorageError| {
            eprintln!("warning: failed to {op} tasks: {err}");
        },
    );
    let mut view = TaskView::new(TaskStore::new(adapter));

    let command = cli.command.unwrap_or(Commands::List { filter: None });
    let stdout = std::io::stdout();
    view.run(&command, &mut stdout.lock())?;
    Ok(())
}

fn resolve_db_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let dirs = ProjectDirs::from("org", "tasklist", "tasklist")
        .context("could not determine a data directory; pass --db")?;
    Ok(dirs.data_dir().join(DB_FILE_NAME))
}
