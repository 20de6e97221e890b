//! Command implementations for the CLI interface.
//!
//! Each handler works on a `Board` opened over the configured data directory
//! and reports failures as `BoardError` for `main` to print.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::board::Board;
use crate::config::Config;
use crate::db::print_table;
use crate::error::BoardError;
use crate::fields::Status;
use crate::storage::{FileStorage, StorageError};
use crate::store::{TaskStore, STORAGE_KEY};
use crate::task::{Task, TaskId};
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive board (default).
    Ui,

    /// List tasks, grouped by column.
    List {
        /// Only show this column.
        #[arg(long, value_enum)]
        status: Option<Status>,
    },

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Column: todo | doing | done.
        #[arg(long, value_enum, default_value_t = Status::Todo)]
        status: Status,
    },

    /// Update fields on a task.
    Update {
        /// Task ID.
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long, value_enum)]
        status: Option<Status>,
    },

    /// Move a task to another column.
    Move {
        /// Task ID.
        id: String,
        /// Target column.
        #[arg(value_enum)]
        status: Status,
    },

    /// Delete a task.
    Delete {
        /// Task ID.
        id: String,
    },

    /// Throw away the saved board and start over from the seed tasks.
    Reset {
        /// Skip the backup normally taken before resetting.
        #[arg(long)]
        no_backup: bool,
    },

    /// Copy the saved board to <dir>/backup/.
    Backup,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Open the board stored under the configured data directory.
pub fn open_board(config: &Config) -> Result<Board, BoardError> {
    let seed = config.seed_tasks()?;
    let storage = FileStorage::new(&config.data_dir);
    Ok(Board::open(TaskStore::new(Box::new(storage), seed)))
}

/// Launch the terminal user interface.
pub fn cmd_ui(config: &Config) -> Result<(), BoardError> {
    let board = open_board(config)?;
    run_tui(board).map_err(BoardError::Terminal)
}

/// Print tasks column by column.
pub fn cmd_list(board: &Board, status: Option<Status>) {
    let columns: Vec<Status> = match status {
        Some(s) => vec![s],
        None => Status::ALL.to_vec(),
    };
    for (i, s) in columns.iter().enumerate() {
        let Some(column) = board.view().column(*s) else {
            continue;
        };
        if i > 0 {
            println!();
        }
        println!("{}", column.heading);
        let tasks: Vec<&Task> = column.cards.iter().map(|c| c.task()).collect();
        if tasks.is_empty() {
            println!("  (empty)");
        } else {
            print_table(&tasks);
        }
    }
}

pub fn cmd_add(board: &mut Board, title: String, desc: Option<String>, status: Status) -> Result<(), BoardError> {
    let task = board.add_task(&title, desc.as_deref().unwrap_or(""), status)?;
    println!("Added task {}", task.id);
    Ok(())
}

pub fn cmd_update(
    board: &mut Board,
    id: String,
    title: Option<String>,
    desc: Option<String>,
    status: Option<Status>,
) -> Result<(), BoardError> {
    let task = board.update_task(&TaskId::from(id), title, desc, status)?;
    println!("Updated {}", task.id);
    Ok(())
}

pub fn cmd_move(board: &mut Board, id: String, status: Status) -> Result<(), BoardError> {
    let id = TaskId::from(id);
    board.move_task(&id, status)?;
    println!("Moved {} to {}", id, status.label());
    Ok(())
}

pub fn cmd_delete(board: &mut Board, id: String) -> Result<(), BoardError> {
    let task = board.delete_task(&TaskId::from(id))?;
    println!("Deleted {} ({})", task.id, task.title);
    Ok(())
}

/// Create a timestamped copy of the saved board.
///
/// Returns `None` when nothing has been saved yet.
pub fn create_backup(data_dir: &Path) -> Result<Option<PathBuf>, StorageError> {
    let slot = FileStorage::new(data_dir).path_for(STORAGE_KEY);
    if !slot.exists() {
        return Ok(None);
    }
    let backup_dir = data_dir.join("backup");
    fs::create_dir_all(&backup_dir).map_err(|source| StorageError::Io {
        path: backup_dir.clone(),
        source,
    })?;

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let backup_path = backup_dir.join(format!("{timestamp}_{STORAGE_KEY}.json"));
    fs::copy(&slot, &backup_path).map_err(|source| StorageError::Io {
        path: backup_path.clone(),
        source,
    })?;
    tracing::info!(path = %backup_path.display(), "created backup");
    Ok(Some(backup_path))
}

pub fn cmd_backup(config: &Config) -> Result<(), BoardError> {
    match create_backup(&config.data_dir)? {
        Some(path) => println!("Backup created: {}", path.display()),
        None => println!("Nothing to back up yet."),
    }
    Ok(())
}

pub fn cmd_reset(config: &Config, board: &mut Board, no_backup: bool) -> Result<(), BoardError> {
    if !no_backup {
        if let Some(path) = create_backup(&config.data_dir)? {
            println!("Backup created: {}", path.display());
        }
    }
    board.reset()?;
    println!("Board reset ({} tasks).", board.tasks().len());
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
