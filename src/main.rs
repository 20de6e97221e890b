//! # tb - a three-column task board
//!
//! Tasks live in one of three columns (todo, doing, done) and are saved to a
//! single JSON slot after every change. The board can be driven from an
//! interactive terminal UI or from plain subcommands.
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the board
//! tb
//!
//! # Add a task from the shell
//! tb add "Write release notes" --desc "Cover the new shortcuts" --status doing
//!
//! # Move it along
//! tb move 7 done
//!
//! # Print the board
//! tb list
//! ```
//!
//! Data is stored in `~/.taskboard/tasks.json` (override with `--dir` or
//! `TASKBOARD_DIR`). When nothing has been saved yet, or the saved file
//! cannot be read, the board starts from a seed list: the built-in one, or
//! the JSON array named by `--seed` / `TASKBOARD_SEED`.
//!
//! Logging goes through `tracing`; set `TASKBOARD_LOG` (e.g. `tb=debug`)
//! to change the filter. The UI writes its log to `<dir>/taskboard.log`.

pub mod board;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod error;
pub mod fields;
pub mod logging;
pub mod render;
pub mod seed;
pub mod storage;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use clap::Parser;

use cli::Cli;
use cmd::*;
use config::Config;
use error::BoardError;

fn main() {
    let cli = Cli::parse();
    let config = Config::resolve(cli.dir, cli.seed);
    let command = cli.command.unwrap_or(Commands::Ui);

    // Completions need no data directory.
    if let Commands::Completions { shell } = command {
        cmd_completions(shell);
        return;
    }

    if let Err(e) = config.ensure_data_dir() {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match command {
        Commands::Ui => logging::init_file(&config, &config.log_path()),
        _ => logging::init_stderr(&config),
    }

    if let Err(e) = run(&config, command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(config: &Config, command: Commands) -> Result<(), BoardError> {
    // Commands that don't need the board loaded first
    match command {
        Commands::Ui => return cmd_ui(config),
        Commands::Backup => return cmd_backup(config),
        _ => {}
    }

    let mut board = open_board(config)?;

    match command {
        Commands::Ui | Commands::Backup => unreachable!("handled above"),
        Commands::Completions { .. } => unreachable!("completions handled in main"),
        Commands::List { status } => {
            cmd_list(&board, status);
            Ok(())
        }
        Commands::Add { title, desc, status } => cmd_add(&mut board, title, desc, status),
        Commands::Update { id, title, desc, status } => cmd_update(&mut board, id, title, desc, status),
        Commands::Move { id, status } => cmd_move(&mut board, id, status),
        Commands::Delete { id } => cmd_delete(&mut board, id),
        Commands::Reset { no_backup } => cmd_reset(config, &mut board, no_backup),
    }
}
