use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Three-column task board for the terminal.
/// Tasks are stored in <dir>/tasks.json; the UI opens when no command is given.
#[derive(Parser)]
#[command(name = "tb", version, about = "Todo / doing / done task board")]
pub struct Cli {
    /// Directory holding the board data (default: $TASKBOARD_DIR or ~/.taskboard).
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// JSON file with the tasks to start from when nothing is saved yet.
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
