use std::path::PathBuf;

use clap::{Parser, Subcommand};
use taskboard_core::{DropTarget, ItemId, Status};

#[derive(Parser, Debug, Clone)]
#[command(name = "taskboard")]
#[command(version)]
#[command(about = "Four-column task board", long_about = None)]
pub struct Cli {
    /// Directory holding the board store (overrides the config file)
    #[arg(long, global = true, env = "TASKBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file to read instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show all four columns
    List {
        /// Only show tasks whose text or dates contain this
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Add a new task at the top of a column
    Add {
        #[arg(long, default_value = "todo")]
        status: Status,
    },
    /// Change fields of a task
    Edit {
        id: ItemId,
        #[arg(long)]
        text: Option<String>,
        /// Start day, dd.MM.yyyy
        #[arg(long)]
        start: Option<String>,
        /// End day, dd.MM.yyyy, or 0 to clear it
        #[arg(long)]
        end: Option<String>,
    },
    /// Drag a task onto a column (todo, in_progress, review, done) or the trash
    Move {
        id: ItemId,
        target: DropTarget,
        /// Position within the target column
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Delete a task
    Trash { id: ItemId },
    /// Delete every task in Done
    ClearDone,
}
