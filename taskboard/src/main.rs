mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use taskboard_core::storage::local::FileStore;
use taskboard_core::Board;

use crate::cli::Cli;
use crate::error::AppError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let board_config = config::load_config(&config_path);

    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| board_config.data_dir.clone())
        .unwrap_or_else(config::default_data_dir);
    log::debug!("[taskboard.run] Using store at {}", data_dir.display());

    let store = FileStore::open(&data_dir)?;
    let mut board = Board::load_with_key(store, board_config.storage_key);

    let output = commands::execute(&mut board, cli.command)?;
    print!("{}", output);
    Ok(())
}
