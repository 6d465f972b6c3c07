use std::io;
use std::process::ExitCode;

use sqlcrud::{config, logging, menu, DatabaseManager};
use tracing::{error, info};

fn main() -> ExitCode {
    let config = match config::load_default_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    match config.log_level() {
        Ok(level) => logging::init(level),
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    let server = match config.server() {
        Ok(server) => server,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(data_dir = ?server.data_dir(), driver = server.driver(), "Starting sqlcrud...");

    let manager = DatabaseManager::new(server);
    let stdin = io::stdin();
    match menu::run_menu(&manager, stdin.lock(), io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Menu loop aborted: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
