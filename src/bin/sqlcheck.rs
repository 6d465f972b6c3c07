//! Connectivity check: opens one connection and prints the engine version.

use std::process::ExitCode;

use sqlcrud::core::db::{Identifier, Server, Session};
use sqlcrud::{config, logging, Result};
use tracing::info;

/// Connects to `database` and runs the version query. The opened session is
/// left in `session` for the caller to close.
fn check(server: &Server, database: &str, session: &mut Option<Session>) -> Result<String> {
    let database = Identifier::database(database)?;
    let opened = session.insert(server.connect(Some(&database), true)?);
    println!("Connection successful!");

    let version: String = opened
        .connection()
        .query_row("SELECT sqlite_version()", [], |row| row.get(0))?;
    Ok(version)
}

fn main() -> ExitCode {
    let config = match config::load_default_config() {
        Ok(config) => config,
        Err(e) => {
            println!("Error while connecting to the database: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.log_level().unwrap_or(tracing::Level::WARN));

    let mut session = None;
    let status = match config
        .server()
        .and_then(|server| {
            info!(data_dir = ?server.data_dir(), driver = server.driver(), "Checking connection");
            check(&server, config.diagnostic_database(), &mut session)
        }) {
        Ok(version) => {
            println!("SQLite {}", version);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Error while connecting to the database: {}", e);
            ExitCode::FAILURE
        }
    };

    // Only a connection that was actually opened gets closed.
    if let Some(session) = session {
        match session.close() {
            Ok(()) => println!("Connection closed."),
            Err(e) => {
                println!("Error while closing the connection: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    status
}
