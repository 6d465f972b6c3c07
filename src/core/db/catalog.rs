/// Catalog Module
///
/// The server's catalog of databases. The data directory is the source of
/// truth and is re-read on every call, never cached.

use crate::core::db::connection::{Server, DATABASE_FILE_EXTENSION};
use crate::core::db::ident::Identifier;
use crate::core::{CrudError, Result};
use std::fs;
use std::io::ErrorKind;
use tracing::{debug, info, warn};

/// Sibling files SQLite may keep next to a database file
const SIDECAR_SUFFIXES: &[&str] = &["-journal", "-wal", "-shm"];

/// Lists every database on the server, sorted by name.
///
/// Opens a server-level session first so the system database always exists
/// and is listed.
pub fn list_databases(server: &Server) -> Result<Vec<String>> {
    server.connect(None, true)?.close()?;

    let mut databases = Vec::new();
    for entry in fs::read_dir(server.data_dir())? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(DATABASE_FILE_EXTENSION) {
            continue;
        }
        match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) if Identifier::is_valid(stem) => databases.push(stem.to_string()),
            _ => debug!("Skipping non-database file {:?}", path),
        }
    }
    databases.sort();

    debug!(count = databases.len(), "Listed databases");
    Ok(databases)
}

/// Exact-match membership test against a fresh catalog listing.
pub fn database_exists(server: &Server, name: &str) -> Result<bool> {
    Ok(list_databases(server)?.iter().any(|db| db == name))
}

/// Creates `database` on the server.
///
/// Runs `ATTACH DATABASE` on an autocommit server session; SQLite creates the
/// backing file and refuses to do so inside a transaction. The caller is
/// responsible for the existence check.
pub fn create_database(server: &Server, database: &Identifier) -> Result<()> {
    if server.is_system_database(database) {
        return Err(CrudError::SystemDatabase(database.to_string()));
    }

    let session = server.connect(None, true)?;
    let path = server.database_path(database);
    let path = path
        .to_str()
        .ok_or_else(|| CrudError::Config(format!("Data directory path is not UTF-8: {:?}", path)))?;

    let conn = session.connection();
    conn.execute(
        &format!("ATTACH DATABASE ?1 AS {}", database.quoted()),
        [path],
    )?;
    conn.execute_batch(&format!("DETACH DATABASE {}", database.quoted()))?;
    session.close()?;

    info!(database = %database, "Created database");
    Ok(())
}

/// Drops `database` by removing its file and SQLite sidecar files.
///
/// The caller is responsible for the existence check.
pub fn drop_database(server: &Server, database: &Identifier) -> Result<()> {
    if server.is_system_database(database) {
        return Err(CrudError::SystemDatabase(database.to_string()));
    }

    // The server must be reachable before anything is removed.
    let session = server.connect(Some(server.system_database()), true)?;

    warn!(database = %database, "Dropping database (destructive operation)");
    let path = server.database_path(database);
    fs::remove_file(&path)?;
    for suffix in SIDECAR_SUFFIXES {
        let mut sidecar = path.clone().into_os_string();
        sidecar.push(suffix);
        match fs::remove_file(&sidecar) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    session.close()?;

    info!(database = %database, "Dropped database");
    Ok(())
}
