/// Connection Management Module
///
/// A `Server` is the immutable endpoint for a run: a data directory holding
/// one SQLite file per database plus the system database. Every operation
/// acquires its own `Session` from the server and releases it when the
/// session is closed or dropped, on every exit path.

use crate::core::db::ident::Identifier;
use crate::core::Result;
use rusqlite::{Connection, OpenFlags};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of database files inside the data directory
pub const DATABASE_FILE_EXTENSION: &str = "db";

/// The server endpoint: where databases live and how to reach them.
#[derive(Debug, Clone)]
pub struct Server {
    data_dir: PathBuf,
    system_database: Identifier,
    driver: String,
}

impl Server {
    /// Creates a server endpoint rooted at `data_dir`.
    ///
    /// Nothing is touched on disk until the first `connect`.
    pub fn new(data_dir: impl Into<PathBuf>, system_database: &str, driver: &str) -> Result<Self> {
        Ok(Server {
            data_dir: data_dir.into(),
            system_database: Identifier::database(system_database)?,
            driver: driver.to_string(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn system_database(&self) -> &Identifier {
        &self.system_database
    }

    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// Returns true when `database` names the system database
    pub fn is_system_database(&self, database: &Identifier) -> bool {
        database == &self.system_database
    }

    /// Path of the file backing `database`
    pub fn database_path(&self, database: &Identifier) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", database.as_str(), DATABASE_FILE_EXTENSION))
    }

    /// Opens a session, optionally scoped to `database`.
    ///
    /// Without a database (or with the system database) the session targets
    /// the system database, which is created together with the data
    /// directory if needed. A named user database must already exist.
    ///
    /// With `autocommit` off the session starts inside a transaction and
    /// changes persist only after `Session::commit`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sqlcrud::core::db::Server;
    /// # fn main() -> sqlcrud::core::Result<()> {
    /// # let dir = std::env::temp_dir().join("sqlcrud-connect-doc");
    /// let server = Server::new(dir, "master", "sqlite")?;
    /// let session = server.connect(None, true)?;
    /// session.close()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn connect(&self, database: Option<&Identifier>, autocommit: bool) -> Result<Session> {
        let target = database.unwrap_or(&self.system_database);
        let path = self.database_path(target);

        let conn = if self.is_system_database(target) {
            fs::create_dir_all(&self.data_dir)?;
            Connection::open_with_flags(
                &path,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?
        } else {
            Connection::open_with_flags(
                &path,
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?
        };

        if !autocommit {
            conn.execute_batch("BEGIN")?;
        }

        debug!(
            database = %target,
            autocommit,
            "Connected to {}",
            match database {
                Some(db) => format!("database {}", db),
                None => "server".to_string(),
            }
        );

        Ok(Session {
            conn,
            database: database.cloned(),
            autocommit,
        })
    }
}

/// One open connection, owned by a single operation.
///
/// Closing consumes the session, so a session cannot be closed twice.
/// Dropping an uncommitted non-autocommit session rolls its changes back.
#[derive(Debug)]
pub struct Session {
    conn: Connection,
    database: Option<Identifier>,
    autocommit: bool,
}

impl Session {
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// The database this session was scoped to, `None` for a server-level session
    pub fn database(&self) -> Option<&Identifier> {
        self.database.as_ref()
    }

    pub fn is_autocommit(&self) -> bool {
        self.autocommit
    }

    /// Commits pending changes and opens the next transaction.
    ///
    /// A no-op in autocommit mode.
    pub fn commit(&mut self) -> Result<()> {
        if !self.autocommit {
            self.conn.execute_batch("COMMIT; BEGIN")?;
        }
        Ok(())
    }

    /// Closes the connection, reporting any error from the driver.
    pub fn close(self) -> Result<()> {
        let database = self.database;
        self.conn.close().map_err(|(_, e)| e)?;
        debug!(database = ?database.as_ref().map(Identifier::as_str), "Connection closed");
        Ok(())
    }
}
