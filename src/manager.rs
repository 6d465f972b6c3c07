//! Database manager: the create/read/delete operations behind the menu.
//!
//! Each operation checks the catalog, opens its own session, runs one
//! statement, commits if it changed anything and closes the session again.
//! Results come back as an [`Outcome`] whose `Display` is the status line
//! shown to the user; nothing here reads from or writes to the console.

use crate::core::db::{self, Employee, Identifier, NewEmployee, Server};
use crate::core::Result;
use std::fmt;
use tracing::info;

/// What an operation did, or why it did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    DatabaseCreated(String),
    DatabaseExists(String),
    DatabaseDeleted(String),
    DatabaseMissing(String),
    TableCreated { database: String, table: String },
    RecordInserted { id: i64, first_name: String, last_name: String },
    Records { table: String, rows: Vec<Employee> },
    RecordDeleted(i64),
    RecordMissing { table: String, id: i64 },
}

impl Outcome {
    /// True for the short-circuit outcomes where nothing was executed
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            Outcome::DatabaseExists(_) | Outcome::DatabaseMissing(_) | Outcome::RecordMissing { .. }
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::DatabaseCreated(db) => write!(f, "Database '{}' created successfully!", db),
            Outcome::DatabaseExists(db) => write!(f, "Database '{}' already exists.", db),
            Outcome::DatabaseDeleted(db) => write!(f, "Database '{}' deleted successfully!", db),
            Outcome::DatabaseMissing(db) => write!(f, "Database '{}' does not exist.", db),
            Outcome::TableCreated { database, table } => write!(
                f,
                "Table '{}' created successfully in database '{}'!",
                table, database
            ),
            Outcome::RecordInserted {
                first_name,
                last_name,
                ..
            } => write!(f, "Record for {} {} inserted successfully!", first_name, last_name),
            Outcome::Records { table, rows } => {
                write!(f, "\nRecords in table '{}':", table)?;
                for row in rows {
                    write!(f, "\n{}", row)?;
                }
                Ok(())
            }
            Outcome::RecordDeleted(id) => write!(f, "Record with ID {} deleted successfully!", id),
            Outcome::RecordMissing { table, id } => {
                write!(f, "No record with ID {} found in table '{}'.", id, table)
            }
        }
    }
}

/// Runs create/read/delete operations against one server endpoint.
///
/// Holds no connection between calls.
#[derive(Debug, Clone)]
pub struct DatabaseManager {
    server: Server,
}

impl DatabaseManager {
    pub fn new(server: Server) -> Self {
        DatabaseManager { server }
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    /// Names of all databases on the server, sorted.
    pub fn get_existing_databases(&self) -> Result<Vec<String>> {
        db::list_databases(&self.server)
    }

    pub fn database_exists(&self, name: &str) -> Result<bool> {
        db::database_exists(&self.server, name)
    }

    pub fn create_database(&self, name: &str) -> Result<Outcome> {
        let database = Identifier::database(name)?;
        if self.database_exists(name)? {
            return Ok(Outcome::DatabaseExists(name.to_string()));
        }
        db::create_database(&self.server, &database)?;
        Ok(Outcome::DatabaseCreated(name.to_string()))
    }

    pub fn delete_database(&self, name: &str) -> Result<Outcome> {
        let database = Identifier::database(name)?;
        if !self.database_exists(name)? {
            return Ok(Outcome::DatabaseMissing(name.to_string()));
        }
        db::drop_database(&self.server, &database)?;
        Ok(Outcome::DatabaseDeleted(name.to_string()))
    }

    pub fn create_table(&self, db_name: &str, table_name: &str) -> Result<Outcome> {
        let database = Identifier::database(db_name)?;
        let table = Identifier::table(table_name)?;
        if !self.database_exists(db_name)? {
            return Ok(Outcome::DatabaseMissing(db_name.to_string()));
        }

        let mut session = self.server.connect(Some(&database), false)?;
        db::create_table(session.connection(), &table)?;
        session.commit()?;
        session.close()?;

        info!(database = %database, table = %table, "Created table");
        Ok(Outcome::TableCreated {
            database: db_name.to_string(),
            table: table_name.to_string(),
        })
    }

    pub fn insert_record(&self, db_name: &str, table_name: &str, employee: &NewEmployee) -> Result<Outcome> {
        let database = Identifier::database(db_name)?;
        let table = Identifier::table(table_name)?;
        if !self.database_exists(db_name)? {
            return Ok(Outcome::DatabaseMissing(db_name.to_string()));
        }

        let mut session = self.server.connect(Some(&database), false)?;
        let id = db::insert_employee(session.connection(), &table, employee)?;
        session.commit()?;
        session.close()?;

        info!(database = %database, table = %table, id, "Inserted record");
        Ok(Outcome::RecordInserted {
            id,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
        })
    }

    pub fn read_records(&self, db_name: &str, table_name: &str) -> Result<Outcome> {
        let database = Identifier::database(db_name)?;
        let table = Identifier::table(table_name)?;
        if !self.database_exists(db_name)? {
            return Ok(Outcome::DatabaseMissing(db_name.to_string()));
        }

        let session = self.server.connect(Some(&database), false)?;
        let rows = db::select_employees(session.connection(), &table)?;
        session.close()?;

        Ok(Outcome::Records {
            table: table_name.to_string(),
            rows,
        })
    }

    pub fn delete_record(&self, db_name: &str, table_name: &str, employee_id: i64) -> Result<Outcome> {
        let database = Identifier::database(db_name)?;
        let table = Identifier::table(table_name)?;
        if !self.database_exists(db_name)? {
            return Ok(Outcome::DatabaseMissing(db_name.to_string()));
        }

        let mut session = self.server.connect(Some(&database), false)?;
        let removed = db::delete_employee(session.connection(), &table, employee_id)?;
        session.commit()?;
        session.close()?;

        if removed == 0 {
            return Ok(Outcome::RecordMissing {
                table: table_name.to_string(),
                id: employee_id,
            });
        }
        info!(database = %database, table = %table, id = employee_id, "Deleted record");
        Ok(Outcome::RecordDeleted(employee_id))
    }
}
