/// Error Module
///
/// This module defines the error type shared by the data layer, the
/// interactive menu and both binaries.
use thiserror::Error;

/// Error type for sqlcrud.
///
/// The variants follow how each failure is treated by the menu:
/// - `InvalidIdentifier` is a user-input problem that gets reported and re-prompted
/// - `Database`, `Io` and `Input` abort the interactive loop
/// - `Config` stops the program before any connection is made
#[derive(Error, Debug)]
pub enum CrudError {
    /// Errors raised by the SQLite driver (connect, DDL, DML, row decoding)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system and console I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A database or table name that does not match the identifier allow-list
    #[error("Invalid {kind} name '{name}': names must start with a letter or underscore and contain only letters, digits and underscores (max 128 characters)")]
    InvalidIdentifier { kind: &'static str, name: String },

    /// Attempt to create or drop the server's system database
    #[error("'{0}' is the system database and cannot be created or dropped")]
    SystemDatabase(String),

    /// Console input that could not be coerced (non-numeric age or id, end of input)
    #[error("Input error: {0}")]
    Input(String),
}

/// Type alias for Result to use CrudError as the error type.
pub type Result<T> = std::result::Result<T, CrudError>;
