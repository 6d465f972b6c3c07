/// Core Module for sqlcrud
///
/// Shared infrastructure used by the manager, the menu and both binaries:
/// the error type and the database layer.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{CrudError, Result};
