/// Database Module
///
/// The database layer is split into four concerns:
/// - **Connection Management** (`connection.rs`): the server endpoint and per-operation sessions
/// - **Catalog** (`catalog.rs`): listing, creating and dropping databases
/// - **Identifiers** (`ident.rs`): allow-list validation and quoting of names used in DDL
/// - **Employees** (`employees.rs`): the fixed table schema and record statements
///
/// ## Error Handling
///
/// All operations return the crate's `Result`; driver errors surface as `CrudError::Database`.
pub mod catalog;
pub mod connection;
pub mod employees;
pub mod ident;

pub use catalog::*;
pub use connection::*;
pub use employees::*;
pub use ident::*;
