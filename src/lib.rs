// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod config;
pub mod logging;
pub mod manager;
pub mod menu;

pub use crate::core::{CrudError, Result};
pub use crate::manager::{DatabaseManager, Outcome};
