use crate::core::db::Server;
use crate::core::{CrudError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Directory name used under the platform config and data directories
pub const APP_DIR_NAME: &str = "sqlcrud";

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration structure parsed from a TOML file.
///
/// Every section is optional; a missing file yields `Config::default()`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub server: Option<ServerConfig>,
    pub logging: Option<LoggingConfig>,
    pub diagnostic: Option<DiagnosticConfig>,
}

/// Server endpoint configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub data_dir: Option<PathBuf>,
    pub system_database: Option<String>,
    pub driver: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// Settings for the `sqlcheck` diagnostic program.
#[derive(Debug, Deserialize)]
pub struct DiagnosticConfig {
    pub database: Option<String>,
}

impl Config {
    /// Data directory, falling back to `<platform data dir>/sqlcrud`.
    pub fn data_dir(&self) -> PathBuf {
        self.server
            .as_ref()
            .and_then(|s| s.data_dir.clone())
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from("sqlcrud-data"))
    }

    pub fn system_database(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.system_database.as_deref())
            .unwrap_or("master")
    }

    pub fn driver(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.driver.as_deref())
            .unwrap_or("sqlite")
    }

    /// Database the diagnostic program connects to, the system database by default.
    pub fn diagnostic_database(&self) -> &str {
        self.diagnostic
            .as_ref()
            .and_then(|d| d.database.as_deref())
            .unwrap_or_else(|| self.system_database())
    }

    /// Maximum log level, `WARN` unless configured.
    pub fn log_level(&self) -> Result<Level> {
        match self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            Some(level) => level
                .parse::<Level>()
                .map_err(|_| CrudError::Config(format!("Unknown log level '{}'", level))),
            None => Ok(Level::WARN),
        }
    }

    /// Builds the server endpoint described by this configuration.
    pub fn server(&self) -> Result<Server> {
        Server::new(self.data_dir(), self.system_database(), self.driver())
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Arguments
///
/// * `path` - The file path to the TOML configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| CrudError::Config(e.to_string()))
}

/// Path of the per-user configuration file, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Loads the per-user configuration file, or defaults when there is none.
pub fn load_default_config() -> Result<Config> {
    match default_config_path() {
        Some(path) if path.is_file() => load_config(path),
        _ => Ok(Config::default()),
    }
}
