//! POS configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `balcao-pos` run works out of the box.

use std::env;
use std::path::PathBuf;

use serde::Serialize;

/// POS application configuration.
#[derive(Debug, Clone, Serialize)]
pub struct PosConfig {
    /// SQLite database file path.
    pub database_path: PathBuf,

    /// Default number of rows shown on listing screens.
    pub list_limit: u32,
}

impl PosConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Variables
    /// - `BALCAO_DB` - database file path (default: `./balcao.db`)
    /// - `BALCAO_LIST_LIMIT` - listing row cap (default: 100)
    pub fn load() -> Result<Self, ConfigError> {
        let config = PosConfig {
            database_path: env::var("BALCAO_DB")
                .unwrap_or_else(|_| "./balcao.db".to_string())
                .into(),

            list_limit: env::var("BALCAO_LIST_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BALCAO_LIST_LIMIT".to_string()))?,
        };

        Ok(config)
    }
}

impl Default for PosConfig {
    fn default() -> Self {
        PosConfig {
            database_path: PathBuf::from("./balcao.db"),
            list_limit: 100,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
