//! Store configuration
//!
//! Settings come from `RECIPEBOOK_*` environment variables layered over
//! defaults:
//!
//! | Variable | Default |
//! |---|---|
//! | `RECIPEBOOK_DB` | `.recipebook/store.db` |
//! | `RECIPEBOOK_BUSY_TIMEOUT_MS` | `5000` |

use config::{Config, Environment};
use serde::Deserialize;
use std::path::PathBuf;

use crate::errors::{config_error, Result};

pub const DEFAULT_DB_PATH: &str = ".recipebook/store.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;
const ENV_PREFIX: &str = "RECIPEBOOK";

/// Where the database lives and how connections behave
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    #[serde(rename = "db")]
    pub path: PathBuf,
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl StoreConfig {
    /// Load from the process environment
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from an explicit environment source
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a variable cannot be parsed.
    pub fn from_environment(env: Environment) -> Result<Self> {
        Config::builder()
            .set_default("db", DEFAULT_DB_PATH)
            .map_err(config_error)?
            .set_default("busy_timeout_ms", DEFAULT_BUSY_TIMEOUT_MS)
            .map_err(config_error)?
            .add_source(env.try_parsing(true))
            .build()
            .map_err(config_error)?
            .try_deserialize()
            .map_err(config_error)
    }

    /// Replace the database path
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}
