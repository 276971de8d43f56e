//! Engine configuration for empdb.
//!
//! Configuration is a flat TOML document. Every key is optional; missing
//! keys fall back to [`EngineConfig::default`].
//!
//! ```toml
//! table = "Employee"
//! debug = false
//! metrics = true
//! ```


use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// Constants
///

/// Maximum byte length of a table name.
pub const MAX_TABLE_NAME_LEN: usize = 64;

/// Table name used when none is configured.
pub const DEFAULT_TABLE_NAME: &str = "Employee";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}

impl ConfigError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

///
/// EngineConfig
///
/// Runtime settings for one table engine.
/// `debug` turns on per-operation debug events; `metrics` turns on the
/// table's operation counters.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub table: String,
    pub debug: bool,
    pub metrics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE_NAME.to_string(),
            debug: false,
            metrics: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    /// Check the table name: non-empty, ASCII, at most `MAX_TABLE_NAME_LEN` bytes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let len = self.table.len();

        if len == 0 {
            return Err(ConfigError::invalid("table name is empty"));
        }
        if len > MAX_TABLE_NAME_LEN {
            return Err(ConfigError::invalid(format!(
                "table name length {len} exceeds max {MAX_TABLE_NAME_LEN}"
            )));
        }
        if !self.table.is_ascii() {
            return Err(ConfigError::invalid("table name must be ASCII"));
        }

        Ok(())
    }

    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn with_metrics(mut self, metrics: bool) -> Self {
        self.metrics = metrics;
        self
    }
}
