//! Configuration System
//!
//! Provides hierarchical configuration loading from:
//! - config.toml (default configuration)
//! - config.local.toml (git-ignored local overrides)
//! - Environment variables (XCRUD_* prefix)
//!
//! ## Example
//!
//! ```toml
//! # config.toml
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [limits]
//! max_payload_bytes = 1048576
//! max_insert_rows = 5000
//! ```
//!
//! Environment variable overrides:
//! ```bash
//! XCRUD_LIMITS__MAX_INSERT_ROWS=100
//! XCRUD_LOGGING__LEVEL=trace
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::protocol::MAX_MESSAGE_SIZE;

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Request limits applied before compilation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum accepted payload size in bytes. 0 = no limit.
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,

    /// Maximum number of rows in a single insert. 0 = no limit.
    #[serde(default = "default_max_insert_rows")]
    pub max_insert_rows: usize,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}
fn default_max_payload_bytes() -> usize {
    MAX_MESSAGE_SIZE
}
fn default_max_insert_rows() -> usize {
    10_000
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Merges in order:
    /// 1. config.toml (base configuration)
    /// 2. config.local.toml (local overrides, git-ignored)
    /// 3. Environment variables (XCRUD_* prefix)
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Toml::file("config.local.toml"))
            .merge(Env::prefixed("XCRUD_").split("__"))
            .extract()
    }

    /// Load configuration from specific file path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("XCRUD_").split("__"))
            .extract()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            max_payload_bytes: default_max_payload_bytes(),
            max_insert_rows: default_max_insert_rows(),
        }
    }
}
