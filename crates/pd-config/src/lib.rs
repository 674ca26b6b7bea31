//! Personal data configuration loading and validation.
//!
//! This crate provides:
//! - Database connection settings resolved from CLI overrides, environment
//!   variables and built-in defaults
//! - Provenance for every resolved value
//! - Fatal errors for missing required settings, raised before any connection
//!   attempt

pub mod db;
pub mod resolve;

pub use db::{DbConfig, DbOverrides, DbSources};
pub use resolve::{env_lookup, ConfigSource, Resolved};

use thiserror::Error;

/// Errors that can occur while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("database name is not configured (set {var})")]
    MissingDatabaseName { var: &'static str },

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
