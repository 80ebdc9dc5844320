//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating the global configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Unclosed variable substitution: ${{{0}")]
    UnclosedVariable(String),

    #[error("Required environment variable not set: {0}")]
    MissingVariable(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create an Invalid error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
