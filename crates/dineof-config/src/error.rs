//! Error types for the DINEOF configuration generator.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating an experiment.
#[derive(Error, Debug)]
pub enum DineofError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse parameter record {path:?}: {source}")]
    Record {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize parameter record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Input dataset not found: {0:?}")]
    MissingInput(PathBuf),

    #[error("Invalid experiment key: {0}")]
    InvalidKey(String),

    #[error(transparent)]
    Config(#[from] gapfill_common::ConfigError),
}

impl DineofError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, DineofError>;
