//! Error types for cluster execution.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClusterError>;

#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("Invalid cluster options: {0}")]
    InvalidOptions(String),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution failed: {0}")]
    Command(String),

    #[error("Job submission failed: {0}")]
    Submission(String),

    #[error("Failed to cancel jobs: {0}")]
    Cancel(String),

    #[error("Job '{0}' has no commands")]
    EmptyJob(String),
}

impl ClusterError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
