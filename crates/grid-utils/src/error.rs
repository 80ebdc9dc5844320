//! Error types for grid utilities.

use thiserror::Error;

/// Errors that can occur when operating on labelled grids.
#[derive(Error, Debug, PartialEq)]
pub enum GridError {
    /// A required named axis is absent.
    #[error("grid has no '{0}' dimension")]
    MissingAxis(String),

    /// The number of dimension names does not match the array rank.
    #[error("expected {expected} dimension names, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The same dimension name is used twice.
    #[error("duplicate dimension name '{0}'")]
    DuplicateAxis(String),

    /// Two arrays that must align have different shapes.
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
