//! Array utilities for gridded ocean-color data.
//!
//! Small, stateless helpers used around the reconstruction:
//!
//! - **Boundary trim**: drop edge pixels after reconstruction, where the
//!   EOF filling is least reliable
//! - **Uncertainty transform**: relative uncertainty (%) to a standard
//!   deviation in log10 space
//! - **RMSE**: root-mean-square of an error field, ignoring missing pixels
//!
//! Arrays are [`LabeledGrid`]s: an `ndarray` array plus one dimension name
//! per axis, so the spatial axes are found by name (`lat`, `lon`) rather
//! than by position.
//!
//! # Example
//!
//! ```
//! use grid_utils::{rmse, trim_boundary, LabeledGrid};
//! use ndarray::Array2;
//!
//! let grid = LabeledGrid::from_lat_lon(Array2::<f32>::zeros((20, 30)));
//! let trimmed = trim_boundary(&grid, 5).unwrap();
//! assert_eq!(trimmed.shape(), &[10, 20]);
//! assert_eq!(rmse(trimmed.data()), 0.0);
//! ```

pub mod error;
pub mod grid;
pub mod metrics;
pub mod transform;
pub mod trim;

pub use error::{GridError, Result};
pub use grid::{LabeledGrid, LAT, LON, TIME};
pub use metrics::{rmse, rmse_between};
pub use transform::{relative_to_log_sd, unc_transform, unc_transform_inplace};
pub use trim::trim_boundary;
