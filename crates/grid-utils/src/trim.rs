//! Boundary trimming.
//!
//! The EOF reconstruction is least reliable near the edges of the domain, so
//! reconstructed fields are cropped by a fixed number of pixels on every
//! side before validation.

use ndarray::Slice;
use tracing::debug;

use crate::error::Result;
use crate::grid::{LabeledGrid, LAT, LON};

/// Remove `pixels` rows/columns from both ends of the `lat` and `lon` axes.
///
/// Other axes (e.g. `time`) are left untouched. `pixels == 0` returns a copy
/// of the input.
///
/// When `2 * pixels` reaches or exceeds an axis extent the result is empty
/// along that axis; this never panics.
///
/// # Errors
/// [`GridError::MissingAxis`](crate::GridError::MissingAxis) if the grid has
/// no `lat` or no `lon` dimension.
pub fn trim_boundary<A: Clone>(grid: &LabeledGrid<A>, pixels: usize) -> Result<LabeledGrid<A>> {
    let lat = grid.require_axis(LAT)?;
    let lon = grid.require_axis(LON)?;

    let mut view = grid.data().view();
    for axis in [lat, lon] {
        let (start, end) = trimmed_range(view.len_of(axis), pixels);
        view.slice_axis_inplace(axis, Slice::from(start..end));
    }

    debug!(
        pixels,
        from = ?grid.shape(),
        to = ?view.shape(),
        "Trimmed grid boundary"
    );

    Ok(grid.with_data(view.to_owned()))
}

/// Index range left after dropping `pixels` from each end of `len`.
#[inline]
fn trimmed_range(len: usize, pixels: usize) -> (usize, usize) {
    let start = pixels.min(len);
    let end = len.saturating_sub(pixels).max(start);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_range() {
        assert_eq!(trimmed_range(10, 0), (0, 10));
        assert_eq!(trimmed_range(10, 2), (2, 8));
        assert_eq!(trimmed_range(10, 5), (5, 5));
        assert_eq!(trimmed_range(10, 7), (7, 7));
        assert_eq!(trimmed_range(3, usize::MAX), (3, 3));
    }
}
