//! N-dimensional arrays with named dimensions.

use ndarray::{Array2, ArrayD, Axis, IxDyn};

use crate::error::{GridError, Result};

/// Latitude dimension name.
pub const LAT: &str = "lat";
/// Longitude dimension name.
pub const LON: &str = "lon";
/// Time dimension name.
pub const TIME: &str = "time";

/// An array whose axes carry dimension names, e.g. `["time", "lat", "lon"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledGrid<A> {
    dims: Vec<String>,
    data: ArrayD<A>,
}

impl<A> LabeledGrid<A> {
    /// Wrap an array, naming its axes in order.
    ///
    /// Fails if the number of names differs from the array rank or a name
    /// repeats.
    pub fn new<I, S>(dims: I, data: ArrayD<A>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.len() != data.ndim() {
            return Err(GridError::DimensionMismatch {
                expected: data.ndim(),
                actual: dims.len(),
            });
        }
        for (i, name) in dims.iter().enumerate() {
            if dims[..i].contains(name) {
                return Err(GridError::DuplicateAxis(name.clone()));
            }
        }
        Ok(Self { dims, data })
    }

    /// A single `lat` x `lon` field.
    pub fn from_lat_lon(data: Array2<A>) -> Self {
        Self {
            dims: vec![LAT.to_string(), LON.to_string()],
            data: data.into_dyn(),
        }
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn data(&self) -> &ArrayD<A> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ArrayD<A> {
        &mut self.data
    }

    pub fn into_data(self) -> ArrayD<A> {
        self.data
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Axis carrying the given dimension name.
    pub fn axis(&self, name: &str) -> Option<Axis> {
        self.dims.iter().position(|d| d == name).map(Axis)
    }

    /// Like [`axis`](Self::axis) but errors when the dimension is absent.
    pub fn require_axis(&self, name: &str) -> Result<Axis> {
        self.axis(name)
            .ok_or_else(|| GridError::MissingAxis(name.to_string()))
    }

    /// Extent along a named dimension.
    pub fn len_of(&self, name: &str) -> Option<usize> {
        self.axis(name).map(|axis| self.data.len_of(axis))
    }

    /// Apply a function elementwise, keeping the dimension names.
    pub fn mapv<B, F>(&self, f: F) -> LabeledGrid<B>
    where
        A: Clone,
        F: FnMut(A) -> B,
    {
        LabeledGrid {
            dims: self.dims.clone(),
            data: self.data.mapv(f),
        }
    }

    /// Replace the data while keeping the dimension names.
    pub(crate) fn with_data<B>(&self, data: ArrayD<B>) -> LabeledGrid<B> {
        debug_assert_eq!(data.ndim(), self.dims.len());
        LabeledGrid {
            dims: self.dims.clone(),
            data,
        }
    }
}

impl<A: Clone + Default> LabeledGrid<A> {
    /// Grid filled with `A::default()` for the given named shape.
    pub fn zeros_named(dims: &[(&str, usize)]) -> Self {
        let shape: Vec<usize> = dims.iter().map(|(_, n)| *n).collect();
        Self {
            dims: dims.iter().map(|(name, _)| name.to_string()).collect(),
            data: ArrayD::from_elem(IxDyn(&shape), A::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_rank() {
        let data = ArrayD::<f32>::zeros(IxDyn(&[2, 3]));
        let result = LabeledGrid::new(["lat"], data);
        assert_eq!(
            result.unwrap_err(),
            GridError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let data = ArrayD::<f32>::zeros(IxDyn(&[2, 3]));
        let result = LabeledGrid::new(["lat", "lat"], data);
        assert_eq!(result.unwrap_err(), GridError::DuplicateAxis("lat".into()));
    }

    #[test]
    fn test_axis_lookup() {
        let grid = LabeledGrid::<f64>::zeros_named(&[(TIME, 4), (LAT, 5), (LON, 6)]);
        assert_eq!(grid.axis(LAT), Some(Axis(1)));
        assert_eq!(grid.len_of(LON), Some(6));
        assert_eq!(grid.axis("depth"), None);
        assert!(grid.require_axis("depth").is_err());
    }

    #[test]
    fn test_mapv_keeps_dims() {
        let grid = LabeledGrid::from_lat_lon(Array2::<f32>::ones((2, 2)));
        let doubled = grid.mapv(|v| v * 2.0);
        assert_eq!(doubled.dims(), grid.dims());
        assert!(doubled.data().iter().all(|&v| v == 2.0));
    }
}
