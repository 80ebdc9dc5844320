//! Uncertainty unit conversion.
//!
//! The satellite product reports PFT uncertainty as a relative percentage.
//! The reconstruction works on log10 concentrations, so the uncertainty is
//! converted to a standard deviation in log space:
//!
//! ```text
//! sd = log10(rel / 100 + 1)
//! ```

use ndarray::{Array, ArrayBase, Data, DataMut, Dimension};
use num_traits::Float;

/// Convert one relative uncertainty (%) to a log10 standard deviation.
///
/// NaN stays NaN.
#[inline]
pub fn relative_to_log_sd<A>(value: A) -> A
where
    A: Float + From<f32>,
{
    let hundred: A = From::from(100.0_f32);
    (value / hundred + A::one()).log10()
}

/// Elementwise [`relative_to_log_sd`] into a new array of the same shape.
pub fn unc_transform<A, S, D>(values: &ArrayBase<S, D>) -> Array<A, D>
where
    A: Float + From<f32>,
    S: Data<Elem = A>,
    D: Dimension,
{
    values.mapv(relative_to_log_sd)
}

/// In-place, parallel variant of [`unc_transform`] for full uncertainty cubes.
pub fn unc_transform_inplace<A, S, D>(values: &mut ArrayBase<S, D>)
where
    A: Float + From<f32> + Send + Sync,
    S: DataMut<Elem = A>,
    D: Dimension,
{
    values.par_mapv_inplace(relative_to_log_sd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(relative_to_log_sd(0.0_f64), 0.0);
        assert!((relative_to_log_sd(100.0_f64) - 2.0_f64.log10()).abs() < 1e-12);
        assert!((relative_to_log_sd(900.0_f32) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_nan_passthrough() {
        assert!(relative_to_log_sd(f32::NAN).is_nan());
    }
}
