//! Error metrics.

use ndarray::{ArrayBase, Data, Dimension, Zip};
use num_traits::{Float, NumCast};

use crate::error::{GridError, Result};

/// Root-mean-square of an array, ignoring NaN entries.
///
/// Returns NaN when the array is empty or every entry is NaN.
pub fn rmse<A, S, D>(values: &ArrayBase<S, D>) -> A
where
    A: Float,
    S: Data<Elem = A>,
    D: Dimension,
{
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((A::zero(), 0usize), |(sum, count), &v| (sum + v * v, count + 1));

    if count == 0 {
        return A::nan();
    }
    <A as NumCast>::from(count).map_or_else(A::nan, |n| (sum / n).sqrt())
}

/// RMSE of `predicted - observed`, skipping pixels missing in either array.
///
/// # Errors
/// [`GridError::ShapeMismatch`] if the arrays differ in shape.
pub fn rmse_between<A, S1, S2, D>(
    predicted: &ArrayBase<S1, D>,
    observed: &ArrayBase<S2, D>,
) -> Result<A>
where
    A: Float,
    S1: Data<Elem = A>,
    S2: Data<Elem = A>,
    D: Dimension,
{
    if predicted.shape() != observed.shape() {
        return Err(GridError::ShapeMismatch {
            left: predicted.shape().to_vec(),
            right: observed.shape().to_vec(),
        });
    }

    let diff = Zip::from(predicted)
        .and(observed)
        .map_collect(|&p, &o| p - o);
    Ok(rmse(&diff))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, Array1};

    #[test]
    fn test_rmse_simple() {
        let values = arr1(&[3.0_f64, -4.0]);
        // sqrt((9 + 16) / 2)
        assert!((rmse(&values) - 12.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_rmse_empty_is_nan() {
        let values = Array1::<f32>::zeros(0);
        assert!(rmse(&values).is_nan());
    }
}
