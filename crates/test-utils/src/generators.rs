//! Test data generators for synthetic ocean-color fields.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// This makes it easy to verify that data is being sliced correctly
/// by checking that grid[row][col] == col * 1000 + row.
///
/// # Returns
///
/// A `Vec<f32>` in row-major order (row 0 first, then row 1, etc.)
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50); // 10 * 5
/// assert_eq!(grid[0], 0.0);   // col=0, row=0 -> 0*1000 + 0
/// assert_eq!(grid[1], 1000.0); // col=1, row=0 -> 1*1000 + 0
/// assert_eq!(grid[10], 1.0);  // col=0, row=1 -> 0*1000 + 1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a chlorophyll-like field (mg m^-3) with cloud gaps.
///
/// Roughly a quarter of the pixels are NaN, chosen by a deterministic hash
/// of the position and `seed`. Valid pixels range from 0.01 to ~10.
pub fn create_test_grid_with_nans(width: usize, height: usize, seed: u32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            if hash % 4 == 0 {
                data.push(f32::NAN);
            } else {
                data.push(0.01 + (hash % 1000) as f32 / 100.0);
            }
        }
    }
    data
}

/// Creates a relative-uncertainty field in percent (0-200 %).
pub fn create_uncertainty_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let frac = (col + row) as f32 / (width + height).max(1) as f32;
            data.push(frac * 200.0);
        }
    }
    data
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_grid() {
        let grid = create_test_grid(10, 5);
        assert_eq!(grid.len(), 50);
        assert_eq!(grid[0], 0.0); // col=0, row=0
        assert_eq!(grid[1], 1000.0); // col=1, row=0
        assert_eq!(grid[10], 1.0); // col=0, row=1
        assert_eq!(grid[11], 1001.0); // col=1, row=1
    }

    #[test]
    fn test_grid_with_nans_is_deterministic() {
        let a = create_test_grid_with_nans(50, 40, 3);
        let b = create_test_grid_with_nans(50, 40, 3);
        assert_eq!(a.len(), 2000);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(x == y || (x.is_nan() && y.is_nan()));
        }

        let gaps = a.iter().filter(|v| v.is_nan()).count();
        assert!(gaps > 0 && gaps < a.len());
    }

    #[test]
    fn test_create_uncertainty_grid() {
        let grid = create_uncertainty_grid(20, 20);
        assert_eq!(grid[0], 0.0);
        assert!(grid.iter().all(|&v| (0.0..=200.0).contains(&v)));
    }

    #[test]
    fn test_create_constant_grid() {
        let grid = create_constant_grid(10, 10, 42.0);
        assert_eq!(grid.len(), 100);
        assert!(grid.iter().all(|&v| v == 42.0));
    }
}
