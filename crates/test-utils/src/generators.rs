//! Test data generators for synthetic coordinate axes and soil-moisture grids.
//!
//! These generators create predictable, verifiable patterns so tests can
//! assert exactly which pixel was sampled.

/// Evenly spaced axis of `n` values starting at `start`.
///
/// # Example
///
/// ```
/// use test_utils::create_axis;
///
/// assert_eq!(create_axis(41.0, -1.0, 3), vec![41.0, 40.0, 39.0]);
/// ```
pub fn create_axis(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Expand two axes into row-major 2D latitude and longitude arrays.
///
/// Returns `(latitudes, longitudes)`, each `lat_axis.len() * lon_axis.len()` long.
pub fn create_mesh(lat_axis: &[f64], lon_axis: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut lats = Vec::with_capacity(lat_axis.len() * lon_axis.len());
    let mut lons = Vec::with_capacity(lat_axis.len() * lon_axis.len());
    for &lat in lat_axis {
        for &lon in lon_axis {
            lats.push(lat);
            lons.push(lon);
        }
    }
    (lats, lons)
}

/// Creates a grid whose values encode their own position.
///
/// Each cell value is `base + row * 0.01 + col * 0.0001`, so any sampled value
/// identifies the pixel it came from.
///
/// # Example
///
/// ```
/// use test_utils::create_indexed_grid;
///
/// let grid = create_indexed_grid(3, 3, 0.1);
/// assert_eq!(grid.len(), 9);
/// assert!((grid[4] - 0.1101).abs() < 1e-12); // row 1, col 1
/// ```
pub fn create_indexed_grid(rows: usize, cols: usize, base: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            data.push(base + row as f64 * 0.01 + col as f64 * 0.0001);
        }
    }
    data
}

/// Expected value of [`create_indexed_grid`] at `(row, col)`.
pub fn indexed_value(base: f64, row: usize, col: usize) -> f64 {
    base + row as f64 * 0.01 + col as f64 * 0.0001
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_layout() {
        let (lats, lons) = create_mesh(&[1.0, 2.0], &[10.0, 20.0, 30.0]);
        assert_eq!(lats, vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
        assert_eq!(lons, vec![10.0, 20.0, 30.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_indexed_value_matches_grid() {
        let grid = create_indexed_grid(4, 5, 0.2);
        assert_eq!(grid[3 * 5 + 2], indexed_value(0.2, 3, 2));
    }
}
