//! Coordinate grid reconciliation and nearest-pixel search.

use crate::container::RawArray;
use crate::error::{SmapError, SmapResult};

/// A 2D latitude/longitude mesh, row-major.
///
/// Invariant: non-empty, `latitudes` and `longitudes` share `rows * cols`
/// elements, all values finite.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGrid {
    rows: usize,
    cols: usize,
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
}

impl CoordinateGrid {
    /// Grid shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn latitude(&self, row: usize, col: usize) -> f64 {
        self.latitudes[row * self.cols + col]
    }

    pub fn longitude(&self, row: usize, col: usize) -> f64 {
        self.longitudes[row * self.cols + col]
    }
}

/// Build a [`CoordinateGrid`] from raw coordinate arrays.
///
/// - 2D + 2D with equal shapes: used as-is.
/// - 1D (N) + 1D (M): expanded to an N×M mesh where cell `(i, j)` is
///   `(lat[i], lon[j])`.
///
/// Anything else (mixed ranks, mismatched 2D shapes, empty or non-finite
/// coordinates) is a [`SmapError::GridShape`].
pub fn resolve_coordinates(lat: RawArray, lon: RawArray) -> SmapResult<CoordinateGrid> {
    let grid = match (lat.shape.as_slice(), lon.shape.as_slice()) {
        (&[lat_rows, lat_cols], &[lon_rows, lon_cols]) => {
            if (lat_rows, lat_cols) != (lon_rows, lon_cols) {
                return Err(SmapError::GridShape(format!(
                    "latitude {:?} and longitude {:?} shapes differ",
                    lat.shape, lon.shape
                )));
            }
            if lat.values.len() != lat_rows * lat_cols || lon.values.len() != lon_rows * lon_cols {
                return Err(SmapError::GridShape(
                    "coordinate values do not match declared shape".to_string(),
                ));
            }
            CoordinateGrid {
                rows: lat_rows,
                cols: lat_cols,
                latitudes: lat.values,
                longitudes: lon.values,
            }
        }
        (&[rows], &[cols]) => {
            if lat.values.len() != rows || lon.values.len() != cols {
                return Err(SmapError::GridShape(
                    "coordinate values do not match declared shape".to_string(),
                ));
            }
            let mut latitudes = Vec::with_capacity(rows * cols);
            let mut longitudes = Vec::with_capacity(rows * cols);
            for &lat_value in &lat.values {
                for &lon_value in &lon.values {
                    latitudes.push(lat_value);
                    longitudes.push(lon_value);
                }
            }
            CoordinateGrid {
                rows,
                cols,
                latitudes,
                longitudes,
            }
        }
        _ => {
            return Err(SmapError::GridShape(format!(
                "cannot combine {}D latitude with {}D longitude",
                lat.ndim(),
                lon.ndim()
            )));
        }
    };

    if grid.rows == 0 || grid.cols == 0 {
        return Err(SmapError::GridShape("coordinate grid is empty".to_string()));
    }
    if grid
        .latitudes
        .iter()
        .chain(grid.longitudes.iter())
        .any(|v| !v.is_finite())
    {
        return Err(SmapError::GridShape(
            "coordinate grid contains non-finite values".to_string(),
        ));
    }

    Ok(grid)
}

/// Index `(row, col)` of the cell closest to `(lat, lon)`.
///
/// Distance is squared planar distance in degree space, with no geodesic
/// correction. Ties go to the first cell in row-major order.
pub fn nearest_pixel(grid: &CoordinateGrid, lat: f64, lon: f64) -> (usize, usize) {
    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;

    for (index, (&cell_lat, &cell_lon)) in grid.latitudes.iter().zip(&grid.longitudes).enumerate() {
        let d_lat = cell_lat - lat;
        let d_lon = cell_lon - lon;
        let distance = d_lat * d_lat + d_lon * d_lon;
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }

    (best_index / grid.cols, best_index % grid.cols)
}
