//! Native HDF5 granule access using the netcdf library.
//!
//! SMAP granules are plain HDF5 files, which libnetcdf opens as NetCDF-4.
//! The library requires a file path (it wraps libnetcdf/HDF5 which need
//! file handles), so downloaded bytes are written to a temp file first.
//!
//! On Linux, we use `/dev/shm` (memory-backed tmpfs) to minimize I/O latency.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Once;

use netcdf::AttributeValue;
use tracing::debug;

use crate::container::{normalize_path, AttrValue, ContainerOpener, GridContainer, RawArray};
use crate::error::{SmapError, SmapResult};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose diagnostics to stderr even when errors
/// are handled gracefully, e.g. when probing for optional groups or
/// attributes. Probing is routine here (every candidate coordinate path is
/// checked), so this is called before any file is opened.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and null handlers are a
        // documented way to disable automatic error printing.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Removes the backing temp file once the container is dropped.
struct TempFileGuard(PathBuf);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

/// An opened granule backed by libnetcdf/HDF5.
pub struct NativeContainer {
    file: netcdf::File,
    // Declared after `file` so the handle is closed before the file is removed.
    _temp: Option<TempFileGuard>,
}

impl NativeContainer {
    /// Open a granule already on disk.
    pub fn open_path(path: impl Into<PathBuf>) -> SmapResult<Self> {
        silence_hdf5_errors();

        let path = path.into();
        let file = netcdf::open(&path)
            .map_err(|e| SmapError::InvalidFormat(format!("Failed to open HDF5 granule: {}", e)))?;

        Ok(Self { file, _temp: None })
    }

    /// Open a granule from downloaded bytes via a temp file.
    pub fn from_bytes(data: &[u8]) -> SmapResult<Self> {
        silence_hdf5_errors();

        let temp_path = get_optimal_temp_dir().join(generate_temp_filename());
        let guard = TempFileGuard(temp_path.clone());

        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(data)?;
        drop(file);

        debug!(path = %temp_path.display(), bytes = data.len(), "Wrote granule to temp file");

        let file = netcdf::open(&temp_path)
            .map_err(|e| SmapError::InvalidFormat(format!("Failed to open HDF5 granule: {}", e)))?;

        Ok(Self {
            file,
            _temp: Some(guard),
        })
    }

    fn variable(&self, path: &str) -> Option<netcdf::Variable<'_>> {
        self.file.variable(normalize_path(path))
    }
}

impl GridContainer for NativeContainer {
    fn has_group(&self, name: &str) -> bool {
        matches!(self.file.group(normalize_path(name)), Ok(Some(_)))
    }

    fn has_dataset(&self, path: &str) -> bool {
        self.variable(path).is_some()
    }

    fn read_array(&self, path: &str) -> SmapResult<RawArray> {
        let var = self
            .variable(path)
            .ok_or_else(|| SmapError::MissingData(path.to_string()))?;

        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let values = read_f64_values(&var, path)?;

        Ok(RawArray::new(shape, values))
    }

    fn read_value(&self, path: &str, row: usize, col: usize) -> SmapResult<f64> {
        let var = self
            .variable(path)
            .ok_or_else(|| SmapError::MissingData(path.to_string()))?;

        let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        match shape.as_slice() {
            [rows, cols] if row < *rows && col < *cols => read_f64_value(&var, path, [row, col]),
            _ => Err(SmapError::InvalidFormat(format!(
                "index ({}, {}) outside {} with shape {:?}",
                row, col, path, shape
            ))),
        }
    }

    fn group_attribute(&self, group: &str, name: &str) -> Option<AttrValue> {
        let group = self.file.group(normalize_path(group)).ok()??;
        // Probe by name first to avoid HDF5 errors for absent attributes
        if !group.attributes().any(|attr| attr.name() == name) {
            return None;
        }
        let value = group.attribute(name)?.value().ok()?;
        convert_attribute(value)
    }

    fn root_attribute(&self, name: &str) -> Option<AttrValue> {
        if !self.file.attributes().any(|attr| attr.name() == name) {
            return None;
        }
        let value = self.file.attribute(name)?.value().ok()?;
        convert_attribute(value)
    }
}

/// Opens downloaded bytes as a [`NativeContainer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeOpener;

impl ContainerOpener for NativeOpener {
    fn open(&self, data: &[u8]) -> SmapResult<Box<dyn GridContainer>> {
        Ok(Box::new(NativeContainer::from_bytes(data)?))
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// SMAP stores coordinates and soil moisture as float32, the EASE-2 axis
/// vectors as float64; read whichever the variable holds.
fn read_f64_values(var: &netcdf::Variable, path: &str) -> SmapResult<Vec<f64>> {
    if let Ok(values) = var.get_values::<f64, _>(..) {
        return Ok(values);
    }
    var.get_values::<f32, _>(..)
        .map(|values| values.into_iter().map(f64::from).collect())
        .map_err(|e| SmapError::InvalidFormat(format!("Failed to read {}: {}", path, e)))
}

/// Single-element counterpart of [`read_f64_values`].
fn read_f64_value(var: &netcdf::Variable, path: &str, index: [usize; 2]) -> SmapResult<f64> {
    if let Ok(value) = var.get_value::<f64, _>(index) {
        return Ok(value);
    }
    var.get_value::<f32, _>(index)
        .map(f64::from)
        .map_err(|e| SmapError::InvalidFormat(format!("Failed to read {} at {:?}: {}", path, index, e)))
}

fn convert_attribute(value: AttributeValue) -> Option<AttrValue> {
    match value {
        AttributeValue::Str(s) => Some(AttrValue::Text(s)),
        AttributeValue::Strs(v) => Some(AttrValue::Text(v.join(""))),
        AttributeValue::Uchars(b) => Some(AttrValue::Bytes(b)),
        AttributeValue::Schars(b) => Some(AttrValue::Bytes(b.into_iter().map(|c| c as u8).collect())),
        AttributeValue::Uchar(c) => Some(AttrValue::Bytes(vec![c])),
        AttributeValue::Schar(c) => Some(AttrValue::Bytes(vec![c as u8])),
        other => f64::try_from(other).ok().map(AttrValue::Number),
    }
}

/// Get the optimal temp directory for granule files.
///
/// On Linux, uses /dev/shm (memory-backed tmpfs) if available for faster I/O.
/// Falls back to the system temp directory on other platforms or if /dev/shm is unavailable.
fn get_optimal_temp_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        use std::path::Path;
        let shm_path = Path::new("/dev/shm");
        if shm_path.exists() && shm_path.is_dir() {
            let test_path = shm_path.join(format!(".smap_test_{}", std::process::id()));
            if std::fs::write(&test_path, b"test").is_ok() {
                let _ = std::fs::remove_file(&test_path);
                return shm_path.to_path_buf();
            }
        }
    }

    std::env::temp_dir()
}

/// Generate a unique temp file name for concurrent safety.
/// Uses process ID, thread ID, and a counter to ensure uniqueness.
fn generate_temp_filename() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let pid = std::process::id();
    let tid = std::thread::current().id();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("smap_granule_{}_{:?}_{}.h5", pid, tid, count)
}
