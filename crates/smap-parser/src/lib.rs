//! SMAP soil-moisture granule parser.
//!
//! This crate samples SMAP L3 soil-moisture granules (SPL3SMP_E) at the
//! pixel nearest to a query point.
//!
//! # SMAP L3 Data Structure
//!
//! A granule is an HDF5 file holding one group per daily overpass:
//! `Soil_Moisture_Retrieval_Data_AM` (descending, 6 AM) and
//! `Soil_Moisture_Retrieval_Data_PM` (ascending, 6 PM). Each group carries
//! a `soil_moisture` dataset on the global EASE-2 grid plus, usually, 2D
//! `latitude`/`longitude` arrays. Some product versions instead store the
//! grid axes once under `/EASE2_grid` as 1D vectors.
//!
//! # Layout
//!
//! - [`container`]: the read-only view of a granule the sampler works against
//! - [`native`]: HDF5-backed container built on the netcdf library
//! - [`memory`]: in-memory container for fixtures
//! - [`coords`]: reconciliation of raw coordinate arrays into a 2D mesh
//! - [`schema`]: the static, ordered list of candidate data groups
//! - [`sampler`]: nearest-pixel sampling across the schemas

pub mod container;
pub mod coords;
pub mod error;
pub mod memory;
pub mod native;
pub mod sampler;
pub mod schema;

pub use container::{AttrValue, ContainerOpener, GridContainer, RawArray};
pub use coords::{nearest_pixel, resolve_coordinates, CoordinateGrid};
pub use error::{SmapError, SmapResult};
pub use memory::MemoryContainer;
pub use native::{silence_hdf5_errors, NativeContainer, NativeOpener};
pub use sampler::{GridSampler, SampleResult};
pub use schema::{GroupSchema, RANGE_BEGINNING_ATTR, SMAP_SCHEMAS, SOIL_MOISTURE_UNITS};
