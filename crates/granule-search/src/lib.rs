//! Granule discovery through NASA's Common Metadata Repository (CMR).
//!
//! Given a date, [`CatalogClient`] searches one collection for granules whose
//! temporal extent overlaps that UTC day and picks the first secure HDF5
//! download link. [`GranuleLocator`] is the seam the query pipeline depends
//! on, so the catalog can be stubbed in tests.

pub mod client;
pub mod error;
pub mod feed;

pub use client::{CatalogClient, CatalogConfig, GranuleLocator, DEFAULT_CMR_SEARCH_URL, DEFAULT_PAGE_SIZE, SMAP_COLLECTION_CONCEPT_ID};
pub use error::{CatalogError, CatalogResult};
pub use feed::{select_granule, CmrEntry, CmrLink, CmrResponse, Granule};
