//! Error types for SMAP granule parsing operations.

use thiserror::Error;

/// Result type for SMAP parser operations.
pub type SmapResult<T> = Result<T, SmapError>;

/// Error types for SMAP granule parsing.
#[derive(Error, Debug)]
pub enum SmapError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Missing required dataset or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Coordinate arrays whose dimensionality cannot form a lat/lon mesh
    #[error("Unsupported coordinate grid: {0}")]
    GridShape(String),
}
