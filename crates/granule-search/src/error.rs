//! Error types for catalog searches.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors talking to the catalog service.
///
/// An empty result set is not an error; see [`crate::GranuleLocator::locate`].
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport failure (connect, timeout, TLS)
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response status
    #[error("catalog returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not a catalog feed
    #[error("catalog response could not be decoded: {0}")]
    Decode(String),
}

impl CatalogError {
    /// HTTP status of the catalog response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Status { status, .. } => Some(*status),
            CatalogError::Http(e) => e.status().map(|s| s.as_u16()),
            CatalogError::Decode(_) => None,
        }
    }
}
