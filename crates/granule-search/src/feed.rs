//! CMR JSON feed types and download-link selection.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Top-level `granules.json` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmrResponse {
    #[serde(default)]
    pub feed: CmrFeed,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmrFeed {
    #[serde(default)]
    pub entry: Vec<CmrEntry>,
}

/// One granule entry in the feed. Only the fields used for selection are
/// decoded; everything else in the entry is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmrEntry {
    #[serde(default)]
    pub time_start: Option<String>,
    #[serde(default)]
    pub links: Vec<CmrLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmrLink {
    #[serde(default)]
    pub href: String,
}

/// A granule resolved from a catalog response, scoped to one query.
#[derive(Debug, Clone, PartialEq)]
pub struct Granule {
    pub collection_id: String,
    pub temporal_window_start: DateTime<Utc>,
    pub temporal_window_end: DateTime<Utc>,
    pub download_url: String,
    /// `time_start` as reported by the catalog, or empty.
    pub start_time_label: String,
}

const SECURE_SCHEME: &str = "https://";
const HDF5_EXTENSION: &str = ".h5";

/// Whether `href` is a secure link to an HDF5 file.
pub fn is_hdf5_download(href: &str) -> bool {
    href.starts_with(SECURE_SCHEME) && href.ends_with(HDF5_EXTENSION)
}

/// Pick the first qualifying link, scanning entries then links in
/// response order.
pub fn select_granule(
    response: &CmrResponse,
    collection_id: &str,
    window: (DateTime<Utc>, DateTime<Utc>),
) -> Option<Granule> {
    response.feed.entry.iter().find_map(|entry| {
        entry
            .links
            .iter()
            .find(|link| is_hdf5_download(&link.href))
            .map(|link| Granule {
                collection_id: collection_id.to_string(),
                temporal_window_start: window.0,
                temporal_window_end: window.1,
                download_url: link.href.clone(),
                start_time_label: entry.time_start.clone().unwrap_or_default(),
            })
    })
}
