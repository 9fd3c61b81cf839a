//! HTTP client for the CMR granule search endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use soil_common::{day_window, excerpt, format_cmr_instant, UPSTREAM_EXCERPT_LEN};
use tracing::{debug, info, instrument};

use crate::error::{CatalogError, CatalogResult};
use crate::feed::{select_granule, CmrResponse, Granule};

/// Public CMR granule search endpoint.
pub const DEFAULT_CMR_SEARCH_URL: &str = "https://cmr.earthdata.nasa.gov/search/granules.json";

/// SPL3SMP_E v006: SMAP enhanced L3 radiometer global daily 9 km EASE-2 soil moisture.
pub const SMAP_COLLECTION_CONCEPT_ID: &str = "C1908344279-NSIDC_ECS";

/// Results requested per search.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Configuration for catalog searches.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Granule search endpoint
    pub search_url: String,
    /// Collection every search is constrained to
    pub collection_id: String,
    /// Maximum entries requested
    pub page_size: u32,
    /// Request timeout
    pub request_timeout: Duration,
    /// User-Agent header sent with each search
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_CMR_SEARCH_URL.to_string(),
            collection_id: SMAP_COLLECTION_CONCEPT_ID.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(30),
            user_agent: "FarmSparkGrow/1.0".to_string(),
        }
    }
}

/// Finds the granule covering a date.
#[async_trait]
pub trait GranuleLocator: Send + Sync {
    /// `Ok(None)` when the catalog has no qualifying granule for `date`.
    async fn locate(&self, date: NaiveDate) -> CatalogResult<Option<Granule>>;
}

/// CMR search client.
pub struct CatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new catalog client with the given configuration.
    pub fn new(config: CatalogConfig) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Run one search for the UTC day of `date`, newest granules first.
    #[instrument(skip(self), fields(collection = %self.config.collection_id))]
    pub async fn search(&self, date: NaiveDate) -> CatalogResult<CmrResponse> {
        let (start, end) = day_window(date);
        let temporal = format!("{},{}", format_cmr_instant(&start), format_cmr_instant(&end));
        let page_size = self.config.page_size.to_string();

        let response = self
            .client
            .get(&self.config.search_url)
            .query(&[
                ("collection_concept_id", self.config.collection_id.as_str()),
                ("temporal", temporal.as_str()),
                ("page_size", page_size.as_str()),
                ("sort_key", "-start_date"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: excerpt(&body, UPSTREAM_EXCERPT_LEN),
            });
        }

        let parsed: CmrResponse = serde_json::from_str(&body)
            .map_err(|e| CatalogError::Decode(format!("{}: {}", e, excerpt(&body, UPSTREAM_EXCERPT_LEN))))?;

        debug!(entries = parsed.feed.entry.len(), "Catalog search returned");

        Ok(parsed)
    }
}

#[async_trait]
impl GranuleLocator for CatalogClient {
    async fn locate(&self, date: NaiveDate) -> CatalogResult<Option<Granule>> {
        let response = self.search(date).await?;
        let granule = select_granule(&response, &self.config.collection_id, day_window(date));

        match &granule {
            Some(g) => info!(url = %g.download_url, time_start = %g.start_time_label, "Located granule"),
            None => info!(%date, "No granule for date"),
        }

        Ok(granule)
    }
}
