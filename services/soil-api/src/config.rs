//! Service configuration loaded from the environment.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use granule_search::{CatalogConfig, DEFAULT_CMR_SEARCH_URL, DEFAULT_PAGE_SIZE, SMAP_COLLECTION_CONCEPT_ID};

const DEFAULT_USER_AGENT: &str = "FarmSparkGrow/1.0";
const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 90;

/// NASA Earthdata Login credentials.
#[derive(Clone, PartialEq)]
pub struct EarthdataCredentials {
    pub username: String,
    pub password: String,
}

impl EarthdataCredentials {
    /// Both parts must be present and non-empty.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self { username, password })
            }
            _ => None,
        }
    }
}

impl fmt::Debug for EarthdataCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EarthdataCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything the query pipeline needs, fixed at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// `None` when credentials are not configured; soil-moisture queries then fail with 401.
    pub credentials: Option<EarthdataCredentials>,
    pub catalog: CatalogConfig,
    /// Timeout for the granule download (payloads are tens of MB).
    pub download_timeout: Duration,
    pub user_agent: String,
}

impl ServiceConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `EARTHDATA_USER`, `EARTHDATA_PASS` | unset |
    /// | `CMR_SEARCH_URL` | CMR production granule search |
    /// | `SMAP_COLLECTION_CONCEPT_ID` | `C1908344279-NSIDC_ECS` |
    /// | `CATALOG_TIMEOUT_SECS` | 30 |
    /// | `DOWNLOAD_TIMEOUT_SECS` | 90 |
    /// | `HTTP_USER_AGENT` | `FarmSparkGrow/1.0` |
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let credentials = EarthdataCredentials::from_parts(lookup("EARTHDATA_USER"), lookup("EARTHDATA_PASS"));

        let user_agent = lookup("HTTP_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let catalog_timeout = parse_secs(&lookup, "CATALOG_TIMEOUT_SECS", DEFAULT_CATALOG_TIMEOUT_SECS)?;
        let download_timeout = parse_secs(&lookup, "DOWNLOAD_TIMEOUT_SECS", DEFAULT_DOWNLOAD_TIMEOUT_SECS)?;

        let catalog = CatalogConfig {
            search_url: lookup("CMR_SEARCH_URL").unwrap_or_else(|| DEFAULT_CMR_SEARCH_URL.to_string()),
            collection_id: lookup("SMAP_COLLECTION_CONCEPT_ID")
                .unwrap_or_else(|| SMAP_COLLECTION_CONCEPT_ID.to_string()),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: catalog_timeout,
            user_agent: user_agent.clone(),
        };

        Ok(Self {
            credentials,
            catalog,
            download_timeout,
            user_agent,
        })
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<Duration> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .with_context(|| format!("{} must be a whole number of seconds, got {:?}", key, value)),
        None => Ok(Duration::from_secs(default)),
    }
}
