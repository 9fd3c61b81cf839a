//! Authenticated granule download from NASA Earthdata.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{redirect::Policy, Client, StatusCode};
use soil_common::{excerpt, UPSTREAM_EXCERPT_LEN};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::EarthdataCredentials;

const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Earthdata rejected the supplied credentials")]
    Unauthorized,

    #[error("granule download returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("granule download failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Downloads a granule payload into memory.
#[async_trait]
pub trait GranuleFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// HTTP session carrying Earthdata basic-auth credentials.
pub struct EarthdataSession {
    client: Client,
    credentials: EarthdataCredentials,
}

impl EarthdataSession {
    pub fn new(credentials: EarthdataCredentials, user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, credentials })
    }
}

#[async_trait]
impl GranuleFetcher for EarthdataSession {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(final_url = %response.url(), "Earthdata returned 401");
            return Err(FetchError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: excerpt(&body, UPSTREAM_EXCERPT_LEN),
            });
        }

        let data = response.bytes().await?;
        info!(size = data.len(), "Downloaded granule");
        Ok(data)
    }
}
