//! End-to-end soil-moisture point query.
//!
//! Validate → credentials → locate granule → download → open and sample.
//! Every failure is mapped onto [`SoilError`] here so handlers only render.

use std::sync::Arc;

use granule_search::{CatalogClient, CatalogError, GranuleLocator};
use serde::Serialize;
use smap_parser::{ContainerOpener, GridSampler, NativeOpener, SmapError};
use soil_common::{QueryRequest, SoilError, SoilResult};
use tracing::{info, instrument};

use crate::config::ServiceConfig;
use crate::earthdata::{EarthdataSession, FetchError, GranuleFetcher};

/// Product label reported with every reading.
pub const SOURCE_LABEL: &str = "SMAP SPL3SMP_E v006";

/// Grid indices of the sampled pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pixel {
    /// Row
    pub i: usize,
    /// Column
    pub j: usize,
}

/// A successful soil-moisture reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilMoistureReading {
    pub source: String,
    /// Requested date, `YYYY-MM-DD`.
    pub date: String,
    /// Catalog start time of the granule.
    pub time_start: String,
    #[serde(rename = "soilMoisture")]
    pub soil_moisture: f64,
    pub units: String,
    pub group: String,
    /// Timestamp attribute read from the granule, or empty.
    pub h5_date_attr: String,
    pub pixel: Pixel,
}

pub struct SoilMoistureOrchestrator {
    locator: Arc<dyn GranuleLocator>,
    /// `None` when Earthdata credentials are not configured.
    fetcher: Option<Arc<dyn GranuleFetcher>>,
    opener: Arc<dyn ContainerOpener>,
    sampler: GridSampler,
}

impl SoilMoistureOrchestrator {
    pub fn new(
        locator: Arc<dyn GranuleLocator>,
        fetcher: Option<Arc<dyn GranuleFetcher>>,
        opener: Arc<dyn ContainerOpener>,
    ) -> Self {
        Self {
            locator,
            fetcher,
            opener,
            sampler: GridSampler::default(),
        }
    }

    /// Wire the production catalog client, Earthdata session and HDF5 opener.
    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        let locator = Arc::new(CatalogClient::new(config.catalog.clone())?);

        let fetcher = match &config.credentials {
            Some(creds) => {
                let session = EarthdataSession::new(creds.clone(), &config.user_agent, config.download_timeout)?;
                Some(Arc::new(session) as Arc<dyn GranuleFetcher>)
            }
            None => None,
        };

        Ok(Self::new(locator, fetcher, Arc::new(NativeOpener)))
    }

    /// Validate raw query-string values, then run [`Self::query`].
    pub async fn query_raw(
        &self,
        lat: Option<&str>,
        lon: Option<&str>,
        date: Option<&str>,
    ) -> SoilResult<SoilMoistureReading> {
        let request = QueryRequest::parse(lat, lon, date)?;
        self.query(&request).await
    }

    #[instrument(skip_all, fields(lat = request.point.lat, lon = request.point.lon, date = %request.date))]
    pub async fn query(&self, request: &QueryRequest) -> SoilResult<SoilMoistureReading> {
        let fetcher = self.fetcher.as_ref().ok_or(SoilError::AuthMissing)?;

        let granule = self
            .locator
            .locate(request.date)
            .await
            .map_err(catalog_error)?
            .ok_or_else(|| SoilError::NotFound(request.date_iso()))?;

        let data = fetcher.fetch(&granule.download_url).await.map_err(fetch_error)?;

        let opener = Arc::clone(&self.opener);
        let sampler = self.sampler;
        let point = request.point;
        let sample = tokio::task::spawn_blocking(move || {
            let container = opener.open(&data)?;
            sampler.sample(container.as_ref(), point)
        })
        .await
        .map_err(|e| SoilError::SampleUnavailable(format!("sampling task failed: {}", e)))?
        .map_err(sample_error)?
        .ok_or_else(|| {
            SoilError::SampleUnavailable("no soil_moisture group with coordinates in granule".to_string())
        })?;

        info!(
            group = %sample.group_name,
            row = sample.pixel_row,
            col = sample.pixel_col,
            value = sample.value,
            "Sampled soil moisture"
        );

        Ok(SoilMoistureReading {
            source: SOURCE_LABEL.to_string(),
            date: request.date_iso(),
            time_start: granule.start_time_label,
            soil_moisture: sample.value,
            units: sample.units,
            group: sample.group_name,
            h5_date_attr: sample.timestamp_label,
            pixel: Pixel {
                i: sample.pixel_row,
                j: sample.pixel_col,
            },
        })
    }
}

fn catalog_error(err: CatalogError) -> SoilError {
    match err {
        CatalogError::Status { status, body } => SoilError::upstream_status(status, &body),
        other => SoilError::Upstream {
            status: other.status(),
            message: other.to_string(),
        },
    }
}

fn fetch_error(err: FetchError) -> SoilError {
    match err {
        FetchError::Unauthorized => SoilError::AuthFailed,
        FetchError::Status { status, body } => SoilError::upstream_status(status, &body),
        FetchError::Transport(e) => SoilError::upstream(e.to_string()),
    }
}

fn sample_error(err: SmapError) -> SoilError {
    match err {
        SmapError::GridShape(msg) => SoilError::GridShape(msg),
        other => SoilError::SampleUnavailable(other.to_string()),
    }
}
