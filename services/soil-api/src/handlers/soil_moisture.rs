//! GET /api/smap/soil-moisture

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::metrics::{record_query, Timer};
use crate::response::{ok_response, ApiError};
use crate::state::AppState;

/// Raw query-string values; validation happens in the orchestrator.
#[derive(Debug, Deserialize)]
pub struct SoilMoistureParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub date: Option<String>,
}

pub async fn soil_moisture_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SoilMoistureParams>,
) -> Response {
    let timer = Timer::start();

    let result = state
        .orchestrator
        .query_raw(params.lat.as_deref(), params.lon.as_deref(), params.date.as_deref())
        .await;

    match result {
        Ok(reading) => {
            record_query("ok", &timer);
            info!(
                group = %reading.group,
                elapsed_secs = timer.elapsed_secs(),
                "Soil moisture query served"
            );
            ok_response(reading)
        }
        Err(e) => {
            record_query(e.kind(), &timer);
            warn!(kind = e.kind(), error = %e, ?params, "Soil moisture query failed");
            ApiError(e).into_response()
        }
    }
}
