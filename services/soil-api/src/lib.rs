//! Soil-moisture API service library.
//!
//! Answers "what was the surface soil moisture at this point on this day?"
//! from NASA SMAP L3 granules located via CMR and downloaded with Earthdata
//! credentials.

pub mod config;
pub mod earthdata;
pub mod handlers;
pub mod metrics;
pub mod orchestrator;
pub mod response;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the HTTP router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/smap/soil-moisture",
            get(handlers::soil_moisture::soil_moisture_handler),
        )
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
