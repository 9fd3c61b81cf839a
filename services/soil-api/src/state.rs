//! Application state for the soil-moisture API.

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::ServiceConfig;
use crate::orchestrator::SoilMoistureOrchestrator;

/// Shared application state.
pub struct AppState {
    pub orchestrator: SoilMoistureOrchestrator,

    /// Handle for rendering `/metrics`; `None` when no recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Build production state from configuration.
    pub fn new(config: &ServiceConfig, prometheus: Option<PrometheusHandle>) -> Result<Self> {
        Ok(Self {
            orchestrator: SoilMoistureOrchestrator::from_config(config)?,
            prometheus,
        })
    }

    pub fn with_orchestrator(orchestrator: SoilMoistureOrchestrator) -> Self {
        Self {
            orchestrator,
            prometheus: None,
        }
    }
}
