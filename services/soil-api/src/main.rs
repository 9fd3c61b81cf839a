//! Soil-moisture API server
//!
//! Point queries against NASA SMAP L3 soil-moisture granules.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use soil_api::config::ServiceConfig;
use soil_api::state::AppState;

/// Soil-moisture API server
#[derive(Parser, Debug)]
#[command(name = "soil-api")]
#[command(about = "SMAP soil-moisture point query server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:5000", env = "SOIL_API_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "SOIL_API_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting soil-moisture API server");

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics exporter initialized");

    let config = ServiceConfig::from_env()?;
    if config.credentials.is_none() {
        warn!("EARTHDATA_USER/EARTHDATA_PASS not set; soil-moisture queries will return 401");
    }
    info!(
        catalog = %config.catalog.search_url,
        collection = %config.catalog.collection_id,
        "Catalog configured"
    );

    let state = Arc::new(AppState::new(&config, Some(prometheus))?);
    let app = soil_api::build_router(state);

    let addr: SocketAddr = args.listen.parse().context("Invalid listen address")?;
    info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
