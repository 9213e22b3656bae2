// Rust guideline compliant 2026-10-16

//! GeoSOS emergency-alert backend entry point.
//!
//! Wires the Google, ntfy, and SQLite adapters into the dispatcher and serves
//! the HTTP API until CTRL+C.
//!
//! # Usage
//!
//! ```text
//! GOOGLE_API_KEY=... NTFY_TOPIC=geosos-alerts cargo run -p geosos
//!
//! # Also show per-stage debug output
//! RUST_LOG=debug cargo run -p geosos
//! ```

mod adapters;
mod api;
mod config;

use adapters::google::GoogleApi;
use adapters::google_geocoder::GoogleGeocoder;
use adapters::google_places::GooglePlaces;
use adapters::ntfy_publisher::NtfyPublisher;
use adapters::sqlite_recorder::SqliteRecorder;
use anyhow::Context as _;
use config::AppConfig;
use dispatcher::{DispatchConfig, Dispatcher};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    // RUST_LOG wins over LOG_LEVEL.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // One HTTP client for every upstream, built once.
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .context("failed to build HTTP client")?;

    let google = GoogleApi::new(http.clone(), &config.google_maps_base_url, &config.google_api_key);
    let geocoder = GoogleGeocoder::new(google.clone());
    let places = GooglePlaces::new(google);
    let publisher = NtfyPublisher::new(http, &config.ntfy_base_url, config.ntfy_token.clone());
    let recorder = SqliteRecorder::new(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    let dispatch_config = DispatchConfig::builder(config.ntfy_topic.clone())
        .utc_offset(config.alert_utc_offset)
        .build()
        .context("failed to build dispatch config")?;
    let dispatcher = Dispatcher::new(dispatch_config, geocoder, publisher, recorder);

    let app = api::router(api::AppState::new(dispatcher, places));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, topic = %config.ntfy_topic, "main.listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            // A failed signal handler would mean no graceful stop; keep serving.
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("main.shutdown: ctrl_c received");
            } else {
                std::future::pending::<()>().await;
            }
        })
        .await
        .context("server error")?;

    Ok(())
}
