//! loadboard-engine entry point.
//!
//! Wires the configured backend, the SQLite cache, the geocoder, and the
//! event bus into a running [`ListingEngine`], triggers the initial load,
//! and logs the events the engine publishes.

use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::EnvFilter;

use loadboard_engine::backend::{ListingBackend, RemoteServiceBackend, TabularFeedBackend};
use loadboard_engine::config::{BackendKind, EngineConfig};
use loadboard_engine::domain::EventBus;
use loadboard_engine::geo::HttpGeocoder;
use loadboard_engine::persistence::ListingCache;
use loadboard_engine::service::ListingEngine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = EngineConfig::from_env();
    tracing::info!(backend = ?config.backend, "starting loadboard-engine");

    // Shared HTTP client
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    // Durable local cache
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&config.cache_url)
        .await?;
    let cache = ListingCache::new(pool);

    // Backend selection is fixed for the process lifetime
    let backend: Arc<dyn ListingBackend> = match config.backend {
        BackendKind::Tabular => Arc::new(TabularFeedBackend::new(
            client.clone(),
            config.feed_url.clone(),
            config.feed_alt_url.clone(),
        )),
        BackendKind::Remote => Arc::new(RemoteServiceBackend::new(
            client.clone(),
            config.remote_base_url.clone(),
            config.remote_auth_token.clone(),
        )),
    };

    let geocoder = Arc::new(HttpGeocoder::new(client, config.geocoder_url.clone()));
    let bus = EventBus::new(config.event_bus_capacity);

    let (engine, handle) = ListingEngine::new(config, backend, geocoder, cache, bus.clone());
    let _engine_task = engine.spawn();

    // Initial load; the engine keeps cached data on failure
    if let Err(e) = handle.load_data().await {
        tracing::warn!(error = %e, "initial load failed, serving cached data");
    }

    // Surface engine events on the log until shutdown
    let mut events = bus.subscribe();
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => tracing::info!(event_type = event.event_type_str(), "engine event"),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event consumer lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}
