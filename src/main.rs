//! geo-lookup - IP geolocation relay with Hexagonal Architecture
//!
//! This is the composition root that wires together all the components.

use geo_lookup::adapters::inbound::{AppState, CorsHeaders, HttpServer};
use geo_lookup::adapters::outbound::{IpApiConfig, IpApiProvider};
use geo_lookup::application::GeoLookupService;
use geo_lookup::config::load_config;
use geo_lookup::domain::ports::GeoProvider;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();

    tracing::info!(
        "starting geo-lookup listen={} provider={} timeout={}ms",
        cfg.listen_addr,
        cfg.provider_url,
        cfg.provider_timeout_ms
    );

    // ===== COMPOSITION ROOT =====

    // 1. Outbound adapter
    let provider: Arc<dyn GeoProvider> = Arc::new(IpApiProvider::new(IpApiConfig {
        base_url: cfg.provider_url.clone(),
        timeout: cfg.provider_timeout(),
    })?);

    // 2. Application service
    let service = Arc::new(GeoLookupService::new(provider));

    // 3. Inbound adapter
    let cors = CorsHeaders::new(&cfg.allow_headers)?;
    let server = HttpServer::new(cfg.listen_addr.clone(), AppState::new(service, cors));

    server.run().await
}
