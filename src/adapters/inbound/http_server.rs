//! Geolocation HTTP Server
//!
//! Single entry point for browser callers: answers preflight requests,
//! otherwise runs a lookup and replies with a JSON `GeoResult`.
//! Every response is HTTP 200 with the cross-origin headers attached;
//! failures are only visible through the `error` field.

use crate::adapters::inbound::cors::CorsHeaders;
use crate::application::GeoLookupService;
use crate::domain::entities::GeoResult;
use crate::infrastructure::shutdown::shutdown_signal;
use axum::{
    extract::State,
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN},
        HeaderMap, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GeoLookupService>,
    pub cors: CorsHeaders,
}

impl AppState {
    pub fn new(service: Arc<GeoLookupService>, cors: CorsHeaders) -> Self {
        Self { service, cors }
    }
}

/// HTTP server for geolocation lookups.
pub struct HttpServer {
    listen_addr: String,
    state: AppState,
}

impl HttpServer {
    pub fn new(listen_addr: String, state: AppState) -> Self {
        Self { listen_addr, state }
    }

    /// Build the router with all middleware applied.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("geolocation API listening on {}", self.listen_addr);

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("geolocation API stopped");
        Ok(())
    }
}

/// Routes plus middleware.
///
/// Layer order matters: the panic guard sits innermost so that its
/// fallback response still passes through the header layers.
pub fn build_router(state: AppState) -> Router {
    let cors = state.cors.clone();

    Router::new()
        .route("/", any(geolocation_handler))
        .route("/api/v1/geolocation", any(geolocation_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_fallback))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            cors.allow_origin,
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            cors.allow_headers,
        ))
        .layer(TraceLayer::new_for_http())
}

// Handler functions

async fn geolocation_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    if method == Method::OPTIONS {
        return state.cors.preflight_response();
    }

    let result = state.service.locate(&headers).await;
    (StatusCode::OK, Json(result)).into_response()
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn panic_fallback(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("geolocation handler panicked: {}", detail);

    (StatusCode::OK, Json(GeoResult::lookup_failed())).into_response()
}
