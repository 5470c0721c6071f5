//! Cross-Origin Headers and Preflight Handling
//!
//! The service is called from browsers on other origins, so every
//! response carries the same fixed permission headers and `OPTIONS`
//! requests are answered without touching the lookup path.

use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Request headers a browser caller may send.
pub const DEFAULT_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Fixed cross-origin header values, built once at startup.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    pub allow_origin: HeaderValue,
    pub allow_headers: HeaderValue,
}

impl CorsHeaders {
    /// Wildcard origin with the given allow-headers list.
    pub fn new(allow_headers: &str) -> anyhow::Result<Self> {
        Ok(Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_headers: HeaderValue::from_str(allow_headers)?,
        })
    }

    /// Empty-body answer to a preflight request.
    pub fn preflight_response(&self) -> Response {
        (
            StatusCode::OK,
            [
                (ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone()),
                (ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone()),
            ],
        )
            .into_response()
    }
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_headers: HeaderValue::from_static(DEFAULT_ALLOW_HEADERS),
        }
    }
}
