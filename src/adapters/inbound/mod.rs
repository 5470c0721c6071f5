mod cors;
mod http_server;

pub use cors::{CorsHeaders, DEFAULT_ALLOW_HEADERS};
pub use http_server::{AppState, HttpServer};
