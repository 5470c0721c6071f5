use crate::adapters::inbound::DEFAULT_ALLOW_HEADERS;
use crate::adapters::outbound::DEFAULT_PROVIDER_URL;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub debug: bool,

    // Geolocation provider
    pub provider_url: String,
    pub provider_timeout_ms: u64,

    // Cross-origin headers
    pub allow_headers: String,
}

impl Config {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            debug: false,
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            provider_timeout_ms: 3000,
            allow_headers: DEFAULT_ALLOW_HEADERS.to_string(),
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let listen_addr = std::env::var("GEOLOOKUP_LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let debug = std::env::var("DEBUG").is_ok();

    let provider_url = std::env::var("GEOLOOKUP_PROVIDER_URL")
        .unwrap_or_else(|_| DEFAULT_PROVIDER_URL.to_string());

    let provider_timeout_ms = std::env::var("GEOLOOKUP_PROVIDER_TIMEOUT_MS")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .ok()
        .filter(|&ms: &u64| ms > 0)
        .unwrap_or(3000);

    let allow_headers = std::env::var("GEOLOOKUP_ALLOW_HEADERS")
        .unwrap_or_else(|_| DEFAULT_ALLOW_HEADERS.to_string());

    Ok(Config {
        listen_addr,
        debug,
        provider_url,
        provider_timeout_ms,
        allow_headers,
    })
}
