//! ip-api Geolocation Provider
//!
//! Implements GeoProvider against the ip-api.com JSON endpoint
//! (or any service speaking the same format).
//!
//! See: https://ip-api.com/docs/api:json

use crate::domain::entities::ProviderQueryResult;
use crate::domain::errors::ProviderError;
use crate::domain::ports::GeoProvider;
use crate::domain::value_objects::ClientAddress;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

/// Public endpoint of the free ip-api tier.
pub const DEFAULT_PROVIDER_URL: &str = "http://ip-api.com/json";

/// Fields requested from the provider, in its own naming.
pub const PROVIDER_FIELDS: &str = "status,country,regionName,city,isp,query";

/// Configuration for the ip-api client.
#[derive(Debug, Clone)]
pub struct IpApiConfig {
    /// Base URL; the address is appended as the last path segment
    pub base_url: String,
    /// Upper bound for the whole request, connect through body
    pub timeout: Duration,
}

impl Default for IpApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROVIDER_URL.to_string(),
            timeout: Duration::from_millis(3000),
        }
    }
}

/// ip-api backed geolocation provider.
///
/// Makes a single GET per lookup. No retries: a slow or failing
/// provider results in a degraded answer rather than added latency.
pub struct IpApiProvider {
    base_url: Url,
    client: reqwest::Client,
}

impl IpApiProvider {
    /// Create a provider client with the given configuration.
    pub fn new(config: IpApiConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("provider URL {} cannot take a path", config.base_url);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Build the lookup URL for an address.
    ///
    /// The address becomes one percent-encoded path segment, so malformed
    /// header values cannot change the path or query. Dot segments are
    /// rejected: `push` drops them, which would turn the request into a
    /// lookup of this host's own address.
    pub fn lookup_url(&self, address: &ClientAddress) -> Result<Url, ProviderError> {
        if matches!(address.as_str(), "." | "..") {
            return Err(ProviderError::InvalidAddress(address.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidAddress(address.to_string()))?
            .pop_if_empty()
            .push(address.as_str());
        url.set_query(Some(&format!("fields={}", PROVIDER_FIELDS)));
        Ok(url)
    }
}

#[async_trait]
impl GeoProvider for IpApiProvider {
    async fn lookup(&self, address: &ClientAddress) -> Result<ProviderQueryResult, ProviderError> {
        let url = self.lookup_url(address)?;

        let response = self.client.get(url).send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus(status.as_u16()));
        }

        response
            .json::<ProviderQueryResult>()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Decode(e.to_string())
                }
            })
    }
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Transport(e.to_string())
    }
}
