mod ip_api_provider;

pub use ip_api_provider::{IpApiConfig, IpApiProvider, DEFAULT_PROVIDER_URL, PROVIDER_FIELDS};
