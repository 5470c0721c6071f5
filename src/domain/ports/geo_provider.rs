//! Geolocation Provider Port
//!
//! Defines the interface for looking up the location of a remote address.

use crate::domain::entities::ProviderQueryResult;
use crate::domain::errors::ProviderError;
use crate::domain::value_objects::ClientAddress;
use async_trait::async_trait;

/// Remote IP-to-location lookup.
///
/// This is an outbound port that abstracts the third-party provider.
/// Implementations make exactly one attempt per call and must not
/// panic on bad input: every failure comes back as a `ProviderError`.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Look up a single address.
    ///
    /// A provider-reported failure (`status != "success"`) is still an
    /// `Ok` value; only transport and decoding problems are errors.
    async fn lookup(&self, address: &ClientAddress) -> Result<ProviderQueryResult, ProviderError>;
}
