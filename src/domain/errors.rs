//! Domain Errors

/// Failure talking to the geolocation provider.
///
/// These never reach the HTTP status layer; the application service
/// turns every variant into a `lookup_failed` response body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request timed out")]
    Timeout,
    #[error("provider transport error: {0}")]
    Transport(String),
    #[error("provider returned HTTP {0}")]
    HttpStatus(u16),
    #[error("provider response could not be decoded: {0}")]
    Decode(String),
    #[error("cannot build provider URL for address {0:?}")]
    InvalidAddress(String),
}
