//! Geo Lookup Service - Main application use case
//!
//! Orchestrates one lookup: resolve the caller's address, apply the
//! loopback guard, ask the provider, and normalize the answer.
//! This is the primary interface for the inbound adapter.

use crate::domain::entities::{GeoResult, LookupOutcome};
use crate::domain::ports::GeoProvider;
use crate::domain::services::{ClientAddressResolver, ResponseNormalizer};
use crate::domain::value_objects::ClientAddress;
use http::HeaderMap;
use std::sync::Arc;

/// Geo lookup service - main application use case.
///
/// Stateless apart from the provider handle, so a single instance is
/// shared by all concurrent requests.
pub struct GeoLookupService {
    provider: Arc<dyn GeoProvider>,
}

impl GeoLookupService {
    /// Create a new lookup service.
    pub fn new(provider: Arc<dyn GeoProvider>) -> Self {
        Self { provider }
    }

    /// Locate the caller of a request from its headers.
    ///
    /// Never fails: every path yields a well-formed `GeoResult`.
    pub async fn locate(&self, headers: &HeaderMap) -> GeoResult {
        let address = ClientAddressResolver::resolve(headers);
        self.locate_address(&address).await
    }

    /// Locate an already resolved address.
    pub async fn locate_address(&self, address: &ClientAddress) -> GeoResult {
        if !address.requires_lookup() {
            tracing::debug!("skipping lookup for local address {:?}", address.as_str());
            return ResponseNormalizer::short_circuit(address);
        }

        let outcome = self.query_provider(address).await;
        let found = matches!(outcome, LookupOutcome::Found(_));
        let result = ResponseNormalizer::normalize(outcome, address);
        if found && !result.is_known() {
            tracing::debug!("provider located {} without any location fields", address);
        }
        result
    }

    async fn query_provider(&self, address: &ClientAddress) -> LookupOutcome {
        let outcome = LookupOutcome::from(self.provider.lookup(address).await);

        match &outcome {
            LookupOutcome::Found(answer) => {
                tracing::debug!(
                    "located {} -> {:?}/{:?}/{:?}",
                    address,
                    answer.city,
                    answer.region_name,
                    answer.country
                );
            }
            LookupOutcome::Declined(answer) => {
                tracing::debug!(
                    "provider declined {}: {}",
                    address,
                    answer.message.as_deref().unwrap_or("no reason given")
                );
            }
            LookupOutcome::Failed(e) => {
                tracing::warn!("geolocation lookup failed for {}: {}", address, e);
            }
        }

        outcome
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::entities::ProviderQueryResult;
    use crate::domain::errors::ProviderError;
    use crate::domain::value_objects::{ErrorTag, UNKNOWN};
    use async_trait::async_trait;
    use http::HeaderValue;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tracing_test::traced_test;

    // ===== Mock Implementations =====

    struct MockProvider {
        response: Result<ProviderQueryResult, ProviderError>,
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn new(response: Result<ProviderQueryResult, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GeoProvider for MockProvider {
        async fn lookup(
            &self,
            address: &ClientAddress,
        ) -> Result<ProviderQueryResult, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(address.as_str().to_string());
            self.response.clone()
        }
    }

    // ===== Test Helpers =====

    fn toronto() -> ProviderQueryResult {
        ProviderQueryResult {
            status: Some("success".to_string()),
            message: None,
            country: Some("Canada".to_string()),
            region_name: Some("Ontario".to_string()),
            city: Some("Toronto".to_string()),
            isp: Some("Bell".to_string()),
            query: Some("8.8.8.8".to_string()),
        }
    }

    fn forwarded_for(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(value));
        headers
    }

    // ===== locate Tests =====

    #[tokio::test]
    async fn test_no_headers_skips_provider() {
        let provider = MockProvider::new(Ok(toronto()));
        let service = GeoLookupService::new(provider.clone());

        let result = service.locate(&HeaderMap::new()).await;

        assert_eq!(result, GeoResult::unknown(""));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_loopback_chain_skips_provider() {
        let provider = MockProvider::new(Ok(toronto()));
        let service = GeoLookupService::new(provider.clone());

        let result = service.locate(&forwarded_for("127.0.0.1, 10.0.0.5")).await;

        assert_eq!(result, GeoResult::unknown("127.0.0.1"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_ipv6_loopback_skips_provider() {
        let provider = MockProvider::new(Ok(toronto()));
        let service = GeoLookupService::new(provider.clone());

        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("::1"));
        let result = service.locate(&headers).await;

        assert_eq!(result.ip.as_deref(), Some("::1"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_success_is_normalized() {
        let provider = MockProvider::new(Ok(toronto()));
        let service = GeoLookupService::new(provider.clone());

        let result = service.locate(&forwarded_for("8.8.8.8")).await;

        assert_eq!(result.city, "Toronto");
        assert_eq!(result.country, "Canada");
        assert_eq!(result.region, "Ontario");
        assert_eq!(result.isp.as_deref(), Some("Bell"));
        assert_eq!(result.ip.as_deref(), Some("8.8.8.8"));
        assert!(result.error.is_none());
        assert_eq!(provider.calls(), 1);
        assert_eq!(*provider.seen.lock().unwrap(), vec!["8.8.8.8".to_string()]);
    }

    #[tokio::test]
    async fn test_transport_error_is_tagged() {
        let provider =
            MockProvider::new(Err(ProviderError::Transport("connection refused".into())));
        let service = GeoLookupService::new(provider.clone());

        let result = service.locate(&forwarded_for("8.8.8.8")).await;

        assert_eq!(result, GeoResult::lookup_failed());
        assert_eq!(result.error, Some(ErrorTag::LookupFailed));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_tagged() {
        let provider = MockProvider::new(Err(ProviderError::Timeout));
        let service = GeoLookupService::new(provider);

        let result = service.locate(&forwarded_for("8.8.8.8")).await;

        assert_eq!(result.error, Some(ErrorTag::LookupFailed));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_fail_status_is_untagged() {
        let provider = MockProvider::new(Ok(ProviderQueryResult {
            status: Some("fail".to_string()),
            message: Some("private range".to_string()),
            ..Default::default()
        }));
        let service = GeoLookupService::new(provider.clone());

        let result = service.locate(&forwarded_for("10.0.0.5")).await;

        assert_eq!(result.city, UNKNOWN);
        assert_eq!(result.country, UNKNOWN);
        assert_eq!(result.region, UNKNOWN);
        assert_eq!(result.ip.as_deref(), Some("10.0.0.5"));
        assert!(result.error.is_none());
        assert!(logs_contain("private range"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_success_without_fields_is_logged() {
        let provider = MockProvider::new(Ok(ProviderQueryResult {
            status: Some("success".to_string()),
            city: Some(String::new()),
            ..Default::default()
        }));
        let service = GeoLookupService::new(provider);

        let result = service.locate(&forwarded_for("203.0.113.7")).await;

        assert!(!result.is_known());
        assert_eq!(result.isp.as_deref(), Some(UNKNOWN));
        assert!(result.error.is_none());
        assert!(logs_contain("without any location fields"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_known_location_skips_empty_log() {
        let provider = MockProvider::new(Ok(toronto()));
        let service = GeoLookupService::new(provider);

        let result = service.locate(&forwarded_for("8.8.8.8")).await;

        assert!(result.is_known());
        assert!(!logs_contain("without any location fields"));
    }

    #[tokio::test]
    async fn test_malformed_address_is_forwarded() {
        let provider = MockProvider::new(Ok(ProviderQueryResult {
            status: Some("fail".to_string()),
            message: Some("invalid query".to_string()),
            ..Default::default()
        }));
        let service = GeoLookupService::new(provider.clone());

        let result = service.locate(&forwarded_for("not-an-ip")).await;

        assert_eq!(*provider.seen.lock().unwrap(), vec!["not-an-ip".to_string()]);
        assert_eq!(result.ip.as_deref(), Some("not-an-ip"));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_same_request_twice_is_idempotent() {
        let provider = MockProvider::new(Ok(toronto()));
        let service = GeoLookupService::new(provider.clone());
        let headers = forwarded_for("8.8.8.8");

        let first = service.locate(&headers).await;
        let second = service.locate(&headers).await;

        assert_eq!(first, second);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_are_independent() {
        let provider = MockProvider::new(Ok(toronto()));
        let service = Arc::new(GeoLookupService::new(provider.clone()));

        let lookups = (0..16).map(|i| {
            let service = service.clone();
            async move {
                let address = ClientAddress::new(format!("203.0.113.{}", i));
                service.locate_address(&address).await
            }
        });
        let results = futures::future::join_all(lookups).await;

        assert_eq!(results.len(), 16);
        assert!(results.iter().all(|r| r.city == "Toronto"));
        assert_eq!(provider.calls(), 16);
    }

    #[test]
    fn test_service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeoLookupService>();
    }
}
