//! Domain Entities - Core business objects
//!
//! Every entity here is request-scoped: created while handling one
//! lookup and dropped once the response is written.

use crate::domain::errors::ProviderError;
use crate::domain::value_objects::{ErrorTag, UNKNOWN};
use serde::{Deserialize, Serialize};

/// Raw answer from the geolocation provider.
///
/// Every field is optional so that an absent field can be told apart
/// from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderQueryResult {
    /// `"success"` or `"fail"`
    #[serde(default)]
    pub status: Option<String>,
    /// Failure reason, only sent alongside `"fail"`
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub isp: Option<String>,
    /// The address the provider actually looked up
    #[serde(default)]
    pub query: Option<String>,
}

impl ProviderQueryResult {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// Result of asking the provider about one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Provider answered with `status: "success"`.
    Found(ProviderQueryResult),
    /// Provider answered, but declined (private range, invalid query, ...).
    Declined(ProviderQueryResult),
    /// Provider could not be reached or its answer was unusable.
    Failed(ProviderError),
}

impl From<Result<ProviderQueryResult, ProviderError>> for LookupOutcome {
    fn from(result: Result<ProviderQueryResult, ProviderError>) -> Self {
        match result {
            Ok(answer) if answer.is_success() => Self::Found(answer),
            Ok(answer) => Self::Declined(answer),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Location returned to the caller.
///
/// `city`, `country` and `region` are always present; optional fields
/// are left out of the JSON body when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoResult {
    pub city: String,
    pub country: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorTag>,
}

impl GeoResult {
    /// All-unknown location echoing the given address.
    pub fn unknown(ip: impl Into<String>) -> Self {
        Self {
            city: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            isp: None,
            ip: Some(ip.into()),
            error: None,
        }
    }

    /// All-unknown location tagged `lookup_failed`.
    pub fn lookup_failed() -> Self {
        Self {
            city: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            isp: None,
            ip: None,
            error: Some(ErrorTag::LookupFailed),
        }
    }

    /// Whether any of the location fields carries a real value.
    pub fn is_known(&self) -> bool {
        self.city != UNKNOWN || self.country != UNKNOWN || self.region != UNKNOWN
    }
}
