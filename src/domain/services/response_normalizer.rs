//! Response Normalizer
//!
//! Maps provider answers onto the stable `GeoResult` shape.

use crate::domain::entities::{GeoResult, LookupOutcome};
use crate::domain::value_objects::{ClientAddress, UNKNOWN};

/// Builds the response body for every exit path of a lookup.
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Response for an address the loopback guard refused to look up.
    pub fn short_circuit(address: &ClientAddress) -> GeoResult {
        GeoResult::unknown(address.as_str())
    }

    /// Response for a completed provider call.
    ///
    /// - `Found`: provider values, `"Unknown"` for missing or empty ones
    /// - `Declined`: all unknown, resolved address echoed, no error tag
    /// - `Failed`: all unknown, tagged `lookup_failed`
    pub fn normalize(outcome: LookupOutcome, address: &ClientAddress) -> GeoResult {
        match outcome {
            LookupOutcome::Found(answer) => GeoResult {
                city: or_unknown(answer.city),
                country: or_unknown(answer.country),
                region: or_unknown(answer.region_name),
                isp: Some(or_unknown(answer.isp)),
                ip: Some(
                    non_empty(answer.query).unwrap_or_else(|| address.as_str().to_string()),
                ),
                error: None,
            },
            LookupOutcome::Declined(_) => GeoResult::unknown(address.as_str()),
            LookupOutcome::Failed(_) => GeoResult::lookup_failed(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn or_unknown(value: Option<String>) -> String {
    non_empty(value).unwrap_or_else(|| UNKNOWN.to_string())
}
