//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};

/// Placeholder for any location field that could not be determined.
pub const UNKNOWN: &str = "Unknown";

const IPV4_LOOPBACK: &str = "127.0.0.1";
const IPV6_LOOPBACK: &str = "::1";

/// Best-guess address of the caller, taken from proxy headers.
///
/// The value is kept exactly as the header carried it (no IP syntax
/// validation), or empty when no header was present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ClientAddress(String);

impl ClientAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The address used when no header yields a value.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the address is one of the loopback literals.
    ///
    /// This is a literal comparison: `127.0.0.2` or `0:0:0:0:0:0:0:1`
    /// are forwarded to the provider like any other address.
    pub fn is_loopback(&self) -> bool {
        self.0 == IPV4_LOOPBACK || self.0 == IPV6_LOOPBACK
    }

    /// Loopback guard: empty and loopback addresses cannot be geolocated.
    pub fn requires_lookup(&self) -> bool {
        !self.is_empty() && !self.is_loopback()
    }
}

impl std::fmt::Display for ClientAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error tag carried in the `error` field of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorTag {
    /// The lookup failed unexpectedly (transport error, timeout, panic).
    LookupFailed,
}

impl ErrorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LookupFailed => "lookup_failed",
        }
    }
}

impl std::fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
