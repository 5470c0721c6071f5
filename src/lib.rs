//! geo-lookup Library
//!
//! This module exposes the geolocation service components for use in
//! integration tests and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::inbound::{AppState, CorsHeaders, HttpServer};
pub use adapters::outbound::{IpApiConfig, IpApiProvider};
pub use application::GeoLookupService;
pub use config::{load_config, Config};
pub use domain::entities::{GeoResult, LookupOutcome, ProviderQueryResult};
pub use domain::ports::GeoProvider;
pub use domain::value_objects::{ClientAddress, ErrorTag};
