//! Application Layer
//!
//! Use cases that wire domain logic to the outbound ports.

mod geo_lookup_service;

pub use geo_lookup_service::GeoLookupService;
