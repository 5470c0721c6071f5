//! Domain Layer
//!
//! Request-scoped geolocation types and the pure logic that maps
//! request headers and provider answers onto a `GeoResult`.
//! Nothing here performs I/O.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{GeoResult, LookupOutcome, ProviderQueryResult};
pub use errors::ProviderError;
pub use value_objects::{ClientAddress, ErrorTag, UNKNOWN};
