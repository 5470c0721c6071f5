//! Adapters Layer
//!
//! Inbound adapters accept requests (HTTP), outbound adapters
//! implement domain ports against external services.

pub mod inbound;
pub mod outbound;
