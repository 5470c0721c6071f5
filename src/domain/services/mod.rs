mod client_address_resolver;
mod response_normalizer;

pub use client_address_resolver::ClientAddressResolver;
pub use response_normalizer::ResponseNormalizer;
