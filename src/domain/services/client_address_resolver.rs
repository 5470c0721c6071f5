//! Client Address Resolver
//!
//! Picks the caller's address out of the headers injected by the
//! proxies and CDN in front of the service.

use crate::domain::value_objects::ClientAddress;
use http::header::HeaderName;
use http::HeaderMap;
use std::borrow::Cow;

/// Comma-separated proxy chain; the first entry is the originating client.
pub const FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
/// Set by Cloudflare to the address that connected to the edge.
pub const CONNECTING_IP: HeaderName = HeaderName::from_static("cf-connecting-ip");
/// Generic single-address header set by nginx and friends.
pub const REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");

/// Resolves a `ClientAddress` from request headers.
///
/// Candidates are tried in order, first non-empty value wins:
/// 1. first entry of `x-forwarded-for`, trimmed
/// 2. `cf-connecting-ip`, verbatim
/// 3. `x-real-ip`, verbatim
///
/// Values are not checked for IP syntax.
pub struct ClientAddressResolver;

impl ClientAddressResolver {
    pub fn resolve(headers: &HeaderMap) -> ClientAddress {
        let chain = header_text(headers, &FORWARDED_FOR);
        let forwarded = chain
            .as_deref()
            .and_then(|chain| chain.split(',').next())
            .map(str::trim);
        let connecting = header_text(headers, &CONNECTING_IP);
        let real = header_text(headers, &REAL_IP);

        let address = [forwarded, connecting.as_deref(), real.as_deref()]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.is_empty())
            .map(ClientAddress::new)
            .unwrap_or_default();
        address
    }
}

/// Header value as text. Bytes outside UTF-8 become U+FFFD; the value
/// is still used rather than skipped.
fn header_text<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<Cow<'a, str>> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
}
