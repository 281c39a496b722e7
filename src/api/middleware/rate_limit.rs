//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor,
};

use crate::utils::client_ip::{peer_ip, resolve_client_ip};

/// Keys requests by client IP, honouring proxy headers only when configured to.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &axum::http::Request<T>) -> Result<Self::Key, GovernorError> {
        resolve_client_ip(req.headers(), peer_ip(req.extensions()), self.behind_proxy)
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

pub type RateLimitLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

fn build(behind_proxy: bool, per_second: u64, burst_size: u32) -> RateLimitLayer {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor { behind_proxy })
        .per_second(per_second)
        .burst_size(burst_size)
        .finish()
        .expect("rate limiter periods and burst sizes are non-zero");

    GovernorLayer::new(Arc::new(governor_conf))
}

/// Creates a rate limiter for public endpoints (tracking, login, health).
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Per client IP: the socket peer address, or the forwarding headers when
/// `behind_proxy` is set.
pub fn layer(behind_proxy: bool) -> RateLimitLayer {
    build(behind_proxy, 2, 100)
}

/// Creates a stricter rate limiter for authenticated endpoints.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
pub fn secure_layer(behind_proxy: bool) -> RateLimitLayer {
    build(behind_proxy, 1, 10)
}
