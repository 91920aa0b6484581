//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Seconds after which one request of a client's quota is replenished.
pub const PER_SECOND: u64 = 2;

/// Requests a client may issue in a burst before being throttled.
pub const BURST_SIZE: u32 = 20;

/// How client addresses are resolved for rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitMode {
    /// No rate limiting. Used by in-process tests, which have no peer address.
    Disabled,
    /// Key by socket peer address.
    PeerIp,
    /// Key by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`, falling back to
    /// the peer address. Only safe behind a trusted reverse proxy.
    ProxyHeaders,
}

impl RateLimitMode {
    pub fn from_behind_proxy(behind_proxy: bool) -> Self {
        if behind_proxy {
            RateLimitMode::ProxyHeaders
        } else {
            RateLimitMode::PeerIp
        }
    }
}

/// Applies the login rate limiter to `router`.
///
/// # Limits
///
/// - **Rate**: one request replenished every 2 seconds
/// - **Burst**: 20 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let routes = rate_limit::apply(nonauth_routes(), RateLimitMode::PeerIp);
/// ```
pub fn apply<S>(router: Router<S>, mode: RateLimitMode) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    match mode {
        RateLimitMode::Disabled => router,
        RateLimitMode::PeerIp => router.layer(peer_ip_layer()),
        RateLimitMode::ProxyHeaders => router.layer(proxy_headers_layer()),
    }
}

/// Per-client limiter keyed by the socket peer address.
pub fn peer_ip_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Per-client limiter keyed by forwarded-for headers.
pub fn proxy_headers_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_behind_proxy() {
        assert_eq!(
            RateLimitMode::from_behind_proxy(true),
            RateLimitMode::ProxyHeaders
        );
        assert_eq!(
            RateLimitMode::from_behind_proxy(false),
            RateLimitMode::PeerIp
        );
    }
}
