//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                          - Health check: DB (public)
//! - `GET  /api-docs/openapi.json`           - OpenAPI document (public)
//! - `GET  /metrics`                         - Prometheus metrics (when enabled)
//! - `POST /api/v1/nonauth/member/login`     - Member login
//! - `POST /api/v1/nonauth/member/refresh`   - Access token refresh
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin
//! - **Rate limiting** - Per-IP token bucket on member endpoints
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateLimitMode};
use crate::api::middleware::{cors, tracing};
use crate::api::openapi::{OPENAPI_PATH, openapi_handler};
use crate::api::routes::{NONAUTH_MEMBER_PREFIX, nonauth_routes};
use crate::infrastructure::observability::{PrometheusMetrics, metrics_router};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the route table with all middleware except path normalization.
///
/// Integration tests drive this router directly with
/// [`RateLimitMode::Disabled`].
pub fn api_router(state: AppState, rate_limit: RateLimitMode) -> Router {
    let member_routes = rate_limit::apply(nonauth_routes(), rate_limit);

    Router::new()
        .route("/health", get(health_handler))
        .route(OPENAPI_PATH, get(openapi_handler))
        .nest(NONAUTH_MEMBER_PREFIX, member_routes)
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
/// - `metrics` - installed Prometheus recorder, served at `/metrics`
pub fn app_router(
    state: AppState,
    behind_proxy: bool,
    metrics: Option<PrometheusMetrics>,
) -> NormalizePath<Router> {
    let mut router = api_router(state, RateLimitMode::from_behind_proxy(behind_proxy));

    if let Some(metrics) = metrics {
        router = router.merge(metrics_router(metrics));
    }

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cookie::AuthCookie;
    use crate::api::middleware::rate_limit::BURST_SIZE;
    use crate::application::services::MemberService;
    use crate::domain::repositories::{JoinStrategy, MockMemberRepository};
    use crate::error::BAD_CREDENTIALS_MESSAGE;
    use crate::infrastructure::auth::{MockPasswordHasher, MockTokenProvider};
    use axum::body::{Body, to_bytes};
    use axum::Extension;
    use axum::extract::ConnectInfo;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use chrono::Duration;
    use serde_json::Value;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        let mut repo = MockMemberRepository::new();
        repo.expect_fetch_first().returning(|_| Ok(None));
        repo.expect_ping().returning(|| Ok(()));

        let member_service = Arc::new(MemberService::new(
            Arc::new(repo),
            Arc::new(MockPasswordHasher::new()),
            JoinStrategy::FetchJoin,
        ));

        AppState::new(
            member_service,
            Arc::new(MockTokenProvider::new()),
            Arc::new(AuthCookie::new("accessToken", Duration::seconds(60), true)),
        )
    }

    // tower_governor reads `ConnectInfo` directly and ignores `MockConnectInfo`.
    fn peer() -> Extension<ConnectInfo<SocketAddr>> {
        Extension(ConnectInfo(SocketAddr::from(([203, 0, 113, 7], 40000))))
    }

    fn login_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{ "id": "nobody", "pw": "whatever" }"#))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_throttled_after_burst() {
        let app = api_router(state(), RateLimitMode::PeerIp).layer(peer());

        for _ in 0..BURST_SIZE {
            let response = app
                .clone()
                .oneshot(login_request("/api/v1/nonauth/member/login"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        let response = app
            .clone()
            .oneshot(login_request("/api/v1/nonauth/member/login"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_disabled_rate_limit_never_throttles() {
        let app = api_router(state(), RateLimitMode::Disabled);

        for _ in 0..=BURST_SIZE {
            let response = app
                .clone()
                .oneshot(login_request("/api/v1/nonauth/member/login"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_trailing_slash_reaches_login() {
        let app = peer().layer(app_router(state(), false, None));

        let response = app
            .oneshot(login_request("/api/v1/nonauth/member/login/"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(response).await["serverMessage"],
            BAD_CREDENTIALS_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let app = peer().layer(app_router(state(), false, None));

        let response = app.oneshot(get_request("/api-docs/openapi.json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc = json_body(response).await;
        assert!(doc["paths"]["/api/v1/nonauth/member/login"]["post"].is_object());
    }

    #[tokio::test]
    async fn test_metrics_route_absent_without_recorder() {
        let app = peer().layer(app_router(state(), false, None));

        let response = app.oneshot(get_request("/metrics")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
