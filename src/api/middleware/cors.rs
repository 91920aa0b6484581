//! Cross-origin resource sharing policy.

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS layer: any origin, method and header.
///
/// Login is called from browser front-ends served from other origins.
/// Credentials are carried by the cookie set on the API origin itself, so
/// no `Access-Control-Allow-Credentials` is emitted.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
