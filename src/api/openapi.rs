//! OpenAPI document for the public endpoints.

use axum::Json;
use utoipa::OpenApi;

/// Path the generated document is served at.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(description = "Member login: verifies credentials and issues JWT session tokens."),
    paths(
        crate::api::handlers::login::login_handler,
        crate::api::handlers::refresh::refresh_handler,
        crate::api::handlers::health::health_handler,
    ),
    tags(
        (name = "member", description = "Member endpoints reachable without an access token"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI document.
///
/// # Endpoint
///
/// `GET /api-docs/openapi.json`
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
