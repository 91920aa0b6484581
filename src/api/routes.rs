//! API route configuration.
//!
//! Routes here are reachable without an access token and are mounted under
//! `/api/v1/nonauth/member`.

use crate::api::handlers::{login_handler, refresh_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Path prefix for member endpoints that do not require authentication.
pub const NONAUTH_MEMBER_PREFIX: &str = "/api/v1/nonauth/member";

/// Member endpoints that do not require authentication.
///
/// # Endpoints
///
/// - `POST /login`   - Verify credentials, issue access and refresh tokens
/// - `POST /refresh` - Exchange a refresh token for a new access token
pub fn nonauth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_handler))
        .route("/refresh", post(refresh_handler))
}
