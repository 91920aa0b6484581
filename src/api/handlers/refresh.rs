//! Handler for access token refresh endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::envelope::ResponseBody;
use crate::api::dto::login::{RefreshRequest, RefreshResult};
use crate::error::{AppError, ErrorBody};
use crate::infrastructure::auth::TokenKind;
use crate::state::AppState;

/// Exchanges a refresh token for a new access token.
///
/// # Endpoint
///
/// `POST /api/v1/nonauth/member/refresh`
///
/// # Request Body
///
/// ```json
/// { "refreshToken": "eyJ..." }
/// ```
///
/// # Response Codes
///
/// - **200 OK**: New access token issued and written to the auth cookie
/// - **400 Bad Request**: Body malformed, missing a field, or failed validation
/// - **401 Unauthorized**: Token invalid, expired, of the wrong kind, or the
///   member no longer exists
/// - **500 Internal Server Error**: Member store unavailable
#[utoipa::path(
    post,
    path = "/api/v1/nonauth/member/refresh",
    tag = "member",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token issued and set as cookie", body = ResponseBody<RefreshResult>),
        (status = 400, description = "Body malformed or failed validation", body = ErrorBody),
        (status = 401, description = "Refresh token rejected or member gone", body = ErrorBody),
        (status = 500, description = "Member store unavailable", body = ErrorBody),
    )
)]
pub async fn refresh_handler(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let member_key = state
        .token_provider
        .verify(&payload.refresh_token, TokenKind::Refresh)
        .and_then(|claims| claims.member_key())
        .map_err(|e| {
            tracing::warn!("Refresh rejected: {}", e);
            AppError::unauthorized("Invalid refresh token", json!({}))
        })?;

    if state.member_service.find_profile(member_key).await?.is_none() {
        tracing::warn!(member_key, "Refresh rejected: member no longer exists");
        return Err(AppError::unauthorized("Invalid refresh token", json!({})));
    }

    let access_token = state
        .token_provider
        .create_access_token(member_key)
        .map_err(|e| {
            AppError::internal(
                "Failed to issue access token",
                json!({ "reason": e.to_string() }),
            )
        })?;

    let mut headers = HeaderMap::new();
    state.auth_cookie.set_auth_cookie(&mut headers, &access_token)?;

    tracing::debug!(member_key, "Access token refreshed");

    let result = RefreshResult {
        member_key,
        access_token,
    };

    Ok((StatusCode::OK, headers, Json(ResponseBody::success(result))).into_response())
}
