//! Handler for member login endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::api::dto::envelope::ResponseBody;
use crate::api::dto::login::LoginRequest;
use crate::domain::entities::{LoginCredentials, LoginResult};
use crate::error::{AppError, BAD_CREDENTIALS_MESSAGE, ErrorBody, LoginError};
use crate::state::AppState;

/// Authenticates a member and issues session tokens.
///
/// # Endpoint
///
/// `POST /api/v1/nonauth/member/login`
///
/// # Request Body
///
/// ```json
/// { "id": "alice", "pw": "secret" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": 200,
///   "code": "SUCCESS",
///   "resultObject": {
///     "memberKey": 1,
///     "memberId": "alice",
///     "name": "Alice",
///     "teamName": "Platform",
///     "accessToken": "eyJ...",
///     "refreshToken": "eyJ..."
///   }
/// }
/// ```
///
/// The access token is also set as the auth cookie.
///
/// # Response Codes
///
/// - **200 OK**: Credentials verified
/// - **400 Bad Request**: Body malformed, missing a field, or failed validation
/// - **401 Unauthorized**: Wrong login id or password (fixed message), or an
///   unclassified failure (message echoed)
/// - **500 Internal Server Error**: Member store unavailable (no message)
#[utoipa::path(
    post,
    path = "/api/v1/nonauth/member/login",
    tag = "member",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials verified; access token also set as cookie", body = ResponseBody<LoginResult>),
        (status = 400, description = "Body malformed or failed validation", body = ErrorBody),
        (status = 401, description = "Wrong login id or password, or unclassified failure", body = ResponseBody<LoginResult>),
        (status = 500, description = "Member store unavailable; envelope without message", body = ResponseBody<LoginResult>),
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let credentials = LoginCredentials::from(payload);

    match login(&state, &credentials).await {
        Ok((headers, result)) => {
            metrics::counter!("member_login_total", "outcome" => "success").increment(1);
            tracing::info!(member_key = result.member_key, "Member logged in");

            Ok((StatusCode::OK, headers, Json(ResponseBody::success(result))).into_response())
        }
        Err(err) => Ok(failure_response(&credentials.id, err)),
    }
}

/// Verifies credentials, issues both tokens and writes the auth cookie.
async fn login(
    state: &AppState,
    credentials: &LoginCredentials,
) -> Result<(HeaderMap, LoginResult), LoginError> {
    let mut result = state.member_service.login_member(credentials).await?;

    let access_token = state
        .token_provider
        .create_access_token(result.member_key)
        .map_err(|e| LoginError::Unknown(e.to_string()))?;
    let refresh_token = state
        .token_provider
        .create_refresh_token(result.member_key)
        .map_err(|e| LoginError::Unknown(e.to_string()))?;

    let mut headers = HeaderMap::new();
    state
        .auth_cookie
        .set_auth_cookie(&mut headers, &access_token)
        .map_err(|e| LoginError::Unknown(e.to_string()))?;

    result.attach_tokens(access_token, refresh_token);

    Ok((headers, result))
}

fn failure_response(member_id: &str, err: LoginError) -> Response {
    match err {
        LoginError::CredentialsInvalid => {
            metrics::counter!("member_login_total", "outcome" => "bad_credentials").increment(1);
            tracing::warn!(member_id, "Login rejected: {}", err);

            (
                StatusCode::UNAUTHORIZED,
                Json(ResponseBody::unauthorized(BAD_CREDENTIALS_MESSAGE)),
            )
                .into_response()
        }
        LoginError::ServiceUnavailable(ref source) => {
            metrics::counter!("member_login_total", "outcome" => "service_error").increment(1);
            tracing::error!(member_id, error = %source, "Login failed: {}", err);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResponseBody::server_error()),
            )
                .into_response()
        }
        LoginError::Unknown(message) => {
            metrics::counter!("member_login_total", "outcome" => "unknown_error").increment(1);
            tracing::error!(member_id, "Login failed: {}", message);

            (
                StatusCode::UNAUTHORIZED,
                Json(ResponseBody::unauthorized(message)),
            )
                .into_response()
        }
    }
}
