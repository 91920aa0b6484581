//! Response envelope shared by the member endpoints.

use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

/// JSON envelope wrapping every member endpoint response.
///
/// ```json
/// { "status": 200, "code": "SUCCESS", "resultObject": { ... } }
/// { "status": 401, "code": "UNAUTHORIZED", "serverMessage": "..." }
/// { "status": 500, "code": "INTERNAL_SERVER_ERROR" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody<T = ()> {
    pub status: u16,
    #[schema(value_type = String, example = "SUCCESS")]
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_object: Option<T>,
}

impl<T: Serialize> ResponseBody<T> {
    pub fn success(result: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            code: "SUCCESS",
            server_message: None,
            result_object: Some(result),
        }
    }
}

impl ResponseBody {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED.as_u16(),
            code: "UNAUTHORIZED",
            server_message: Some(message.into()),
            result_object: None,
        }
    }

    /// Server error envelope; carries no message.
    pub fn server_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            code: "INTERNAL_SERVER_ERROR",
            server_message: None,
            result_object: None,
        }
    }
}
