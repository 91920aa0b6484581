//! DTOs for the login and refresh endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::entities::LoginCredentials;
use crate::utils::member_id::LOGIN_ID_REGEX;

/// Login request body.
///
/// ```json
/// { "id": "alice", "pw": "secret" }
/// ```
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Login id
    #[schema(example = "alice", min_length = 1, max_length = 50, pattern = "^[A-Za-z0-9_.@-]+$")]
    #[validate(length(min = 1, max = 50))]
    #[validate(regex(path = "*LOGIN_ID_REGEX"))]
    pub id: String,

    /// Password
    #[schema(min_length = 1, max_length = 128)]
    #[validate(length(min = 1, max = 128))]
    pub pw: String,
}

impl From<LoginRequest> for LoginCredentials {
    fn from(request: LoginRequest) -> Self {
        LoginCredentials {
            id: request.id,
            pw: request.pw,
        }
    }
}

/// Refresh request body.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Result object returned by a successful refresh.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResult {
    pub member_key: i64,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str, pw: &str) -> LoginRequest {
        LoginRequest {
            id: id.to_string(),
            pw: pw.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("alice", "pw").validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_fields() {
        assert!(request("", "pw").validate().is_err());
        assert!(request("alice", "").validate().is_err());
    }

    #[test]
    fn test_rejects_bad_id_characters() {
        assert!(request("alice smith", "pw").validate().is_err());
    }

    #[test]
    fn test_refresh_request_uses_camel_case() {
        let parsed: RefreshRequest =
            serde_json::from_str(r#"{ "refreshToken": "abc" }"#).unwrap();
        assert_eq!(parsed.refresh_token, "abc");
    }
}
