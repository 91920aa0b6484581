//! Member entity and its login-facing projections.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// A persisted member account.
///
/// `password_hash` holds an Argon2 PHC string; the raw password is never stored.
#[derive(Debug, Clone)]
pub struct Member {
    pub member_key: i64,
    pub member_id: String,
    pub name: String,
    pub password_hash: String,
    pub team_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Creates a new Member instance.
    pub fn new(
        member_key: i64,
        member_id: String,
        name: String,
        password_hash: String,
        team_id: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            member_key,
            member_id,
            name,
            password_hash,
            team_id,
            created_at,
        }
    }
}

/// Input data for creating a new member.
///
/// The password must already be hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub member_id: String,
    pub name: String,
    pub password_hash: String,
    pub team_id: i64,
}

/// Member data joined with its team name.
///
/// `password_hash` is only populated when the query asked for credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    pub member_key: i64,
    pub member_id: String,
    pub name: String,
    pub team_name: String,
    pub password_hash: Option<String>,
}

/// Transient login input.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub id: String,
    pub pw: String,
}

/// Data returned to the client after a successful login.
///
/// Tokens are empty until the handler attaches them.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub member_key: i64,
    pub member_id: String,
    pub name: String,
    pub team_name: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl LoginResult {
    pub fn attach_tokens(&mut self, access_token: String, refresh_token: String) {
        self.access_token = access_token;
        self.refresh_token = refresh_token;
    }
}

impl From<MemberProfile> for LoginResult {
    fn from(profile: MemberProfile) -> Self {
        Self {
            member_key: profile.member_key,
            member_id: profile.member_id,
            name: profile.name,
            team_name: profile.team_name,
            access_token: String::new(),
            refresh_token: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> MemberProfile {
        MemberProfile {
            member_key: 7,
            member_id: "alice".to_string(),
            name: "Alice".to_string(),
            team_name: "Platform".to_string(),
            password_hash: Some("$argon2id$...".to_string()),
        }
    }

    #[test]
    fn test_login_result_from_profile_drops_credentials() {
        let result = LoginResult::from(profile());

        assert_eq!(result.member_key, 7);
        assert_eq!(result.team_name, "Platform");
        assert!(result.access_token.is_empty());
        assert!(result.refresh_token.is_empty());

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["memberKey"], 7);
        assert_eq!(json["teamName"], "Platform");
    }

    #[test]
    fn test_attach_tokens() {
        let mut result = LoginResult::from(profile());
        result.attach_tokens("access".to_string(), "refresh".to_string());

        assert_eq!(result.access_token, "access");
        assert_eq!(result.refresh_token, "refresh");
    }
}
