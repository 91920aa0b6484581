//! Member login and management service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{LoginCredentials, LoginResult, Member, MemberProfile, NewMember};
use crate::domain::repositories::{JoinStrategy, MemberQuery, MemberRepository};
use crate::error::{AppError, LoginError};
use crate::infrastructure::auth::PasswordHasher;
use crate::utils::member_id::validate_member_id;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 128;

/// Service for verifying member credentials and managing member accounts.
///
/// The join strategy used for member+team lookups is fixed at construction
/// so every query issued by the service loads teams the same way.
pub struct MemberService {
    repository: Arc<dyn MemberRepository>,
    hasher: Arc<dyn PasswordHasher>,
    join: JoinStrategy,
}

impl MemberService {
    /// Creates a new member service.
    pub fn new(
        repository: Arc<dyn MemberRepository>,
        hasher: Arc<dyn PasswordHasher>,
        join: JoinStrategy,
    ) -> Self {
        Self {
            repository,
            hasher,
            join,
        }
    }

    pub fn join_strategy(&self) -> JoinStrategy {
        self.join
    }

    /// Verifies credentials and returns the member's login data.
    ///
    /// The returned [`LoginResult`] carries no tokens yet.
    ///
    /// # Errors
    ///
    /// - [`LoginError::CredentialsInvalid`] if no member has this login id or the
    ///   password does not match
    /// - [`LoginError::ServiceUnavailable`] if the member store fails
    /// - [`LoginError::Unknown`] if password verification cannot run
    pub async fn login_member(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<LoginResult, LoginError> {
        let query = MemberQuery::login(&credentials.id, self.join);

        let Some(mut profile) = self.repository.fetch_first(&query).await? else {
            tracing::debug!(member_id = %credentials.id, "No member for login id");
            return Err(LoginError::CredentialsInvalid);
        };

        let password_hash = profile.password_hash.take().ok_or_else(|| {
            AppError::internal(
                "Member query returned no credentials",
                json!({ "member_key": profile.member_key }),
            )
        })?;

        let hasher = Arc::clone(&self.hasher);
        let password = credentials.pw.clone();
        let verified =
            tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
                .await
                .map_err(|e| LoginError::Unknown(format!("Password verification failed: {e}")))?;

        if !verified {
            tracing::debug!(member_key = profile.member_key, "Password mismatch");
            return Err(LoginError::CredentialsInvalid);
        }

        Ok(LoginResult::from(profile))
    }

    /// Looks up a member profile by internal key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_profile(&self, member_key: i64) -> Result<Option<MemberProfile>, AppError> {
        self.repository
            .fetch_first(&MemberQuery::profile(member_key, self.join))
            .await
    }

    /// Creates a member with a freshly hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the login id, name or password is invalid.
    /// Returns [`AppError::Conflict`] if the login id is taken.
    /// Returns [`AppError::Internal`] on database or hashing errors.
    pub async fn register_member(
        &self,
        member_id: String,
        name: String,
        password: &str,
        team_id: i64,
    ) -> Result<Member, AppError> {
        validate_member_id(&member_id)?;

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request(
                "Member name must not be empty",
                json!({}),
            ));
        }

        if password.len() < PASSWORD_MIN_LEN || password.len() > PASSWORD_MAX_LEN {
            return Err(AppError::bad_request(
                "Invalid password length",
                json!({ "min": PASSWORD_MIN_LEN, "max": PASSWORD_MAX_LEN }),
            ));
        }

        let password_hash = self.hasher.hash(password)?;

        self.repository
            .create(NewMember {
                member_id,
                name,
                password_hash,
                team_id,
            })
            .await
    }

    /// Lists all members with their team names.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_members(&self) -> Result<Vec<MemberProfile>, AppError> {
        self.repository.list().await
    }

    /// Checks that the member store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database cannot be queried.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MemberFilter, MockMemberRepository, Projection};
    use crate::infrastructure::auth::MockPasswordHasher;
    use chrono::Utc;

    fn stored_profile() -> MemberProfile {
        MemberProfile {
            member_key: 11,
            member_id: "alice".to_string(),
            name: "Alice".to_string(),
            team_name: "Platform".to_string(),
            password_hash: Some("stored-hash".to_string()),
        }
    }

    fn credentials(pw: &str) -> LoginCredentials {
        LoginCredentials {
            id: "alice".to_string(),
            pw: pw.to_string(),
        }
    }

    fn service(
        repo: MockMemberRepository,
        hasher: MockPasswordHasher,
        join: JoinStrategy,
    ) -> MemberService {
        MemberService::new(Arc::new(repo), Arc::new(hasher), join)
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repo = MockMemberRepository::new();
        repo.expect_fetch_first()
            .withf(|query| {
                query.filter == MemberFilter::LoginId("alice".to_string())
                    && query.projection == Projection::ProfileWithCredentials
                    && query.join == JoinStrategy::FetchJoin
            })
            .times(1)
            .returning(|_| Ok(Some(stored_profile())));

        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .withf(|pw, hash| pw == "secret-pw" && hash == "stored-hash")
            .times(1)
            .returning(|_, _| true);

        let result = service(repo, hasher, JoinStrategy::FetchJoin)
            .login_member(&credentials("secret-pw"))
            .await
            .unwrap();

        assert_eq!(result.member_key, 11);
        assert_eq!(result.name, "Alice");
        assert_eq!(result.team_name, "Platform");
        assert!(result.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_login_uses_configured_join_strategy() {
        let mut repo = MockMemberRepository::new();
        repo.expect_fetch_first()
            .withf(|query| query.join == JoinStrategy::TwoStep)
            .times(1)
            .returning(|_| Ok(Some(stored_profile())));

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| true);

        let result = service(repo, hasher, JoinStrategy::TwoStep)
            .login_member(&credentials("secret-pw"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_unknown_member() {
        let mut repo = MockMemberRepository::new();
        repo.expect_fetch_first().times(1).returning(|_| Ok(None));

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().never();

        let result = service(repo, hasher, JoinStrategy::FetchJoin)
            .login_member(&credentials("whatever"))
            .await;

        assert!(matches!(result, Err(LoginError::CredentialsInvalid)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repo = MockMemberRepository::new();
        repo.expect_fetch_first()
            .returning(|_| Ok(Some(stored_profile())));

        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().times(1).returning(|_, _| false);

        let result = service(repo, hasher, JoinStrategy::FetchJoin)
            .login_member(&credentials("wrong"))
            .await;

        assert!(matches!(result, Err(LoginError::CredentialsInvalid)));
    }

    #[tokio::test]
    async fn test_login_repository_failure() {
        let mut repo = MockMemberRepository::new();
        repo.expect_fetch_first()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(repo, MockPasswordHasher::new(), JoinStrategy::FetchJoin)
            .login_member(&credentials("secret-pw"))
            .await;

        assert!(matches!(result, Err(LoginError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_login_missing_credentials_column() {
        let mut repo = MockMemberRepository::new();
        repo.expect_fetch_first().returning(|_| {
            Ok(Some(MemberProfile {
                password_hash: None,
                ..stored_profile()
            }))
        });

        let result = service(repo, MockPasswordHasher::new(), JoinStrategy::FetchJoin)
            .login_member(&credentials("secret-pw"))
            .await;

        assert!(matches!(result, Err(LoginError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_find_profile_uses_profile_projection() {
        let mut repo = MockMemberRepository::new();
        repo.expect_fetch_first()
            .withf(|query| {
                query.filter == MemberFilter::MemberKey(11)
                    && query.projection == Projection::Profile
            })
            .times(1)
            .returning(|_| {
                Ok(Some(MemberProfile {
                    password_hash: None,
                    ..stored_profile()
                }))
            });

        let profile = service(repo, MockPasswordHasher::new(), JoinStrategy::FetchJoin)
            .find_profile(11)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(profile.member_id, "alice");
        assert!(profile.password_hash.is_none());
    }

    #[tokio::test]
    async fn test_register_member_hashes_password() {
        let mut repo = MockMemberRepository::new();
        repo.expect_create()
            .withf(|new_member| {
                new_member.member_id == "bob"
                    && new_member.name == "Bob"
                    && new_member.password_hash == "hashed"
                    && new_member.team_id == 3
            })
            .times(1)
            .returning(|m| {
                Ok(Member::new(
                    5,
                    m.member_id,
                    m.name,
                    m.password_hash,
                    m.team_id,
                    Utc::now(),
                ))
            });

        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .withf(|pw| pw == "long-enough-pw")
            .times(1)
            .returning(|_| Ok("hashed".to_string()));

        let member = service(repo, hasher, JoinStrategy::FetchJoin)
            .register_member("bob".to_string(), "  Bob ".to_string(), "long-enough-pw", 3)
            .await
            .unwrap();

        assert_eq!(member.member_key, 5);
        assert_eq!(member.password_hash, "hashed");
    }

    #[tokio::test]
    async fn test_register_member_rejects_short_password() {
        let mut repo = MockMemberRepository::new();
        repo.expect_create().never();

        let result = service(repo, MockPasswordHasher::new(), JoinStrategy::FetchJoin)
            .register_member("bob".to_string(), "Bob".to_string(), "short", 3)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_member_rejects_bad_login_id() {
        let result = service(
            MockMemberRepository::new(),
            MockPasswordHasher::new(),
            JoinStrategy::FetchJoin,
        )
        .register_member("bad id".to_string(), "Bob".to_string(), "long-enough-pw", 3)
        .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
