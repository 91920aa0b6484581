#![allow(dead_code)]

use chrono::Duration;
use member_login::api::cookie::AuthCookie;
use member_login::application::services::MemberService;
use member_login::domain::repositories::JoinStrategy;
use member_login::infrastructure::auth::{
    Argon2Hasher, JwtConfig, JwtTokenProvider, PasswordHasher,
};
use member_login::infrastructure::persistence::PgMemberRepository;
use member_login::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub async fn create_test_team(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO teams (team_name) VALUES ($1) RETURNING team_id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_member(
    pool: &PgPool,
    member_id: &str,
    name: &str,
    password: &str,
    team_id: i64,
) -> i64 {
    let password_hash = Argon2Hasher::new().hash(password).unwrap();

    sqlx::query_scalar(
        "INSERT INTO members (member_id, name, password_hash, team_id) \
         VALUES ($1, $2, $3, $4) RETURNING member_key",
    )
    .bind(member_id)
    .bind(name)
    .bind(password_hash)
    .bind(team_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn test_token_provider() -> Arc<JwtTokenProvider> {
    Arc::new(JwtTokenProvider::new(JwtConfig::new(
        TEST_JWT_SECRET,
        1800,
        1_209_600,
    )))
}

pub fn create_test_state(pool: PgPool, join: JoinStrategy) -> AppState {
    let member_repo = Arc::new(PgMemberRepository::new(Arc::new(pool)));
    let member_service = Arc::new(MemberService::new(
        member_repo,
        Arc::new(Argon2Hasher::new()),
        join,
    ));

    let auth_cookie = Arc::new(AuthCookie::new(
        "accessToken",
        Duration::seconds(1800),
        true,
    ));

    AppState::new(member_service, test_token_provider(), auth_cookie)
}
