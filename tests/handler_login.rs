mod common;

use axum::http::{HeaderValue, StatusCode, header, header::SET_COOKIE};
use axum_test::TestServer;
use member_login::api::middleware::rate_limit::RateLimitMode;
use member_login::domain::repositories::JoinStrategy;
use member_login::error::BAD_CREDENTIALS_MESSAGE;
use member_login::infrastructure::auth::{TokenKind, TokenProvider};
use member_login::routes::api_router;
use serde_json::{Value, json};
use sqlx::PgPool;

const LOGIN: &str = "/api/v1/nonauth/member/login";
const REFRESH: &str = "/api/v1/nonauth/member/refresh";

async fn seeded_server(pool: PgPool, join: JoinStrategy) -> (TestServer, i64) {
    let team_id = common::create_test_team(&pool, "Platform").await;
    let member_key =
        common::create_test_member(&pool, "alice", "Alice", common::TEST_PASSWORD, team_id).await;

    let state = common::create_test_state(pool, join);
    let server = TestServer::new(api_router(state, RateLimitMode::Disabled)).unwrap();

    (server, member_key)
}

#[sqlx::test]
async fn test_login_success(pool: PgPool) {
    let (server, member_key) = seeded_server(pool, JoinStrategy::FetchJoin).await;

    let response = server
        .post(LOGIN)
        .json(&json!({ "id": "alice", "pw": common::TEST_PASSWORD }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], 200);
    assert_eq!(json["resultObject"]["memberKey"], member_key);
    assert_eq!(json["resultObject"]["memberId"], "alice");
    assert_eq!(json["resultObject"]["teamName"], "Platform");

    let access_token = json["resultObject"]["accessToken"].as_str().unwrap();
    assert!(!access_token.is_empty());
    assert!(
        !json["resultObject"]["refreshToken"]
            .as_str()
            .unwrap()
            .is_empty()
    );

    let cookies: Vec<_> = response.headers().get_all(SET_COOKIE).iter().collect();
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].to_str().unwrap().contains(access_token));
}

#[sqlx::test]
async fn test_login_success_with_two_step_join(pool: PgPool) {
    let (server, _) = seeded_server(pool, JoinStrategy::TwoStep).await;

    let response = server
        .post(LOGIN)
        .json(&json!({ "id": "alice", "pw": common::TEST_PASSWORD }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["resultObject"]["teamName"],
        "Platform"
    );
}

#[sqlx::test]
async fn test_login_unknown_member(pool: PgPool) {
    let (server, _) = seeded_server(pool, JoinStrategy::FetchJoin).await;

    let response = server
        .post(LOGIN)
        .json(&json!({ "id": "nobody", "pw": common::TEST_PASSWORD }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let json = response.json::<Value>();
    assert_eq!(json["status"], 401);
    assert_eq!(json["serverMessage"], BAD_CREDENTIALS_MESSAGE);
    assert!(response.headers().get(SET_COOKIE).is_none());
}

#[sqlx::test]
async fn test_login_wrong_password(pool: PgPool) {
    let (server, _) = seeded_server(pool, JoinStrategy::FetchJoin).await;

    let response = server
        .post(LOGIN)
        .json(&json!({ "id": "alice", "pw": "not-the-password" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["serverMessage"],
        BAD_CREDENTIALS_MESSAGE
    );
}

#[sqlx::test]
async fn test_login_database_unavailable(pool: PgPool) {
    let (server, _) = seeded_server(pool.clone(), JoinStrategy::FetchJoin).await;
    pool.close().await;

    let response = server
        .post(LOGIN)
        .json(&json!({ "id": "alice", "pw": common::TEST_PASSWORD }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<Value>();
    assert_eq!(json["status"], 500);
    assert!(json.get("serverMessage").is_none());
    assert!(json.get("resultObject").is_none());
}

#[sqlx::test]
async fn test_login_rejects_malformed_id(pool: PgPool) {
    let (server, _) = seeded_server(pool, JoinStrategy::FetchJoin).await;

    let response = server
        .post(LOGIN)
        .json(&json!({ "id": "alice'; --", "pw": "x" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[sqlx::test]
async fn test_refresh_after_login(pool: PgPool) {
    let (server, member_key) = seeded_server(pool, JoinStrategy::FetchJoin).await;

    let login = server
        .post(LOGIN)
        .json(&json!({ "id": "alice", "pw": common::TEST_PASSWORD }))
        .await
        .json::<Value>();
    let refresh_token = login["resultObject"]["refreshToken"].as_str().unwrap();

    let response = server
        .post(REFRESH)
        .json(&json!({ "refreshToken": refresh_token }))
        .await;

    response.assert_status_ok();
    let access_token = response.json::<Value>()["resultObject"]["accessToken"]
        .as_str()
        .unwrap()
        .to_string();

    let claims = common::test_token_provider()
        .verify(&access_token, TokenKind::Access)
        .unwrap();
    assert_eq!(claims.member_key().unwrap(), member_key);
}

#[sqlx::test]
async fn test_refresh_rejects_access_token(pool: PgPool) {
    let (server, _) = seeded_server(pool, JoinStrategy::FetchJoin).await;

    let login = server
        .post(LOGIN)
        .json(&json!({ "id": "alice", "pw": common::TEST_PASSWORD }))
        .await
        .json::<Value>();
    let access_token = login["resultObject"]["accessToken"].as_str().unwrap();

    let response = server
        .post(REFRESH)
        .json(&json!({ "refreshToken": access_token }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_health_endpoint(pool: PgPool) {
    let (server, _) = seeded_server(pool, JoinStrategy::FetchJoin).await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
}

#[sqlx::test]
async fn test_cors_allows_any_origin(pool: PgPool) {
    let (server, _) = seeded_server(pool, JoinStrategy::FetchJoin).await;

    let response = server
        .post(LOGIN)
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("https://app.example.com"),
        )
        .json(&json!({ "id": "alice", "pw": common::TEST_PASSWORD }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
