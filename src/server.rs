//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, collaborator wiring, and Axum
//! server lifecycle.

use crate::api::cookie::AuthCookie;
use crate::application::services::MemberService;
use crate::config::Config;
use crate::infrastructure::auth::{Argon2Hasher, JwtConfig, JwtTokenProvider, TokenProvider};
use crate::infrastructure::observability::init_metrics;
use crate::infrastructure::persistence::PgMemberRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the PostgreSQL pool using the configured pool limits.
///
/// # Errors
///
/// Returns an error if the database is unreachable within the connect timeout.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Wires repositories, services and token collaborators into [`AppState`].
pub fn build_state(config: &Config, pool: PgPool) -> AppState {
    let member_repository = Arc::new(PgMemberRepository::new(Arc::new(pool)));
    let member_service = Arc::new(MemberService::new(
        member_repository,
        Arc::new(Argon2Hasher::new()),
        config.member_join_strategy,
    ));

    let token_provider = Arc::new(JwtTokenProvider::new(JwtConfig::new(
        config.jwt_secret.clone(),
        config.access_token_ttl_seconds,
        config.refresh_token_ttl_seconds,
    )));

    let auth_cookie = Arc::new(AuthCookie::new(
        config.auth_cookie_name.clone(),
        token_provider.access_token_ttl(),
        config.auth_cookie_secure,
    ));

    AppState::new(member_service, token_provider, auth_cookie)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Member service, token provider and auth cookie writer
/// - Prometheus recorder (when `METRICS_ENABLED`)
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Migrations applied");

    let state = build_state(&config, pool);

    let metrics = init_metrics(config.metrics_enabled);

    let app = app_router(state, config.behind_proxy, metrics);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
