//! PostgreSQL implementation of team repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewTeam, Team};
use crate::domain::repositories::TeamRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct TeamRow {
    team_id: i64,
    team_name: String,
    created_at: DateTime<Utc>,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team::new(row.team_id, row.team_name, row.created_at)
    }
}

/// PostgreSQL repository for teams.
pub struct PgTeamRepository {
    pool: Arc<PgPool>,
}

impl PgTeamRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    async fn create(&self, new_team: NewTeam) -> Result<Team, AppError> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            INSERT INTO teams (team_name)
            VALUES ($1)
            RETURNING team_id, team_name, created_at
            "#,
        )
        .bind(&new_team.team_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, team_id: i64) -> Result<Option<Team>, AppError> {
        let row = sqlx::query_as::<_, TeamRow>(
            "SELECT team_id, team_name, created_at FROM teams WHERE team_id = $1",
        )
        .bind(team_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Team::from))
    }

    async fn find_by_name(&self, team_name: &str) -> Result<Option<Team>, AppError> {
        let row = sqlx::query_as::<_, TeamRow>(
            "SELECT team_id, team_name, created_at FROM teams WHERE team_name = $1",
        )
        .bind(team_name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Team::from))
    }

    async fn list(&self) -> Result<Vec<Team>, AppError> {
        let rows = sqlx::query_as::<_, TeamRow>(
            "SELECT team_id, team_name, created_at FROM teams ORDER BY team_name",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Team::from).collect())
    }
}
