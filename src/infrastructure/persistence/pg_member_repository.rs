//! PostgreSQL implementation of member repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{Member, MemberProfile, NewMember};
use crate::domain::repositories::{
    JoinStrategy, MemberFilter, MemberQuery, MemberRepository, Projection,
};
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct ProfileRow {
    member_key: i64,
    member_id: String,
    name: String,
    team_name: String,
    password_hash: Option<String>,
}

impl From<ProfileRow> for MemberProfile {
    fn from(row: ProfileRow) -> Self {
        MemberProfile {
            member_key: row.member_key,
            member_id: row.member_id,
            name: row.name,
            team_name: row.team_name,
            password_hash: row.password_hash,
        }
    }
}

#[derive(Debug, FromRow)]
struct MemberRow {
    member_key: i64,
    member_id: String,
    name: String,
    password_hash: String,
    team_id: i64,
    created_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member::new(
            row.member_key,
            row.member_id,
            row.name,
            row.password_hash,
            row.team_id,
            row.created_at,
        )
    }
}

/// PostgreSQL repository for member lookups and creation.
///
/// Queries are assembled with [`QueryBuilder`] from a [`MemberQuery`], so the
/// filter, the selected columns and the join shape are all explicit.
pub struct PgMemberRepository {
    pool: Arc<PgPool>,
}

impl PgMemberRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Single query: member INNER JOIN team.
    async fn fetch_joined(&self, query: &MemberQuery) -> Result<Option<MemberProfile>, AppError> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT m.member_key, m.member_id, m.name, t.team_name, ");
        push_credentials_column(&mut builder, query.projection, "m.");
        builder.push(" FROM members m INNER JOIN teams t ON t.team_id = m.team_id WHERE ");
        push_filter(&mut builder, &query.filter, "m.");
        builder.push(" ORDER BY m.member_key LIMIT 1");

        let row = builder
            .build_query_as::<ProfileRow>()
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(MemberProfile::from))
    }

    /// Member row first, then its team by id.
    async fn fetch_two_step(&self, query: &MemberQuery) -> Result<Option<MemberProfile>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT member_key, member_id, name, password_hash, team_id, created_at FROM members WHERE ",
        );
        push_filter(&mut builder, &query.filter, "");
        builder.push(" ORDER BY member_key LIMIT 1");

        let Some(member) = builder
            .build_query_as::<MemberRow>()
            .fetch_optional(self.pool.as_ref())
            .await?
        else {
            return Ok(None);
        };

        let team_name: String =
            sqlx::query_scalar::<_, String>("SELECT team_name FROM teams WHERE team_id = $1")
                .bind(member.team_id)
                .fetch_optional(self.pool.as_ref())
                .await?
                .ok_or_else(|| {
                    AppError::internal(
                        "Member references a missing team",
                        json!({ "member_key": member.member_key, "team_id": member.team_id }),
                    )
                })?;

        let password_hash = match query.projection {
            Projection::Profile => None,
            Projection::ProfileWithCredentials => Some(member.password_hash),
        };

        Ok(Some(MemberProfile {
            member_key: member.member_key,
            member_id: member.member_id,
            name: member.name,
            team_name,
            password_hash,
        }))
    }
}

fn push_credentials_column(builder: &mut QueryBuilder<'_, Postgres>, projection: Projection, alias: &str) {
    match projection {
        Projection::Profile => builder.push("NULL::TEXT AS password_hash"),
        Projection::ProfileWithCredentials => builder.push(format!("{alias}password_hash")),
    };
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &MemberFilter, alias: &str) {
    match filter {
        MemberFilter::LoginId(member_id) => {
            builder.push(format!("{alias}member_id = "));
            builder.push_bind(member_id.clone());
        }
        MemberFilter::MemberKey(member_key) => {
            builder.push(format!("{alias}member_key = "));
            builder.push_bind(*member_key);
        }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn fetch_first(&self, query: &MemberQuery) -> Result<Option<MemberProfile>, AppError> {
        match query.join {
            JoinStrategy::FetchJoin => self.fetch_joined(query).await,
            JoinStrategy::TwoStep => self.fetch_two_step(query).await,
        }
    }

    async fn create(&self, new_member: NewMember) -> Result<Member, AppError> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            INSERT INTO members (member_id, name, password_hash, team_id)
            VALUES ($1, $2, $3, $4)
            RETURNING member_key, member_id, name, password_hash, team_id, created_at
            "#,
        )
        .bind(&new_member.member_id)
        .bind(&new_member.name)
        .bind(&new_member.password_hash)
        .bind(new_member.team_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<MemberProfile>, AppError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT m.member_key, m.member_id, m.name, t.team_name, NULL::TEXT AS password_hash
            FROM members m
            INNER JOIN teams t ON t.team_id = m.team_id
            ORDER BY m.member_key
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(MemberProfile::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
