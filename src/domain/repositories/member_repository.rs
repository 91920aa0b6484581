//! Repository trait and query specification for member lookups.

use crate::domain::entities::{Member, MemberProfile, NewMember};
use crate::error::AppError;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

/// Which member a query selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberFilter {
    /// Match on the login identifier.
    LoginId(String),
    /// Match on the internal member key.
    MemberKey(i64),
}

/// Which columns a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Member key, login id, display name and team name.
    Profile,
    /// [`Projection::Profile`] plus the stored password hash.
    ProfileWithCredentials,
}

/// How the member's team is loaded.
///
/// `FetchJoin` issues one `INNER JOIN` query. `TwoStep` loads the member row
/// first and the team by id second; it costs an extra round trip per member
/// and turns into N+1 queries if used for lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinStrategy {
    #[default]
    FetchJoin,
    TwoStep,
}

impl FromStr for JoinStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fetch_join" | "fetch-join" | "join" => Ok(JoinStrategy::FetchJoin),
            "two_step" | "two-step" => Ok(JoinStrategy::TwoStep),
            other => Err(format!(
                "unknown join strategy '{other}', expected 'fetch_join' or 'two_step'"
            )),
        }
    }
}

impl fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinStrategy::FetchJoin => f.write_str("fetch_join"),
            JoinStrategy::TwoStep => f.write_str("two_step"),
        }
    }
}

/// A single-record member query: filter, projection and join strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberQuery {
    pub filter: MemberFilter,
    pub projection: Projection,
    pub join: JoinStrategy,
}

impl MemberQuery {
    /// Query used by the login flow: by login id, including the password hash.
    pub fn login(member_id: impl Into<String>, join: JoinStrategy) -> Self {
        Self {
            filter: MemberFilter::LoginId(member_id.into()),
            projection: Projection::ProfileWithCredentials,
            join,
        }
    }

    /// Profile lookup by member key, without credentials.
    pub fn profile(member_key: i64, join: JoinStrategy) -> Self {
        Self {
            filter: MemberFilter::MemberKey(member_key),
            projection: Projection::Profile,
            join,
        }
    }
}

/// Repository interface for member accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMemberRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_member.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Returns the first member matching `query`, or `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, or when a member
    /// references a team that does not exist.
    async fn fetch_first(&self, query: &MemberQuery) -> Result<Option<MemberProfile>, AppError>;

    /// Creates a new member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the login id is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_member: NewMember) -> Result<Member, AppError>;

    /// Lists all members with their team names, ordered by member key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<MemberProfile>, AppError>;

    /// Checks that the member store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
