//! Repository trait for team management.

use crate::domain::entities::{NewTeam, Team};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for teams.
///
/// Teams are only written by administrative flows; the login path reads them
/// through [`crate::domain::repositories::MemberRepository`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTeamRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Creates a new team.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the team name already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_team: NewTeam) -> Result<Team, AppError>;

    /// Finds a team by its database ID.
    async fn find_by_id(&self, team_id: i64) -> Result<Option<Team>, AppError>;

    /// Finds a team by its unique name.
    async fn find_by_name(&self, team_name: &str) -> Result<Option<Team>, AppError>;

    /// Lists all teams ordered by name.
    async fn list(&self) -> Result<Vec<Team>, AppError>;
}
