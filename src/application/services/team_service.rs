//! Team management service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewTeam, Team};
use crate::domain::repositories::TeamRepository;
use crate::error::AppError;

pub const TEAM_NAME_MAX_LEN: usize = 100;

/// Service for creating and looking up teams.
pub struct TeamService {
    repository: Arc<dyn TeamRepository>,
}

impl TeamService {
    /// Creates a new team service.
    pub fn new(repository: Arc<dyn TeamRepository>) -> Self {
        Self { repository }
    }

    /// Creates a new team.
    ///
    /// Surrounding whitespace is trimmed from the name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is empty or too long.
    /// Returns [`AppError::Conflict`] if the team already exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_team(&self, team_name: &str) -> Result<Team, AppError> {
        let team_name = team_name.trim();

        if team_name.is_empty() || team_name.chars().count() > TEAM_NAME_MAX_LEN {
            return Err(AppError::bad_request(
                "Invalid team name length",
                json!({ "min": 1, "max": TEAM_NAME_MAX_LEN }),
            ));
        }

        if self.repository.find_by_name(team_name).await?.is_some() {
            return Err(AppError::conflict(
                "Team already exists",
                json!({ "team_name": team_name }),
            ));
        }

        self.repository
            .create(NewTeam {
                team_name: team_name.to_string(),
            })
            .await
    }

    /// Retrieves a team by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the team does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_team(&self, team_name: &str) -> Result<Team, AppError> {
        self.repository
            .find_by_name(team_name)
            .await?
            .ok_or_else(|| AppError::not_found("Team not found", json!({ "team_name": team_name })))
    }

    /// Lists all teams ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        self.repository.list().await
    }
}
