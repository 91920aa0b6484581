//! Team entity.

use chrono::{DateTime, Utc};

/// A named group of members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub team_id: i64,
    pub team_name: String,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(team_id: i64, team_name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            team_id,
            team_name,
            created_at,
        }
    }
}

/// Input data for creating a new team.
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub team_name: String,
}
