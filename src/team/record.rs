//! Committed team state

use serde::{Deserialize, Serialize};

use super::spec::{Permission, TeamSpec};
use super::units::UnitSet;
use crate::client::models::{Team, TeamId};
use crate::error::{ApiError, TeamError};

/// A team as it exists remotely, normalized into canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
    pub organization: String,
    pub permission: Permission,
    pub units: UnitSet,
    pub can_create_org_repo: bool,
    pub description: String,
    pub includes_all_repositories: bool,
}

impl TeamRecord {
    /// Normalize an API team.
    ///
    /// Some endpoints omit the owning organization; `organization` supplies it
    /// when the caller already knows it.
    pub fn from_remote(team: Team, organization: Option<&str>) -> Result<Self, TeamError> {
        let organization = team
            .organization
            .as_ref()
            .map(|o| o.login().to_string())
            .filter(|o| !o.is_empty())
            .or_else(|| organization.map(str::to_string))
            .ok_or_else(|| invalid(format!("team {} has no owning organization", team.id)))?;

        let permission = team.permission.parse::<Permission>().map_err(|_| {
            invalid(format!(
                "team {} has unsupported permission '{}'",
                team.id, team.permission
            ))
        })?;

        Ok(Self {
            id: team.id,
            name: team.name,
            organization,
            permission,
            units: UnitSet::from_remote(team.units),
            can_create_org_repo: team.can_create_org_repo,
            description: team.description,
            includes_all_repositories: team.includes_all_repositories,
        })
    }

    /// Whether this record already satisfies `spec`.
    pub fn matches(&self, spec: &TeamSpec) -> bool {
        super::planner::changed_fields(self, spec).is_empty()
    }
}

fn invalid(message: String) -> TeamError {
    TeamError::Remote(ApiError::InvalidResponse(message))
}
