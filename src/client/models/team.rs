//! Team models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Organization;

/// Platform-assigned team identifier.
///
/// Opaque to the reconciler: it is only ever copied from API responses,
/// never derived from team attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(i64);

impl TeamId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TeamId)
    }
}

/// Team as returned by the Forgejo API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Team ID
    pub id: TeamId,

    /// Team name
    pub name: String,

    /// Team description
    #[serde(default)]
    pub description: String,

    /// Owning organization (omitted by some endpoints)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,

    /// Whether the team has access to every repository of the organization
    #[serde(default)]
    pub includes_all_repositories: bool,

    /// Permission level: none, read, write, admin (or owner for the Owners team)
    #[serde(default)]
    pub permission: String,

    /// Enabled repository units
    #[serde(default)]
    pub units: Vec<String>,

    /// Whether members may create repositories in the organization
    #[serde(default)]
    pub can_create_org_repo: bool,
}

/// Request body for `POST /orgs/{org}/teams`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: String,
    pub includes_all_repositories: bool,
    pub permission: String,
    pub units: Vec<String>,
    pub can_create_org_repo: bool,
}

/// Request body for `PATCH /teams/{id}`.
///
/// Every field is sent so the update is a full replacement of the mutable
/// attributes, which keeps repeated updates idempotent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateTeamRequest {
    pub name: String,
    pub description: String,
    pub includes_all_repositories: bool,
    pub permission: String,
    pub units: Vec<String>,
    pub can_create_org_repo: bool,
}
