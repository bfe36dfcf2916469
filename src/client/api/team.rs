//! Team API trait for CRUD operations
//!
//! This trait covers the team operations the reconciler drives:
//! - Organization existence check
//! - Team listing and lookup by name
//! - Create, read, update and delete by id

use async_trait::async_trait;

use crate::client::ApiResult;
use crate::client::models::{CreateTeamRequest, Organization, Team, TeamId, UpdateTeamRequest};

/// Page size used when walking an organization's teams
pub const TEAM_PAGE_SIZE: usize = 50;

/// Team management operations for the Forgejo API
///
/// Implementations must be safe to share between concurrent reconciliations;
/// none of the methods retries on failure.
#[async_trait]
pub trait TeamApi: Send + Sync {
    // ========================================================================
    // Read Operations
    // ========================================================================

    /// Get an organization by name.
    ///
    /// Returns `ApiError::NotFound` when the organization does not exist.
    async fn get_org(&self, org: &str) -> ApiResult<Organization>;

    /// List one page of an organization's teams (pages start at 1).
    async fn list_teams(&self, org: &str, page: usize, limit: usize) -> ApiResult<Vec<Team>>;

    /// Find a team by name inside an organization.
    ///
    /// Team names are unique per organization ignoring ASCII case, so the
    /// match is case-insensitive. Walks pages until a match or an empty page;
    /// servers may cap the page size below the requested limit, so a short
    /// page is not taken as the last one.
    async fn find_team_by_name(&self, org: &str, name: &str) -> ApiResult<Option<Team>> {
        let mut page = 1;
        loop {
            let teams = self.list_teams(org, page, TEAM_PAGE_SIZE).await?;
            if teams.is_empty() {
                return Ok(None);
            }
            if let Some(team) = teams.into_iter().find(|t| t.name.eq_ignore_ascii_case(name)) {
                return Ok(Some(team));
            }
            page += 1;
        }
    }

    /// Get a team by id.
    async fn get_team(&self, id: TeamId) -> ApiResult<Team>;

    // ========================================================================
    // Write Operations
    // ========================================================================

    /// Create a new team in the organization.
    async fn create_team(&self, org: &str, request: CreateTeamRequest) -> ApiResult<Team>;

    /// Replace the mutable attributes of an existing team.
    async fn update_team(&self, id: TeamId, request: UpdateTeamRequest) -> ApiResult<Team>;

    /// Delete a team.
    ///
    /// Returns `ApiError::NotFound` if the team is already gone; callers
    /// decide whether that is an error.
    async fn delete_team(&self, id: TeamId) -> ApiResult<()>;
}
