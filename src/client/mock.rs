//! Mock Forgejo API client for testing
//!
//! Provides an in-memory implementation of [`TeamApi`] that behaves like a
//! small Forgejo instance: organizations must exist, team names are unique per
//! organization, and ids are assigned by the "server".

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::TeamApi;
use super::models::{CreateTeamRequest, Organization, Team, TeamId, UpdateTeamRequest};
use super::ApiResult;
use crate::error::ApiError;

/// Mock API client for testing.
///
/// Configure the remote state via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockForgejoClient::new().with_org("tftest").await;
/// let org = mock.get_org("tftest").await?;
/// assert_eq!(org.login(), "tftest");
/// ```
pub struct MockForgejoClient {
    /// Organizations known to the server
    orgs: Arc<Mutex<Vec<Organization>>>,
    /// Teams stored on the server
    teams: Arc<Mutex<Vec<Team>>>,
    /// Next id handed out by create_team
    next_id: Arc<Mutex<i64>>,
    /// Error to return on the next call of any method - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Errors to return on the next call of a specific method
    method_errors: Arc<Mutex<HashMap<String, ApiError>>>,
    /// Artificial latency applied to every call
    delay: Arc<Mutex<Option<Duration>>>,
    /// Server-side cap on items per page (Forgejo's `MAX_RESPONSE_ITEMS`)
    max_page_size: Arc<Mutex<Option<usize>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests in call order
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Default for MockForgejoClient {
    fn default() -> Self {
        Self {
            orgs: Arc::new(Mutex::new(Vec::new())),
            teams: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1)),
            error: Arc::new(Mutex::new(None)),
            method_errors: Arc::new(Mutex::new(HashMap::new())),
            delay: Arc::new(Mutex::new(None)),
            max_page_size: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get_org: usize,
    pub list_teams: usize,
    pub get_team: usize,
    pub create_team: usize,
    pub update_team: usize,
    pub delete_team: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.get_org
            + self.list_teams
            + self.get_team
            + self.create_team
            + self.update_team
            + self.delete_team
    }

    /// Number of mutating calls made.
    pub fn writes(&self) -> usize {
        self.create_team + self.update_team + self.delete_team
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    /// The API method called (e.g., "create_team", "delete_team")
    pub method: String,
    /// Organization name or team id the call targeted
    pub target: String,
}

impl MockForgejoClient {
    /// Create a new mock client with no organizations and no teams.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an organization.
    pub async fn with_org(self, name: &str) -> Self {
        {
            let mut orgs = self.orgs.lock().await;
            let id = orgs.len() as i64 + 1;
            orgs.push(Organization {
                id,
                name: name.to_string(),
                username: String::new(),
                full_name: String::new(),
            });
        }
        self
    }

    /// Seed a team that already exists on the server.
    pub async fn with_team(self, org: &str, name: &str, permission: &str, units: &[&str]) -> Self {
        {
            let org = self.find_org(org).await;
            let mut next_id = self.next_id.lock().await;
            let team = Team {
                id: TeamId::new(*next_id),
                name: name.to_string(),
                description: String::new(),
                organization: org,
                includes_all_repositories: false,
                permission: permission.to_string(),
                units: units.iter().map(|u| u.to_string()).collect(),
                can_create_org_repo: false,
            };
            *next_id += 1;
            self.teams.lock().await.push(team);
        }
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Configure an error for the next call of one method (e.g. "create_team").
    pub async fn with_error_for(self, method: &str, error: ApiError) -> Self {
        self.method_errors
            .lock()
            .await
            .insert(method.to_string(), error);
        self
    }

    /// Delay every call by `delay`.
    pub async fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().await = Some(delay);
        self
    }

    /// Cap every listing page at `max` items, whatever limit is requested.
    pub async fn with_max_page_size(self, max: usize) -> Self {
        *self.max_page_size.lock().await = Some(max);
        self
    }

    /// Remove a team behind the reconciler's back.
    pub async fn remove_team(&self, id: TeamId) {
        self.teams.lock().await.retain(|t| t.id != id);
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Names of the mutating calls made, in order.
    pub async fn write_log(&self) -> Vec<String> {
        self.captured_requests
            .lock()
            .await
            .iter()
            .filter(|r| matches!(r.method.as_str(), "create_team" | "update_team" | "delete_team"))
            .map(|r| format!("{} {}", r.method, r.target))
            .collect()
    }

    /// Current server-side teams.
    pub async fn teams(&self) -> Vec<Team> {
        self.teams.lock().await.clone()
    }

    async fn find_org(&self, name: &str) -> Option<Organization> {
        self.orgs
            .lock()
            .await
            .iter()
            .find(|o| o.login().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Record the call, apply latency, and surface any configured error.
    async fn begin(&self, method: &str, target: String) -> ApiResult<()> {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            target,
        });

        {
            let mut counts = self.call_count.lock().await;
            match method {
                "get_org" => counts.get_org += 1,
                "list_teams" => counts.list_teams += 1,
                "get_team" => counts.get_team += 1,
                "create_team" => counts.create_team += 1,
                "update_team" => counts.update_team += 1,
                "delete_team" => counts.delete_team += 1,
                _ => {}
            }
        }

        let delay = *self.delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(e) = self.error.lock().await.take() {
            return Err(e);
        }
        if let Some(e) = self.method_errors.lock().await.remove(method) {
            return Err(e);
        }
        Ok(())
    }

    fn name_taken(teams: &[Team], org: &str, name: &str, except: Option<TeamId>) -> bool {
        teams.iter().any(|t| {
            Some(t.id) != except
                && t.name.eq_ignore_ascii_case(name)
                && t
                    .organization
                    .as_ref()
                    .is_some_and(|o| o.login().eq_ignore_ascii_case(org))
        })
    }
}

#[async_trait]
impl TeamApi for MockForgejoClient {
    async fn get_org(&self, org: &str) -> ApiResult<Organization> {
        self.begin("get_org", org.to_string()).await?;

        self.find_org(org)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("Organization not found: {}", org)))
    }

    async fn list_teams(&self, org: &str, page: usize, limit: usize) -> ApiResult<Vec<Team>> {
        self.begin("list_teams", org.to_string()).await?;

        if self.find_org(org).await.is_none() {
            return Err(ApiError::NotFound(format!("Organization not found: {}", org)));
        }

        let limit = match *self.max_page_size.lock().await {
            Some(max) => limit.min(max),
            None => limit,
        };
        let teams = self.teams.lock().await;
        Ok(teams
            .iter()
            .filter(|t| {
                t.organization
                    .as_ref()
                    .is_some_and(|o| o.login().eq_ignore_ascii_case(org))
            })
            .skip(page.saturating_sub(1) * limit)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_team(&self, id: TeamId) -> ApiResult<Team> {
        self.begin("get_team", id.to_string()).await?;

        self.teams
            .lock()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Team not found: {}", id)))
    }

    async fn create_team(&self, org: &str, request: CreateTeamRequest) -> ApiResult<Team> {
        self.begin("create_team", format!("{}/{}", org, request.name))
            .await?;

        let organization = self
            .find_org(org)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("Organization not found: {}", org)))?;

        let mut teams = self.teams.lock().await;
        if Self::name_taken(&teams, org, &request.name, None) {
            return Err(ApiError::Conflict(format!(
                "team already exists [name: {}]",
                request.name
            )));
        }

        let mut next_id = self.next_id.lock().await;
        let team = Team {
            id: TeamId::new(*next_id),
            name: request.name,
            description: request.description,
            organization: Some(organization),
            includes_all_repositories: request.includes_all_repositories,
            permission: request.permission,
            units: request.units,
            can_create_org_repo: request.can_create_org_repo,
        };
        *next_id += 1;
        teams.push(team.clone());

        Ok(team)
    }

    async fn update_team(&self, id: TeamId, request: UpdateTeamRequest) -> ApiResult<Team> {
        self.begin("update_team", id.to_string()).await?;

        let mut teams = self.teams.lock().await;
        let org = teams
            .iter()
            .find(|t| t.id == id)
            .and_then(|t| t.organization.as_ref().map(|o| o.login().to_string()))
            .ok_or_else(|| ApiError::NotFound(format!("Team not found: {}", id)))?;

        if Self::name_taken(&teams, &org, &request.name, Some(id)) {
            return Err(ApiError::Conflict(format!(
                "team already exists [name: {}]",
                request.name
            )));
        }

        let team = teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Team not found: {}", id)))?;
        team.name = request.name;
        team.description = request.description;
        team.includes_all_repositories = request.includes_all_repositories;
        team.permission = request.permission;
        team.units = request.units;
        team.can_create_org_repo = request.can_create_org_repo;

        Ok(team.clone())
    }

    async fn delete_team(&self, id: TeamId) -> ApiResult<()> {
        self.begin("delete_team", id.to_string()).await?;

        let mut teams = self.teams.lock().await;
        let initial_len = teams.len();
        teams.retain(|t| t.id != id);

        if teams.len() == initial_len {
            return Err(ApiError::NotFound(format!("Team not found: {}", id)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(name: &str) -> CreateTeamRequest {
        CreateTeamRequest {
            name: name.to_string(),
            description: String::new(),
            includes_all_repositories: false,
            permission: "read".to_string(),
            units: vec!["repo.code".to_string()],
            can_create_org_repo: false,
        }
    }

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockForgejoClient::new();

        let result = mock.get_org("tftest").await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
        assert!(mock.teams().await.is_empty());
    }

    #[tokio::test]
    async fn test_mock_create_assigns_ids_and_stores() {
        let mock = MockForgejoClient::new().with_org("tftest").await;

        let first = mock.create_team("tftest", create_request("a")).await.unwrap();
        let second = mock.create_team("tftest", create_request("b")).await.unwrap();
        assert_ne!(first.id, second.id);

        let fetched = mock.get_team(first.id).await.unwrap();
        assert_eq!(fetched.name, "a");
        assert_eq!(fetched.organization.unwrap().login(), "tftest");

        let counts = mock.call_counts().await;
        assert_eq!(counts.create_team, 2);
        assert_eq!(counts.get_team, 1);
        assert_eq!(counts.total(), 3);
    }

    #[tokio::test]
    async fn test_mock_create_rejects_duplicate_name() {
        let mock = MockForgejoClient::new().with_org("tftest").await;

        mock.create_team("tftest", create_request("dup")).await.unwrap();
        let err = mock
            .create_team("tftest", create_request("DUP"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(mock.teams().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_create_in_missing_org() {
        let mock = MockForgejoClient::new();

        let err = mock
            .create_team("nope", create_request("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_mock_list_teams_paginates() {
        let mut mock = MockForgejoClient::new().with_org("tftest").await;
        for i in 0..3 {
            mock = mock
                .with_team("tftest", &format!("t{}", i), "read", &["repo.code"])
                .await;
        }

        assert_eq!(mock.list_teams("tftest", 1, 2).await.unwrap().len(), 2);
        assert_eq!(mock.list_teams("tftest", 2, 2).await.unwrap().len(), 1);
        assert!(mock.list_teams("tftest", 3, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_delete_not_found() {
        let mock = MockForgejoClient::new();

        let result = mock.delete_team(TeamId::new(404)).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_mock_error_for_method_is_consumed_once() {
        let mock = MockForgejoClient::new()
            .with_org("tftest")
            .await
            .with_error_for("create_team", ApiError::ServerError("boom".to_string()))
            .await;

        // Other methods are unaffected
        mock.get_org("tftest").await.unwrap();

        assert!(mock.create_team("tftest", create_request("x")).await.is_err());
        assert!(mock.create_team("tftest", create_request("x")).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_write_log_orders_mutations() {
        let mock = MockForgejoClient::new().with_org("tftest").await;

        let team = mock.create_team("tftest", create_request("a")).await.unwrap();
        mock.get_team(team.id).await.unwrap();
        mock.delete_team(team.id).await.unwrap();

        assert_eq!(
            mock.write_log().await,
            vec![
                "create_team tftest/a".to_string(),
                format!("delete_team {}", team.id),
            ]
        );
    }
}
