//! Create, read, update and delete calls normalized into [`TeamRecord`]s

use std::time::Duration;

use log::{debug, info};

use super::record::TeamRecord;
use super::spec::TeamSpec;
use super::with_deadline;
use crate::client::TeamApi;
use crate::client::models::{CreateTeamRequest, TeamId, UpdateTeamRequest};
use crate::error::{ApiError, TeamError};

impl From<&TeamSpec> for CreateTeamRequest {
    fn from(spec: &TeamSpec) -> Self {
        Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            includes_all_repositories: spec.includes_all_repositories,
            permission: spec.permission.to_string(),
            units: spec.units.to_wire(),
            can_create_org_repo: spec.can_create_org_repo,
        }
    }
}

impl From<&TeamSpec> for UpdateTeamRequest {
    fn from(spec: &TeamSpec) -> Self {
        Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            includes_all_repositories: spec.includes_all_repositories,
            permission: spec.permission.to_string(),
            units: spec.units.to_wire(),
            can_create_org_repo: spec.can_create_org_repo,
        }
    }
}

/// Issues single API calls for one team. Never retries.
pub struct TeamExecutor<'a, C: TeamApi + ?Sized> {
    client: &'a C,
    timeout: Option<Duration>,
}

impl<'a, C: TeamApi + ?Sized> TeamExecutor<'a, C> {
    pub fn new(client: &'a C, timeout: Option<Duration>) -> Self {
        Self { client, timeout }
    }

    /// Create the team described by `spec`.
    ///
    /// A duplicate rejected by the platform (a concurrent create won the race)
    /// surfaces as [`TeamError::AlreadyExists`].
    pub async fn create(&self, spec: &TeamSpec) -> Result<TeamRecord, TeamError> {
        let request = CreateTeamRequest::from(spec);
        let team = with_deadline(
            self.timeout,
            self.client.create_team(&spec.organization, request),
        )
        .await
        .map_err(|e| match e {
            ApiError::Conflict(_) => TeamError::AlreadyExists {
                name: spec.name.clone(),
                organization: spec.organization.clone(),
            },
            ApiError::NotFound(_) => TeamError::OrganizationNotFound(spec.organization.clone()),
            other => other.into(),
        })?;

        let record = TeamRecord::from_remote(team, Some(&spec.organization))?;
        info!(
            "Created team '{}' in '{}' (id {})",
            record.name, record.organization, record.id
        );
        Ok(record)
    }

    /// Fetch the team with `id`.
    pub async fn read(&self, id: TeamId) -> Result<TeamRecord, TeamError> {
        let team = with_deadline(self.timeout, self.client.get_team(id))
            .await
            .map_err(|e| not_found_as(e, id))?;
        TeamRecord::from_remote(team, None)
    }

    /// Apply the mutable attributes of `spec` to the team with `id`.
    ///
    /// The request always carries every mutable field, so applying the same
    /// spec twice leaves the remote team unchanged.
    pub async fn update(&self, id: TeamId, spec: &TeamSpec) -> Result<TeamRecord, TeamError> {
        let request = UpdateTeamRequest::from(spec);
        let team = with_deadline(self.timeout, self.client.update_team(id, request))
            .await
            .map_err(|e| match e {
                ApiError::Conflict(_) => TeamError::AlreadyExists {
                    name: spec.name.clone(),
                    organization: spec.organization.clone(),
                },
                other => not_found_as(other, id),
            })?;

        let record = TeamRecord::from_remote(team, Some(&spec.organization))?;
        info!("Updated team '{}' (id {})", record.name, record.id);
        Ok(record)
    }

    /// Delete the team with `id`. An already-absent team counts as deleted.
    pub async fn delete(&self, id: TeamId) -> Result<(), TeamError> {
        match with_deadline(self.timeout, self.client.delete_team(id)).await {
            Ok(()) => {
                info!("Deleted team {}", id);
                Ok(())
            }
            Err(ApiError::NotFound(_)) => {
                debug!("Team {} already absent, nothing to delete", id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn not_found_as(err: ApiError, id: TeamId) -> TeamError {
    match err {
        ApiError::NotFound(_) => TeamError::NotFound(id),
        other => other.into(),
    }
}
