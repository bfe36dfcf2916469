//! Remote lookup of a team by organization and name

use std::time::Duration;

use log::debug;

use super::record::TeamRecord;
use super::with_deadline;
use crate::client::TeamApi;
use crate::error::{ApiError, TeamError};

/// Result of looking a team up by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(TeamRecord),
    NotFound,
}

impl LookupOutcome {
    pub fn into_record(self) -> Option<TeamRecord> {
        match self {
            LookupOutcome::Found(record) => Some(record),
            LookupOutcome::NotFound => None,
        }
    }
}

/// Find the team called `name` in `organization`.
///
/// The organization is checked first so a missing organization surfaces as
/// [`TeamError::OrganizationNotFound`] rather than an empty search result.
pub async fn lookup<C: TeamApi + ?Sized>(
    client: &C,
    organization: &str,
    name: &str,
    timeout: Option<Duration>,
) -> Result<LookupOutcome, TeamError> {
    match with_deadline(timeout, client.get_org(organization)).await {
        Ok(_) => {}
        Err(ApiError::NotFound(_)) => {
            return Err(TeamError::OrganizationNotFound(organization.to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    let found = with_deadline(timeout, client.find_team_by_name(organization, name)).await?;
    match found {
        Some(team) => {
            let record = TeamRecord::from_remote(team, Some(organization))?;
            debug!(
                "Found team '{}' in '{}' with id {}",
                record.name, organization, record.id
            );
            Ok(LookupOutcome::Found(record))
        }
        None => {
            debug!("No team '{}' in '{}'", name, organization);
            Ok(LookupOutcome::NotFound)
        }
    }
}
