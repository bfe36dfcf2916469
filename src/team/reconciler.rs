//! Team reconciliation
//!
//! [`Reconciler`] is the entry point used by the orchestrator and the CLI:
//! it plans a change against committed state and drives the lookup,
//! conflict resolution and CRUD calls needed to converge.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use serde::Serialize;

use super::executor::TeamExecutor;
use super::lookup::{LookupOutcome, lookup};
use super::planner::{self, Field, Plan};
use super::record::TeamRecord;
use super::resolver::{Decision, resolve};
use super::spec::TeamSpec;
use crate::client::TeamApi;
use crate::client::models::TeamId;
use crate::error::TeamError;

/// What an apply actually did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AppliedAction {
    Created,
    Adopted,
    Updated,
    Replaced { previous: TeamId },
    Unchanged,
}

/// Outcome of [`Reconciler::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub record: TeamRecord,
    pub action: AppliedAction,
}

/// Reconciles declared teams against the platform.
///
/// Holds no mutable state; one instance may serve concurrent reconciliations
/// of distinct `(organization, name)` keys.
pub struct Reconciler<C: TeamApi + ?Sized> {
    client: Arc<C>,
    timeout: Option<Duration>,
}

impl<C: TeamApi + ?Sized> Reconciler<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Bound every remote call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn executor(&self) -> TeamExecutor<'_, C> {
        TeamExecutor::new(self.client.as_ref(), self.timeout)
    }

    /// Read-only lookup by organization and name.
    pub async fn lookup(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<LookupOutcome, TeamError> {
        lookup(self.client.as_ref(), organization, name, self.timeout).await
    }

    /// Fetch committed state for `id`.
    pub async fn read(&self, id: TeamId) -> Result<TeamRecord, TeamError> {
        self.executor().read(id).await
    }

    /// Create path: lookup, resolve, then create or adopt.
    pub async fn create(&self, spec: &TeamSpec) -> Result<TeamRecord, TeamError> {
        self.create_or_adopt(spec).await.map(|applied| applied.record)
    }

    /// Apply `spec` to the existing team `id`.
    ///
    /// Every attribute of `spec` is sent; use [`TeamSpec::merged_onto`] first
    /// to keep the team's current values for undeclared attributes.
    pub async fn update(&self, id: TeamId, spec: &TeamSpec) -> Result<TeamRecord, TeamError> {
        self.executor().update(id, spec).await
    }

    /// Delete the team `id`; absent teams count as deleted.
    pub async fn delete(&self, id: TeamId) -> Result<(), TeamError> {
        self.executor().delete(id).await
    }

    /// Plan the move from `prior` to `spec` without touching the platform.
    pub fn plan(&self, prior: Option<&TeamRecord>, spec: &TeamSpec) -> Plan {
        planner::plan(prior, spec)
    }

    /// Converge the remote team to `spec`, starting from `prior` committed state.
    pub async fn apply(
        &self,
        prior: Option<&TeamRecord>,
        spec: &TeamSpec,
    ) -> Result<Applied, TeamError> {
        match (self.plan(prior, spec), prior) {
            (Plan::NoOp, Some(record)) => {
                debug!("Team {} already up to date", record.id);
                Ok(Applied {
                    record: record.clone(),
                    action: AppliedAction::Unchanged,
                })
            }
            (Plan::InPlaceUpdate { changed }, Some(record)) => {
                debug!("Updating team {} in place: {:?}", record.id, changed);
                let desired = spec.merged_onto(record);
                if changed.contains(&Field::Units) {
                    let diff = record.units.diff(&desired.units);
                    debug!(
                        "Units for team {}: added {:?}, removed {:?}",
                        record.id, diff.added, diff.removed
                    );
                }
                let record = self.update(record.id, &desired).await?;
                Ok(Applied {
                    record,
                    action: AppliedAction::Updated,
                })
            }
            (Plan::Replace { changed }, Some(record)) => {
                info!(
                    "Replacing team {} ('{}' -> '{}'), changed: {:?}",
                    record.id, record.organization, spec.organization, changed
                );
                // The old team must be gone before the new one is created.
                self.delete(record.id).await?;
                let created = self.create_or_adopt(spec).await?;
                Ok(Applied {
                    record: created.record,
                    action: AppliedAction::Replaced {
                        previous: record.id,
                    },
                })
            }
            _ => self.create_or_adopt(spec).await,
        }
    }

    async fn create_or_adopt(&self, spec: &TeamSpec) -> Result<Applied, TeamError> {
        let outcome = self.lookup(&spec.organization, &spec.name).await?;

        match resolve(outcome, spec.import_if_exists) {
            Decision::Create => {
                let record = self.executor().create(spec).await?;
                Ok(Applied {
                    record,
                    action: AppliedAction::Created,
                })
            }
            Decision::Adopt(existing) => {
                info!(
                    "Adopting existing team '{}' in '{}' (id {})",
                    existing.name, existing.organization, existing.id
                );
                let record = if existing.matches(spec) {
                    existing
                } else {
                    let desired = spec.merged_onto(&existing);
                    self.update(existing.id, &desired).await?
                };
                Ok(Applied {
                    record,
                    action: AppliedAction::Adopted,
                })
            }
            Decision::Fail(err) => Err(err),
        }
    }
}
