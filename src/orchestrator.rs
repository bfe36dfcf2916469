//! Plan and apply a whole declaration against the state store.
//!
//! Each resource is reconciled independently; a failure on one address does
//! not stop the others. State writes happen on the calling task as each
//! resource finishes.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde::Serialize;

use crate::client::TeamApi;
use crate::error::{Result, StateError, TeamError};
use crate::state::StateStore;
use crate::team::{Field, Plan, Reconciler, TeamRecord, TeamSpec};

/// Default number of resources applied concurrently
pub const DEFAULT_PARALLELISM: usize = 4;

/// Action planned for one address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Create,
    Update,
    Replace,
    Delete,
    NoOp,
}

impl ChangeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeAction::Create => "create",
            ChangeAction::Update => "update",
            ChangeAction::Replace => "replace",
            ChangeAction::Delete => "delete",
            ChangeAction::NoOp => "no-op",
        }
    }
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedChange {
    pub address: String,
    pub action: ChangeAction,
    /// Refreshed committed state, if the team still exists.
    pub prior: Option<TeamRecord>,
    /// Desired state; absent for deletions.
    pub desired: Option<TeamSpec>,
    pub changed: Vec<Field>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionPlan {
    pub changes: Vec<PlannedChange>,
}

impl ExecutionPlan {
    pub fn has_changes(&self) -> bool {
        self.changes.iter().any(|c| c.action != ChangeAction::NoOp)
    }

    pub fn count(&self, action: ChangeAction) -> usize {
        self.changes.iter().filter(|c| c.action == action).count()
    }
}

/// Result of applying one address
#[derive(Debug, Clone, Serialize)]
pub struct AppliedChange {
    pub address: String,
    pub action: ChangeAction,
    /// Committed record; absent after a deletion.
    pub record: Option<TeamRecord>,
}

#[derive(Debug, Default)]
pub struct ApplyReport {
    pub applied: Vec<AppliedChange>,
    pub failures: Vec<(String, TeamError)>,
}

impl ApplyReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Orchestrator<C: TeamApi + ?Sized> {
    reconciler: Reconciler<C>,
    parallelism: usize,
}

impl<C: TeamApi + ?Sized> Orchestrator<C> {
    pub fn new(reconciler: Reconciler<C>) -> Self {
        Self {
            reconciler,
            parallelism: DEFAULT_PARALLELISM,
        }
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    pub fn reconciler(&self) -> &Reconciler<C> {
        &self.reconciler
    }

    /// Refresh committed state and plan every declared team.
    ///
    /// Addresses in state but no longer declared are planned for deletion.
    pub async fn plan(
        &self,
        store: &StateStore,
        specs: Vec<(String, TeamSpec)>,
    ) -> Result<ExecutionPlan> {
        let declared: HashSet<String> = specs.iter().map(|(a, _)| a.clone()).collect();
        let mut changes = Vec::with_capacity(specs.len());

        for (address, spec) in specs {
            let prior = self.refresh(store, &address).await?;
            let planned = self.reconciler.plan(prior.as_ref(), &spec);
            let changed = planned.changed().to_vec();
            let action = match planned {
                Plan::Create => ChangeAction::Create,
                Plan::NoOp => ChangeAction::NoOp,
                Plan::InPlaceUpdate { .. } => ChangeAction::Update,
                Plan::Replace { .. } => ChangeAction::Replace,
            };
            debug!("Planned {} for '{}'", action, address);

            changes.push(PlannedChange {
                address,
                action,
                prior,
                desired: Some(spec),
                changed,
            });
        }

        for entry in store.list()? {
            if declared.contains(&entry.address) {
                continue;
            }
            let prior = self.refresh(store, &entry.address).await?;
            changes.push(PlannedChange {
                address: entry.address,
                action: ChangeAction::Delete,
                prior,
                desired: None,
                changed: Vec::new(),
            });
        }

        Ok(ExecutionPlan { changes })
    }

    /// Plan deletion of everything in state, or only `target`.
    pub async fn plan_destroy(
        &self,
        store: &StateStore,
        target: Option<&str>,
    ) -> Result<ExecutionPlan> {
        let addresses: Vec<String> = match target {
            Some(address) => {
                if store.get(address)?.is_none() {
                    return Err(StateError::UnknownAddress(address.to_string()).into());
                }
                vec![address.to_string()]
            }
            None => store.list()?.into_iter().map(|e| e.address).collect(),
        };

        let mut changes = Vec::with_capacity(addresses.len());
        for address in addresses {
            let prior = self.refresh(store, &address).await?;
            changes.push(PlannedChange {
                address,
                action: ChangeAction::Delete,
                prior,
                desired: None,
                changed: Vec::new(),
            });
        }
        Ok(ExecutionPlan { changes })
    }

    /// Execute `plan`, committing each finished resource to `store`.
    ///
    /// Deletions all finish before any create, update or replace starts, so a
    /// team moved to a new address is gone before it is created again.
    pub async fn apply(&self, store: &StateStore, plan: &ExecutionPlan) -> Result<ApplyReport> {
        let mut report = ApplyReport::default();

        let (deletes, others): (Vec<&PlannedChange>, Vec<&PlannedChange>) = plan
            .changes
            .iter()
            .partition(|c| c.action == ChangeAction::Delete);

        self.run_phase(store, deletes, &mut report).await?;
        self.run_phase(store, others, &mut report).await?;

        report.applied.sort_by(|a, b| a.address.cmp(&b.address));
        info!(
            "Applied {} change(s), {} failure(s)",
            report.applied.len(),
            report.failures.len()
        );
        Ok(report)
    }

    async fn run_phase(
        &self,
        store: &StateStore,
        changes: Vec<&PlannedChange>,
        report: &mut ApplyReport,
    ) -> Result<()> {
        let mut results = stream::iter(changes)
            .map(|change| async move { (change, self.execute(change).await) })
            .buffer_unordered(self.parallelism);

        while let Some((change, result)) = results.next().await {
            match result {
                Ok(Some(record)) => {
                    store.put(&change.address, &record)?;
                    report.applied.push(AppliedChange {
                        address: change.address.clone(),
                        action: change.action,
                        record: Some(record),
                    });
                }
                Ok(None) => {
                    store.remove(&change.address)?;
                    report.applied.push(AppliedChange {
                        address: change.address.clone(),
                        action: change.action,
                        record: None,
                    });
                }
                Err(e) => {
                    warn!("Failed to {} '{}': {}", change.action, change.address, e);
                    report.failures.push((change.address.clone(), e));
                }
            }
        }
        Ok(())
    }

    /// Run one change. `Ok(None)` means the address should leave state.
    async fn execute(
        &self,
        change: &PlannedChange,
    ) -> std::result::Result<Option<TeamRecord>, TeamError> {
        match (&change.action, &change.desired) {
            (ChangeAction::Delete, _) | (_, None) => {
                if let Some(prior) = &change.prior {
                    self.reconciler.delete(prior.id).await?;
                }
                Ok(None)
            }
            (_, Some(spec)) => {
                let applied = self.reconciler.apply(change.prior.as_ref(), spec).await?;
                debug!("'{}': {:?}", change.address, applied.action);
                Ok(Some(applied.record))
            }
        }
    }

    /// Re-read the committed record for `address` from the platform.
    async fn refresh(&self, store: &StateStore, address: &str) -> Result<Option<TeamRecord>> {
        let Some(entry) = store.get(address)? else {
            return Ok(None);
        };

        match self.reconciler.read(entry.record.id).await {
            Ok(record) => Ok(Some(record)),
            Err(TeamError::NotFound(id)) => {
                warn!(
                    "Team {} for '{}' no longer exists remotely, dropping it from the plan",
                    id, address
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
