//! Plan and apply display models

use serde::Serialize;
use tabled::Tabled;

use super::common::or_dash;
use crate::orchestrator::{AppliedChange, PlannedChange};

/// One planned change for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PlanDisplay {
    #[tabled(rename = "ADDRESS")]
    pub address: String,

    #[tabled(rename = "ACTION")]
    pub action: String,

    /// `organization/name` of the desired team, or of the prior one for deletions
    #[tabled(rename = "TEAM")]
    pub team: String,

    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "CHANGES")]
    pub changes: String,
}

impl From<&PlannedChange> for PlanDisplay {
    fn from(change: &PlannedChange) -> Self {
        let team = match (&change.desired, &change.prior) {
            (Some(spec), _) => format!("{}/{}", spec.organization, spec.name),
            (None, Some(prior)) => format!("{}/{}", prior.organization, prior.name),
            (None, None) => "-".to_string(),
        };

        Self {
            address: change.address.clone(),
            action: change.action.to_string(),
            team,
            id: or_dash(change.prior.as_ref().map(|p| p.id.to_string())),
            changes: change
                .changed
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// One applied change for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AppliedDisplay {
    #[tabled(rename = "ADDRESS")]
    pub address: String,

    #[tabled(rename = "ACTION")]
    pub action: String,

    #[tabled(rename = "ID")]
    pub id: String,
}

impl From<&AppliedChange> for AppliedDisplay {
    fn from(change: &AppliedChange) -> Self {
        Self {
            address: change.address.clone(),
            action: change.action.to_string(),
            id: or_dash(change.record.as_ref().map(|r| r.id.to_string())),
        }
    }
}
