//! Team display model

use serde::Serialize;
use tabled::Tabled;

use super::common::truncate_string;
use crate::team::TeamRecord;

/// Team display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TeamDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "ORGANIZATION")]
    pub organization: String,

    #[tabled(rename = "PERMISSION")]
    pub permission: String,

    #[tabled(rename = "UNITS")]
    pub units: String,

    /// Members may create repositories in the organization
    #[tabled(rename = "CREATE REPOS")]
    pub can_create_org_repo: bool,

    #[tabled(rename = "ALL REPOS")]
    pub includes_all_repositories: bool,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<&TeamRecord> for TeamDisplay {
    fn from(record: &TeamRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            organization: record.organization.clone(),
            permission: record.permission.to_string(),
            units: record.units.to_wire().join(", "),
            can_create_org_repo: record.can_create_org_repo,
            includes_all_repositories: record.includes_all_repositories,
            description: truncate_string(&record.description, 40),
        }
    }
}
