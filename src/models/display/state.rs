//! State entry display model

use serde::Serialize;
use tabled::Tabled;

use super::common::format_as_iso_datetime;
use crate::state::StateEntry;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct StateDisplay {
    #[tabled(rename = "ADDRESS")]
    pub address: String,

    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "TEAM")]
    pub team: String,

    #[tabled(rename = "PERMISSION")]
    pub permission: String,

    #[tabled(rename = "UPDATED")]
    pub updated_at: String,
}

impl From<&StateEntry> for StateDisplay {
    fn from(entry: &StateEntry) -> Self {
        Self {
            address: entry.address.clone(),
            id: entry.record.id.to_string(),
            team: format!("{}/{}", entry.record.organization, entry.record.name),
            permission: entry.record.permission.to_string(),
            updated_at: format_as_iso_datetime(&entry.updated_at),
        }
    }
}
