//! Organization models

use serde::{Deserialize, Serialize};

/// Organization resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Organization ID
    pub id: i64,

    /// Organization name
    #[serde(default)]
    pub name: String,

    /// Legacy alias for `name`, still sent by older Forgejo releases
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,

    /// Display name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub full_name: String,
}

impl Organization {
    /// The organization's login name, whichever field carries it.
    pub fn login(&self) -> &str {
        if self.name.is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}
