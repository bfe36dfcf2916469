//! Desired team state and the builder that validates it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record::TeamRecord;
use super::units::UnitSet;
use crate::error::TeamError;

/// Team permission level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    None,
    Read,
    Write,
    Admin,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::None,
        Permission::Read,
        Permission::Write,
        Permission::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::None => "none",
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::Admin => "admin",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = TeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| {
                TeamError::Validation(format!(
                    "invalid permission '{}' (expected none, read, write or admin)",
                    s
                ))
            })
    }
}

/// Raw, partially specified team attributes as written in a declaration.
///
/// Every field is optional here; [`TeamSpec::build`] applies the defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TeamAttributes {
    pub name: Option<String>,
    pub organization: Option<String>,
    pub permission: Option<String>,
    pub units: Option<Vec<String>>,
    pub can_create_org_repo: Option<bool>,
    pub description: Option<String>,
    pub includes_all_repositories: Option<bool>,
    pub import_if_exists: Option<bool>,
}

impl TeamAttributes {
    /// Attributes with only the required keys set.
    pub fn new(name: &str, organization: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            organization: Some(organization.to_string()),
            ..Self::default()
        }
    }

    pub fn permission(mut self, permission: &str) -> Self {
        self.permission = Some(permission.to_string());
        self
    }

    pub fn units(mut self, units: &[&str]) -> Self {
        self.units = Some(units.iter().map(|u| u.to_string()).collect());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn can_create_org_repo(mut self, value: bool) -> Self {
        self.can_create_org_repo = Some(value);
        self
    }

    pub fn includes_all_repositories(mut self, value: bool) -> Self {
        self.includes_all_repositories = Some(value);
        self
    }

    pub fn import_if_exists(mut self, value: bool) -> Self {
        self.import_if_exists = Some(value);
        self
    }

    /// Validate and default into a [`TeamSpec`].
    pub fn build(self) -> Result<TeamSpec, TeamError> {
        TeamSpec::build(self)
    }
}

/// Which optional attributes a declaration set explicitly.
///
/// Unset attributes take their defaults on create and keep the existing
/// team's values on update or adoption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Declared {
    pub permission: bool,
    pub units: bool,
    pub can_create_org_repo: bool,
    pub description: bool,
    pub includes_all_repositories: bool,
}

impl Declared {
    pub const ALL: Declared = Declared {
        permission: true,
        units: true,
        can_create_org_repo: true,
        description: true,
        includes_all_repositories: true,
    };

    fn from_attributes(attrs: &TeamAttributes) -> Self {
        Self {
            permission: attrs.permission.is_some(),
            units: attrs.units.is_some(),
            can_create_org_repo: attrs.can_create_org_repo.is_some(),
            description: attrs.description.is_some(),
            includes_all_repositories: attrs.includes_all_repositories.is_some(),
        }
    }
}

/// Validated desired state of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSpec {
    pub name: String,
    pub organization: String,
    pub permission: Permission,
    pub units: UnitSet,
    pub can_create_org_repo: bool,
    pub description: String,
    pub includes_all_repositories: bool,
    /// Input-only: adopt an existing team with the same name instead of failing.
    #[serde(skip)]
    pub import_if_exists: bool,
    #[serde(skip)]
    pub declared: Declared,
}

impl TeamSpec {
    pub const DEFAULT_PERMISSION: Permission = Permission::None;
    pub const DEFAULT_CAN_CREATE_ORG_REPO: bool = false;
    pub const DEFAULT_DESCRIPTION: &'static str = "";
    pub const DEFAULT_INCLUDES_ALL_REPOSITORIES: bool = false;
    pub const DEFAULT_IMPORT_IF_EXISTS: bool = false;

    /// Validate raw attributes and fill in every default.
    ///
    /// Fails with [`TeamError::Validation`] on an empty name or organization,
    /// an unknown permission, an empty `units` list, or an unknown unit.
    pub fn build(attrs: TeamAttributes) -> Result<Self, TeamError> {
        let declared = Declared::from_attributes(&attrs);
        let name = required("name", attrs.name)?;
        let organization = required("organization", attrs.organization)?;

        let permission = match attrs.permission {
            Some(p) => p.parse()?,
            None => Self::DEFAULT_PERMISSION,
        };

        let units = match attrs.units {
            Some(tokens) if tokens.is_empty() => {
                return Err(TeamError::Validation(
                    "units must contain at least one unit when set".to_string(),
                ));
            }
            Some(tokens) => UnitSet::parse(tokens)?,
            None => UnitSet::default(),
        };

        Ok(Self {
            name,
            organization,
            permission,
            units,
            can_create_org_repo: attrs
                .can_create_org_repo
                .unwrap_or(Self::DEFAULT_CAN_CREATE_ORG_REPO),
            description: attrs
                .description
                .unwrap_or_else(|| Self::DEFAULT_DESCRIPTION.to_string()),
            includes_all_repositories: attrs
                .includes_all_repositories
                .unwrap_or(Self::DEFAULT_INCLUDES_ALL_REPOSITORIES),
            import_if_exists: attrs
                .import_if_exists
                .unwrap_or(Self::DEFAULT_IMPORT_IF_EXISTS),
            declared,
        })
    }

    /// This spec with every undeclared attribute taken from `record`.
    pub fn merged_onto(&self, record: &TeamRecord) -> TeamSpec {
        let d = self.declared;
        TeamSpec {
            name: self.name.clone(),
            organization: self.organization.clone(),
            permission: if d.permission {
                self.permission
            } else {
                record.permission
            },
            units: if d.units {
                self.units.clone()
            } else {
                record.units.clone()
            },
            can_create_org_repo: if d.can_create_org_repo {
                self.can_create_org_repo
            } else {
                record.can_create_org_repo
            },
            description: if d.description {
                self.description.clone()
            } else {
                record.description.clone()
            },
            includes_all_repositories: if d.includes_all_repositories {
                self.includes_all_repositories
            } else {
                record.includes_all_repositories
            },
            import_if_exists: self.import_if_exists,
            declared: Declared::ALL,
        }
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, TeamError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(TeamError::Validation(format!("{} must not be empty", field))),
    }
}
