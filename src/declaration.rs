//! Declaration files
//!
//! A declaration maps resource addresses to raw team attributes:
//!
//! ```yaml
//! teams:
//!   core:
//!     name: test_team
//!     organization: tftest
//!     permission: read
//!     units: [repo.code]
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result, TeamError};
use crate::team::{TeamAttributes, TeamSpec};

/// Parsed declaration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    #[serde(default)]
    pub teams: BTreeMap<String, TeamAttributes>,
}

impl Declaration {
    /// Load a declaration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Declaration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&contents)
            .map_err(|e| Error::Declaration(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    /// Validate every declared team, in address order.
    ///
    /// Errors name the offending address. Two addresses declaring the same
    /// `(organization, name)` are rejected since they would fight over one team.
    pub fn specs(&self) -> Result<Vec<(String, TeamSpec)>> {
        let mut seen: HashMap<(String, String), &str> = HashMap::new();
        let mut specs = Vec::with_capacity(self.teams.len());

        for (address, attrs) in &self.teams {
            if address.trim().is_empty() {
                return Err(Error::Declaration(
                    "resource addresses must not be empty".to_string(),
                ));
            }

            let spec = attrs.clone().build().map_err(|e| match e {
                TeamError::Validation(msg) => {
                    TeamError::Validation(format!("{}: {}", address, msg))
                }
                other => other,
            })?;

            let key = (
                spec.organization.to_lowercase(),
                spec.name.to_lowercase(),
            );
            if let Some(previous) = seen.insert(key, address) {
                return Err(Error::Declaration(format!(
                    "'{}' and '{}' both declare team '{}' in '{}'",
                    previous, address, spec.name, spec.organization
                )));
            }

            specs.push((address.clone(), spec));
        }

        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Permission;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
teams:
  core:
    name: test_team
    organization: tftest
    permission: read
    units: [repo.code, repo.issues]
    can_create_org_repo: true
    description: Test team.
  readers:
    name: readers
    organization: tftest
"#;

    #[test]
    fn test_parse_and_build_specs() {
        let declaration = Declaration::from_yaml(SAMPLE).unwrap();
        let specs = declaration.specs().unwrap();

        assert_eq!(specs.len(), 2);
        let (address, core) = &specs[0];
        assert_eq!(address, "core");
        assert_eq!(core.permission, Permission::Read);
        assert_eq!(core.units.len(), 2);
        assert!(core.can_create_org_repo);

        let (_, readers) = &specs[1];
        assert_eq!(readers.permission, Permission::None);
        assert!(readers.units.is_empty());
        assert_eq!(readers.description, "");
    }

    #[test]
    fn test_unknown_attribute_rejected() {
        let yaml = "teams:\n  core:\n    name: a\n    organization: b\n    colour: red\n";
        let err = Declaration::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_validation_error_names_address() {
        let yaml = "teams:\n  core:\n    name: a\n    organization: b\n    units: [repo.bogus]\n";
        let err = Declaration::from_yaml(yaml).unwrap().specs().unwrap_err();
        match err {
            Error::Team(TeamError::Validation(msg)) => {
                assert!(msg.starts_with("core: "));
                assert!(msg.contains("repo.bogus"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_team_key_rejected() {
        let yaml = r#"
teams:
  one:
    name: Test_Team
    organization: tftest
  two:
    name: test_team
    organization: TFTEST
"#;
        let err = Declaration::from_yaml(yaml).unwrap().specs().unwrap_err();
        assert!(matches!(err, Error::Declaration(ref m) if m.contains("'one' and 'two'")));
    }

    #[test]
    fn test_empty_declaration() {
        let declaration = Declaration::from_yaml("teams: {}\n").unwrap();
        assert!(declaration.specs().unwrap().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let declaration = Declaration::load(file.path()).unwrap();
        assert_eq!(declaration.teams.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Declaration::load(Path::new("/nonexistent/teams.yaml")).unwrap_err();
        assert!(matches!(err, Error::Declaration(_)));
    }
}
