//! Create-vs-adopt-vs-fail decision

use super::lookup::LookupOutcome;
use super::record::TeamRecord;
use crate::error::TeamError;

/// What to do with a desired team given the lookup result
#[derive(Debug)]
pub enum Decision {
    /// No team by that name exists: create one.
    Create,
    /// A team exists and adoption was requested: take it over.
    Adopt(TeamRecord),
    /// A team exists and adoption was not requested.
    Fail(TeamError),
}

/// Decide between create, adopt and fail.
///
/// | lookup    | import_if_exists | decision |
/// |-----------|------------------|----------|
/// | NotFound  | any              | Create   |
/// | Found     | false            | Fail     |
/// | Found     | true             | Adopt    |
pub fn resolve(outcome: LookupOutcome, import_if_exists: bool) -> Decision {
    match outcome {
        LookupOutcome::NotFound => Decision::Create,
        LookupOutcome::Found(record) if import_if_exists => Decision::Adopt(record),
        LookupOutcome::Found(record) => Decision::Fail(TeamError::AlreadyExists {
            name: record.name,
            organization: record.organization,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::TeamId;
    use crate::team::{Permission, UnitSet};

    fn existing() -> TeamRecord {
        TeamRecord {
            id: TeamId::new(3),
            name: "test_team".to_string(),
            organization: "tftest".to_string(),
            permission: Permission::Read,
            units: UnitSet::from_remote(["repo.code"]),
            can_create_org_repo: false,
            description: String::new(),
            includes_all_repositories: false,
        }
    }

    #[test]
    fn test_not_found_creates_regardless_of_flag() {
        assert!(matches!(resolve(LookupOutcome::NotFound, false), Decision::Create));
        assert!(matches!(resolve(LookupOutcome::NotFound, true), Decision::Create));
    }

    #[test]
    fn test_found_without_import_fails_naming_the_team() {
        match resolve(LookupOutcome::Found(existing()), false) {
            Decision::Fail(err) => {
                assert!(err.to_string().contains("Team 'test_team' already exists"));
            }
            other => panic!("Expected Fail, got {:?}", other),
        }
    }

    #[test]
    fn test_found_with_import_adopts_same_id() {
        match resolve(LookupOutcome::Found(existing()), true) {
            Decision::Adopt(record) => assert_eq!(record.id, TeamId::new(3)),
            other => panic!("Expected Adopt, got {:?}", other),
        }
    }
}
