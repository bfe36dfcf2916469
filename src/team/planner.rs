//! Replacement planning
//!
//! Compares committed state with the desired spec. Which fields can change
//! in place and which force a new team is fixed by [`FIELD_CLASSIFICATION`].

use std::fmt;

use serde::Serialize;

use super::record::TeamRecord;
use super::spec::TeamSpec;

/// A team attribute the planner compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Organization,
    Permission,
    Units,
    CanCreateOrgRepo,
    Description,
    IncludesAllRepositories,
}

/// How a change to a field is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// Updated on the existing team; the id is kept.
    InPlace,
    /// The team must be destroyed and created again under a new id.
    ForcesReplacement,
}

/// Every compared field and how changing it is applied.
pub const FIELD_CLASSIFICATION: [(Field, Mutability); 7] = [
    (Field::Organization, Mutability::ForcesReplacement),
    (Field::Name, Mutability::InPlace),
    (Field::Permission, Mutability::InPlace),
    (Field::Units, Mutability::InPlace),
    (Field::CanCreateOrgRepo, Mutability::InPlace),
    (Field::Description, Mutability::InPlace),
    (Field::IncludesAllRepositories, Mutability::InPlace),
];

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Organization => "organization",
            Field::Permission => "permission",
            Field::Units => "units",
            Field::CanCreateOrgRepo => "can_create_org_repo",
            Field::Description => "description",
            Field::IncludesAllRepositories => "includes_all_repositories",
        }
    }

    pub fn mutability(self) -> Mutability {
        FIELD_CLASSIFICATION
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, mutability)| *mutability)
            .unwrap_or(Mutability::InPlace)
    }

    /// Whether `record` and `spec` disagree on this field.
    fn differs(self, record: &TeamRecord, spec: &TeamSpec) -> bool {
        match self {
            Field::Name => record.name != spec.name,
            Field::Organization => !record.organization.eq_ignore_ascii_case(&spec.organization),
            Field::Permission => record.permission != spec.permission,
            Field::Units => record.units != spec.units,
            Field::CanCreateOrgRepo => record.can_create_org_repo != spec.can_create_org_repo,
            Field::Description => record.description != spec.description,
            Field::IncludesAllRepositories => {
                record.includes_all_repositories != spec.includes_all_repositories
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Planned action for one team
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Nothing committed yet.
    Create,
    /// Committed state already matches.
    NoOp,
    /// Only in-place fields changed.
    InPlaceUpdate { changed: Vec<Field> },
    /// An immutable field changed: delete the old team, then create.
    Replace { changed: Vec<Field> },
}

impl Plan {
    pub fn changed(&self) -> &[Field] {
        match self {
            Plan::InPlaceUpdate { changed } | Plan::Replace { changed } => changed,
            Plan::Create | Plan::NoOp => &[],
        }
    }
}

/// Fields on which `record` differs from `spec`, in classification order.
///
/// Attributes `spec` leaves undeclared never differ. Organizations compare
/// ignoring ASCII case, as the platform does.
pub fn changed_fields(record: &TeamRecord, spec: &TeamSpec) -> Vec<Field> {
    let desired = spec.merged_onto(record);
    FIELD_CLASSIFICATION
        .iter()
        .map(|(field, _)| *field)
        .filter(|field| field.differs(record, &desired))
        .collect()
}

/// Decide how to move from `prior` committed state to `spec`.
pub fn plan(prior: Option<&TeamRecord>, spec: &TeamSpec) -> Plan {
    let Some(record) = prior else {
        return Plan::Create;
    };

    let changed = changed_fields(record, spec);
    if changed.is_empty() {
        Plan::NoOp
    } else if changed
        .iter()
        .any(|f| f.mutability() == Mutability::ForcesReplacement)
    {
        Plan::Replace { changed }
    } else {
        Plan::InPlaceUpdate { changed }
    }
}
