//! Capability units
//!
//! Units are compared as sets: order and duplicates in the declaration never
//! produce a diff.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TeamError;

/// Unit tokens Forgejo accepts on teams.
pub const KNOWN_UNITS: [&str; 10] = [
    "repo.code",
    "repo.issues",
    "repo.ext_issues",
    "repo.wiki",
    "repo.ext_wiki",
    "repo.pulls",
    "repo.releases",
    "repo.projects",
    "repo.packages",
    "repo.actions",
];

/// A single capability unit token, e.g. `repo.code`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unit(String);

impl Unit {
    /// Parse a declared token, rejecting anything outside [`KNOWN_UNITS`].
    pub fn parse(token: &str) -> Result<Self, TeamError> {
        let token = token.trim();
        if KNOWN_UNITS.contains(&token) {
            Ok(Self(token.to_string()))
        } else {
            Err(TeamError::Validation(format!(
                "unknown unit '{}' (expected one of: {})",
                token,
                KNOWN_UNITS.join(", ")
            )))
        }
    }

    /// Accept a token reported by the platform as-is.
    ///
    /// Newer Forgejo releases may report units this build does not know;
    /// they still have to round-trip through committed state.
    pub fn from_remote(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical, order-independent set of units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitSet(BTreeSet<Unit>);

/// Tokens added and removed between two unit sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitDiff {
    pub added: Vec<Unit>,
    pub removed: Vec<Unit>,
}

impl UnitDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl UnitSet {
    /// Parse declared tokens, deduplicating and validating each one.
    pub fn parse<I, S>(tokens: I) -> Result<Self, TeamError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|t| Unit::parse(t.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Build a set from tokens reported by the platform.
    pub fn from_remote<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tokens.into_iter().map(Unit::from_remote).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|u| u.as_str() == token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.0.iter()
    }

    /// Sorted token list for request bodies.
    pub fn to_wire(&self) -> Vec<String> {
        self.0.iter().map(|u| u.0.clone()).collect()
    }

    /// What changes going from `self` to `desired`.
    pub fn diff(&self, desired: &UnitSet) -> UnitDiff {
        UnitDiff {
            added: desired.0.difference(&self.0).cloned().collect(),
            removed: self.0.difference(&desired.0).cloned().collect(),
        }
    }
}

impl FromIterator<Unit> for UnitSet {
    fn from_iter<T: IntoIterator<Item = Unit>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for UnitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&str> = self.0.iter().map(Unit::as_str).collect();
        write!(f, "[{}]", tokens.join(", "))
    }
}
