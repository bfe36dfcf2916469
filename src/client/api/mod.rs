//! API trait definitions
//!
//! The Forgejo surface the reconciler needs is small enough for a single
//! [`TeamApi`] trait: organization lookup plus team CRUD.

mod team;

pub use team::{TEAM_PAGE_SIZE, TeamApi};
