//! Forgejo API data models
//!
//! Wire types exchanged with the Forgejo REST API. Only the fields the team
//! reconciler reads or writes are modelled; unknown fields are ignored.

mod org;
mod team;

pub use org::Organization;
pub use team::{CreateTeamRequest, Team, TeamId, UpdateTeamRequest};
