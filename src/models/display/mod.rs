//! Display model implementations for table and JSON output
//!
//! Display models transform team records, plans and state entries into
//! CLI-friendly formats with appropriate column names and serialization.

mod common;
mod plan;
mod state;
mod team;

pub use plan::{AppliedDisplay, PlanDisplay};
pub use state::StateDisplay;
pub use team::TeamDisplay;
