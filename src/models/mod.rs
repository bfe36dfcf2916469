//! Display models for CLI output

pub mod display;

pub use display::{AppliedDisplay, PlanDisplay, StateDisplay, TeamDisplay};
