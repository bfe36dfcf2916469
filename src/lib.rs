//! forgeteam - declarative team management for Forgejo
//!
//! The reconciliation core lives in [`team`]; [`orchestrator`] drives it
//! across a whole [`declaration`] and records results in the [`state`] store.

pub mod cli;
pub mod client;
pub mod config;
pub mod declaration;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod output;
pub mod state;
pub mod team;

pub use error::{Error, Result};
