//! Forgejo API client

pub mod api;
pub mod forgejo;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::{TEAM_PAGE_SIZE, TeamApi};
pub use forgejo::{Credentials, ForgejoClient};
#[cfg(test)]
pub use mock::MockForgejoClient;

use crate::error::ApiError;

/// Result type for raw API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;
