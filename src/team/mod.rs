//! Team reconciliation core
//!
//! Leaves first: [`units`] and [`spec`] build the desired state, [`lookup`]
//! and [`resolver`] decide between create, adopt and fail, [`executor`]
//! issues the CRUD calls, [`planner`] classifies changes, and
//! [`reconciler`] ties them together.

use std::future::Future;
use std::time::Duration;

pub mod executor;
pub mod lookup;
pub mod planner;
pub mod reconciler;
pub mod record;
pub mod resolver;
pub mod spec;
pub mod units;

pub use crate::client::models::TeamId;
pub use lookup::LookupOutcome;
pub use planner::{FIELD_CLASSIFICATION, Field, Mutability, Plan};
pub use reconciler::{Applied, AppliedAction, Reconciler};
pub use record::TeamRecord;
pub use resolver::Decision;
pub use spec::{Declared, Permission, TeamAttributes, TeamSpec};
pub use units::{KNOWN_UNITS, Unit, UnitDiff, UnitSet};

use crate::client::ApiResult;
use crate::error::ApiError;

/// Await `fut`, failing with a network error once `timeout` elapses.
pub(crate) async fn with_deadline<T, F>(timeout: Option<Duration>, fut: F) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
            ApiError::Network(format!("Request timed out after {:?}", limit))
        })?,
        None => fut.await,
    }
}
