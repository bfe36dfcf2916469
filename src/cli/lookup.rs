//! lookup command

use crate::cli::{CommandContext, GlobalOptions};
use crate::error::{Error, Result};
use crate::models::TeamDisplay;
use crate::output::{self, pretty};
use crate::team::LookupOutcome;

/// Look up a team by organization and name
pub async fn run(org: &str, name: &str, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let reconciler = ctx.reconciler()?;

    match reconciler.lookup(org, name).await? {
        LookupOutcome::Found(record) => {
            output::print(&[TeamDisplay::from(&record)], ctx.format, pretty::teams)
        }
        LookupOutcome::NotFound => Err(Error::Other(format!(
            "Team '{}' not found in organization '{}'",
            name, org
        ))),
    }
}
