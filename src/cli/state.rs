//! state subcommands

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions};
use crate::error::{Result, StateError};
use crate::models::{StateDisplay, TeamDisplay};
use crate::output::{self, pretty};

/// List every address in state
pub fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let entries = ctx.store()?.list()?;

    let rows: Vec<StateDisplay> = entries.iter().map(StateDisplay::from).collect();
    output::print(&rows, ctx.format, pretty::state)
}

/// Show the committed record for `address`
pub fn show(address: &str, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let entry = ctx
        .store()?
        .get(address)?
        .ok_or_else(|| StateError::UnknownAddress(address.to_string()))?;

    output::print(&[TeamDisplay::from(&entry.record)], ctx.format, pretty::teams)
}

/// Forget `address`; the remote team is left alone
pub fn rm(address: &str, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    if !ctx.store()?.remove(address)? {
        return Err(StateError::UnknownAddress(address.to_string()).into());
    }

    println!("{} Removed '{}' from state", "✓".green(), address);
    Ok(())
}
