//! plan, apply and destroy commands

use std::path::Path;

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::declaration::Declaration;
use crate::error::{Error, Result};
use crate::models::{AppliedDisplay, PlanDisplay};
use crate::orchestrator::{ApplyReport, DEFAULT_PARALLELISM, ExecutionPlan};
use crate::output::{self, pretty};

/// Run the plan command
pub async fn plan(file: &Path, opts: &GlobalOptions) -> Result<()> {
    let specs = Declaration::load(file)?.specs()?;

    let ctx = CommandContext::new(opts)?;
    let store = ctx.store()?;
    let orchestrator = ctx.orchestrator(DEFAULT_PARALLELISM)?;

    let plan = orchestrator.plan(&store, specs).await?;
    print_plan(&plan, ctx.format)
}

/// Run the apply command
pub async fn apply(file: &Path, yes: bool, parallelism: usize, opts: &GlobalOptions) -> Result<()> {
    let specs = Declaration::load(file)?.specs()?;

    let ctx = CommandContext::new(opts)?;
    let store = ctx.store()?;
    let orchestrator = ctx.orchestrator(parallelism)?;

    let plan = orchestrator.plan(&store, specs).await?;
    if ctx.format != OutputFormat::Json {
        print_plan(&plan, ctx.format)?;
    }
    if !plan.has_changes() {
        return Ok(());
    }

    if !yes && !confirm("Apply these changes?")? {
        println!("Cancelled.");
        return Ok(());
    }

    let report = orchestrator.apply(&store, &plan).await?;
    finish(report, ctx.format)
}

/// Run the destroy command
pub async fn destroy(target: Option<&str>, yes: bool, opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let store = ctx.store()?;
    let orchestrator = ctx.orchestrator(DEFAULT_PARALLELISM)?;

    let plan = orchestrator.plan_destroy(&store, target).await?;
    if plan.changes.is_empty() {
        println!("Nothing to destroy.");
        return Ok(());
    }
    if ctx.format != OutputFormat::Json {
        print_plan(&plan, ctx.format)?;
    }

    if !yes && !confirm("Destroy these teams?")? {
        println!("Cancelled.");
        return Ok(());
    }

    let report = orchestrator.apply(&store, &plan).await?;
    finish(report, ctx.format)
}

fn print_plan(plan: &ExecutionPlan, format: OutputFormat) -> Result<()> {
    let rows: Vec<PlanDisplay> = plan.changes.iter().map(PlanDisplay::from).collect();
    output::print(&rows, format, pretty::plan)
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

fn finish(report: ApplyReport, format: OutputFormat) -> Result<()> {
    let rows: Vec<AppliedDisplay> = report.applied.iter().map(AppliedDisplay::from).collect();
    output::print(&rows, format, pretty::applied)?;

    if report.is_success() {
        return Ok(());
    }

    for (address, err) in &report.failures {
        let hint = if err.is_retryable() { " (retryable)" } else { "" };
        eprintln!("{} {}: {}{}", "✗".red(), address, err, hint);
    }
    Err(Error::Other(format!(
        "{} of {} resource(s) failed",
        report.failures.len(),
        report.failures.len() + report.applied.len()
    )))
}
