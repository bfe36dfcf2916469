//! Human-oriented colored output

use colored::Colorize;

use crate::models::{AppliedDisplay, PlanDisplay, StateDisplay, TeamDisplay};

fn action_marker(action: &str) -> String {
    match action {
        "create" => "+".green().bold().to_string(),
        "update" => "~".yellow().bold().to_string(),
        "replace" => "-/+".red().bold().to_string(),
        "delete" => "-".red().bold().to_string(),
        _ => " ".to_string(),
    }
}

/// Plan listing, one line per address plus a summary
pub fn plan(rows: &[PlanDisplay]) -> String {
    let changes: Vec<&PlanDisplay> = rows.iter().filter(|r| r.action != "no-op").collect();
    if changes.is_empty() {
        return format!("{} No changes. Teams match the declaration.", "✓".green());
    }

    let mut lines = Vec::with_capacity(changes.len() + 2);
    for row in &changes {
        let mut line = format!(
            "{} {} ({})",
            action_marker(&row.action),
            row.address.bold(),
            row.team
        );
        if row.id != "-" {
            line.push_str(&format!(" id {}", row.id));
        }
        if !row.changes.is_empty() {
            line.push_str(&format!(": {}", row.changes.dimmed()));
        }
        lines.push(line);
    }

    let count = |action: &str| rows.iter().filter(|r| r.action == action).count();
    lines.push(String::new());
    lines.push(format!(
        "Plan: {} to create, {} to update, {} to replace, {} to delete.",
        count("create"),
        count("update"),
        count("replace"),
        count("delete")
    ));
    lines.join("\n")
}

pub fn applied(rows: &[AppliedDisplay]) -> String {
    if rows.is_empty() {
        return "Nothing applied.".to_string();
    }
    rows.iter()
        .map(|r| {
            format!(
                "{} {} {} (id {})",
                "✓".green(),
                r.address.bold(),
                r.action,
                r.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn teams(rows: &[TeamDisplay]) -> String {
    rows.iter()
        .map(|t| {
            let mut block = format!(
                "{} {}/{} (id {})\n  permission: {}\n  units: {}\n  can create org repos: {}\n  all repositories: {}",
                "●".cyan(),
                t.organization,
                t.name.bold(),
                t.id,
                t.permission,
                if t.units.is_empty() { "-" } else { t.units.as_str() },
                t.can_create_org_repo,
                t.includes_all_repositories
            );
            if !t.description.is_empty() {
                block.push_str(&format!("\n  description: {}", t.description));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn state(rows: &[StateDisplay]) -> String {
    if rows.is_empty() {
        return "State is empty.".to_string();
    }
    rows.iter()
        .map(|s| {
            format!(
                "{} {} (id {}, {}) updated {}",
                s.address.bold(),
                s.team,
                s.id,
                s.permission,
                s.updated_at.dimmed()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
