//! User group membership commands

use colored::Colorize;
use dialoguer::Confirm;
use tokio_util::sync::CancellationToken;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::json::{JsonOutput, print_json};
use crate::reconcile::sets::MembershipDelta;
use crate::reconcile::{
    MembershipResult, MembershipSpec, MembershipState, apply_membership, preview_membership,
    read_membership, release_membership,
};

// ============================================================================
// Display Helpers
// ============================================================================

/// Print a membership in the requested format
pub fn display_membership(result: &MembershipResult, format: OutputFormat) -> Result<()> {
    let state = MembershipState::from(result);

    match format {
        OutputFormat::Json => print_json(&state)?,
        _ => {
            println!();
            println!(
                "{}: {} ({})",
                "User group".bold(),
                state.usergroup,
                state.usergroup_id.dimmed()
            );
            println!("{}: {}", "Default user".bold(), state.default_user);
            println!();
            match state.users {
                Some(ref users) => {
                    println!("{} ({}):", "Other members".bold(), users.len().to_string().cyan());
                    for user in users {
                        println!("  • {}", user);
                    }
                }
                None => println!("{}: {}", "Other members".bold(), "(none)".dimmed()),
            }
            println!();
        }
    }

    Ok(())
}

/// Print a membership delta to stderr
pub fn print_delta(usergroup: &str, delta: &MembershipDelta) {
    eprintln!("User group \"{}\" member changes:", usergroup);
    if !delta.to_add.is_empty() {
        eprintln!("  {} Add: {}", "+".green(), delta.to_add.len());
        for email in &delta.to_add {
            eprintln!("    • {}", email);
        }
    }
    if !delta.to_remove.is_empty() {
        eprintln!("  {} Remove: {}", "-".red(), delta.to_remove.len());
        for email in &delta.to_remove {
            eprintln!("    • {}", email);
        }
    }
    if !delta.unchanged.is_empty() {
        eprintln!("  {} Unchanged: {}", "=".dimmed(), delta.unchanged.len());
    }
}

pub(crate) fn delta_json(delta: &MembershipDelta) -> serde_json::Value {
    serde_json::json!({
        "added": delta.to_add,
        "removed": delta.to_remove,
        "unchanged": delta.unchanged,
    })
}

// ============================================================================
// Commands
// ============================================================================

/// Replace a group's members (default user plus `users`)
pub async fn set(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    usergroup: &str,
    default_user: &str,
    users: Vec<String>,
    dry_run: bool,
    yes: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;
    let resolver = ctx.resolver();
    let spec = MembershipSpec {
        usergroup: usergroup.to_string(),
        default_user: default_user.to_string(),
        users,
    };

    let plan = preview_membership(&resolver, &spec).await?;

    if dry_run {
        if ctx.format == OutputFormat::Json {
            let output = JsonOutput::new(delta_json(&plan.delta)).dry_run();
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            eprintln!("{}", "DRY RUN - no changes will be made".yellow());
            eprintln!();
            print_delta(&plan.group.name, &plan.delta);
        }
        return Ok(());
    }

    if plan.delta.is_empty() {
        eprintln!("{} Membership already up to date", "✓".green());
        let current = read_membership(&resolver, usergroup, default_user).await?;
        return display_membership(&current, ctx.format);
    }

    // Confirmation if removing users (unless --yes)
    if !yes && !plan.delta.to_remove.is_empty() {
        eprintln!(
            "{} This will replace membership of user group \"{}\":",
            "⚠".yellow(),
            plan.group.name
        );
        eprintln!("  Add: {} user(s)", plan.delta.to_add.len());
        eprintln!("  Remove: {} user(s)", plan.delta.to_remove.len());
        eprintln!("  Unchanged: {} user(s)", plan.delta.unchanged.len());
        eprintln!();

        let confirm = Confirm::new()
            .with_prompt("Proceed with membership sync?")
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let result = apply_membership(&resolver, &spec).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!(
            "{} User group \"{}\" membership updated (+{} -{} ={})",
            "✓".green(),
            result.group.name,
            plan.delta.to_add.len(),
            plan.delta.to_remove.len(),
            plan.delta.unchanged.len()
        );
    }
    display_membership(&result, ctx.format)
}

/// Show a group's members
pub async fn get(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    usergroup: &str,
    default_user: &str,
) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;
    let result = read_membership(&ctx.resolver(), usergroup, default_user).await?;
    display_membership(&result, ctx.format)
}

/// Reset a group to its default user
pub async fn release(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    usergroup: &str,
    default_user: &str,
    yes: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;
    let resolver = ctx.resolver();

    if !yes {
        let current = read_membership(&resolver, usergroup, default_user).await?;
        if !current.other_members.is_empty() {
            eprintln!(
                "{} This will remove {} member(s) from user group \"{}\", keeping only {}.",
                "⚠".yellow(),
                current.other_members.len(),
                current.group.name,
                default_user
            );
            eprintln!();

            let confirm = Confirm::new()
                .with_prompt("Confirm release?")
                .default(false)
                .interact()?;

            if !confirm {
                eprintln!("Cancelled.");
                return Ok(());
            }
        }
    }

    let result = release_membership(&resolver, usergroup, default_user).await?;

    if ctx.format != OutputFormat::Json {
        eprintln!(
            "{} User group \"{}\" released to {}",
            "✓".green(),
            result.group.name,
            default_user
        );
    }
    display_membership(&result, ctx.format)
}
