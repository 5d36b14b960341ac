//! User group commands

use colored::Colorize;
use dialoguer::Confirm;
use tokio_util::sync::CancellationToken;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::cli::{CommandContext, OutputFormat, PaginationArgs, UserGroupArgs, UserGroupField};
use crate::client::models::UserGroup;
use crate::error::Result;
use crate::models::UserGroupDisplay;
use crate::output::Formattable;
use crate::output::formatters::or_missing;
use crate::output::json::{JsonOutput, print_json};
use crate::reconcile::{
    Action, ReconciliationResult, Resolver, UserGroupPlan, UserGroupSpec, UserGroupState,
    disable_user_group, preview_user_group, read_user_group, read_user_group_by_name,
    reconcile_user_group, update_user_group,
};

impl From<&UserGroupArgs> for UserGroupSpec {
    fn from(args: &UserGroupArgs) -> Self {
        Self {
            name: args.name.clone(),
            handle: args.handle.clone(),
            description: args.description.clone(),
            channels: args.channels.clone(),
            team_id: args.team_id.clone(),
            auto_type: args.auto_type.clone(),
        }
    }
}

// ============================================================================
// Display Helpers
// ============================================================================

/// Print a reconciled group in the requested format
pub fn display_result(result: &ReconciliationResult, format: OutputFormat) -> Result<()> {
    let state = UserGroupState::from(result);

    match format {
        OutputFormat::Json => print_json(&state)?,
        OutputFormat::Table => vec![UserGroupDisplay::from(&result.group)].print(format)?,
        OutputFormat::Pretty => {
            println!();
            println!("{}: {}", "User group".bold(), state.name);
            println!("{}: {}", "ID".dimmed(), state.id);
            println!("{}: @{}", "Handle".dimmed(), or_missing(&state.handle));
            println!("{}: {}", "Description".dimmed(), or_missing(&state.description));
            if let Some(ref auto_type) = state.auto_type {
                println!("{}: {}", "Managed".dimmed(), auto_type);
            }
            if !state.enabled {
                println!("{}", "(disabled)".yellow());
            }

            println!();
            match state.channels {
                Some(ref channels) => {
                    println!("{} ({}):", "Channels".bold(), channels.len().to_string().cyan());
                    for channel in channels {
                        println!("  • #{}", channel);
                    }
                }
                None => println!("{}: {}", "Channels".bold(), "(none)".dimmed()),
            }

            println!();
            println!(
                "{} ({}):",
                "Members".bold(),
                state.user_count.to_string().cyan()
            );
            match (&state.users_id, &state.users_email) {
                (Some(ids), Some(emails)) => {
                    for (id, email) in ids.iter().zip(emails) {
                        println!("  • {} ({})", email, id.dimmed());
                    }
                }
                _ => println!("  {}", "(none)".dimmed()),
            }
            println!();
        }
    }

    Ok(())
}

fn report(result: &ReconciliationResult, format: OutputFormat) -> Result<()> {
    if format != OutputFormat::Json {
        let group = &result.group;
        match result.action {
            Action::Created => {
                eprintln!("{} User group \"{}\" created (ID: {})", "✓".green(), group.name, result.id());
                eprintln!(
                    "→ Add members: slackform member set \"{}\" --default-user <EMAIL>",
                    group.name
                );
            }
            Action::Updated { reenabled: true } => eprintln!(
                "{} User group \"{}\" re-enabled and updated",
                "✓".green(),
                group.name
            ),
            Action::Updated { reenabled: false } => {
                eprintln!("{} User group \"{}\" updated", "✓".green(), group.name)
            }
            Action::Disabled => {
                eprintln!("{} User group \"{}\" disabled", "✓".green(), group.name)
            }
            Action::Read => {}
        }
    }
    display_result(result, format)
}

fn display_plan(spec: &UserGroupSpec, plan: &UserGroupPlan, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let action = if plan.creates() { "create" } else { "update" };
        let data = serde_json::json!({
            "action": action,
            "reenable": plan.reenables(),
            "usergroup_id": plan.existing.as_ref().map(|g| g.id.as_str()),
            "declared": spec,
            "channel_ids": plan.channel_ids,
        });
        println!("{}", serde_json::to_string_pretty(&JsonOutput::new(data).dry_run())?);
        return Ok(());
    }

    eprintln!("{}", "DRY RUN - no changes will be made".yellow());
    eprintln!();
    match &plan.existing {
        None => eprintln!("Would create user group: {}", spec.name.bold()),
        Some(group) => {
            if plan.reenables() {
                eprintln!("Would re-enable disabled user group {}", group.id);
            }
            eprintln!("Would update user group: \"{}\" (ID: {})", group.name, group.id);
            print_change("handle", &group.handle, spec.handle.as_deref());
            print_change("description", &group.description, spec.description.as_deref());
        }
    }
    if let Some(ref channels) = spec.channels {
        eprintln!("  Channels: {}", channels.join(", "));
    }

    Ok(())
}

fn print_change(field: &str, current: &str, declared: Option<&str>) {
    if let Some(declared) = declared
        && declared != current
    {
        eprintln!(
            "  {}: {} → {}",
            field,
            or_missing(current).dimmed(),
            declared.cyan()
        );
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Run the usergroup list command
pub async fn list(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    include_disabled: bool,
    pagination: &PaginationArgs,
) -> Result<()> {
    run_list_command::<UserGroup, UserGroupDisplay, _, _>(
        opts,
        cancel,
        pagination,
        "user groups",
        |client, cancel, _| async move {
            let mut groups = Resolver::new(client.as_ref(), cancel)
                .user_groups(None)
                .await?;
            if !include_disabled {
                groups.retain(|g| !g.is_disabled());
            }
            groups.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            Ok(groups)
        },
    )
    .await
}

/// Run the usergroup get command
pub async fn get(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    group: &str,
    by: UserGroupField,
) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;
    let resolver = ctx.resolver();
    let result = match by {
        UserGroupField::Id => read_user_group(&resolver, group).await?,
        UserGroupField::Name => read_user_group_by_name(&resolver, group).await?,
    };
    display_result(&result, ctx.format)
}

/// Create or update a group by name
pub async fn apply(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    args: &UserGroupArgs,
    dry_run: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;
    let resolver = ctx.resolver();
    let spec = UserGroupSpec::from(args);

    if dry_run {
        let plan = preview_user_group(&resolver, &spec).await?;
        return display_plan(&spec, &plan, ctx.format);
    }

    let result = reconcile_user_group(&resolver, &spec).await?;
    report(&result, ctx.format)
}

/// Update a group by ID
pub async fn update(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    id: &str,
    args: &UserGroupArgs,
    dry_run: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;
    let resolver = ctx.resolver();
    let spec = UserGroupSpec::from(args);

    if dry_run {
        let current = resolver.user_group_by_id(id).await?;
        let plan = UserGroupPlan {
            channel_ids: match spec.channels {
                Some(ref names) => Some(resolver.channel_ids(names).await?),
                None => None,
            },
            existing: Some(current),
        };
        return display_plan(&spec, &plan, ctx.format);
    }

    let result = update_user_group(&resolver, id, &spec).await?;
    report(&result, ctx.format)
}

/// Disable a group
pub async fn disable(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    id: &str,
    yes: bool,
    dry_run: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;
    let resolver = ctx.resolver();

    let group = resolver.user_group_by_id(id).await?;

    if dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
        eprintln!("Would disable user group: \"{}\" (ID: {})", group.name, group.id);
        eprintln!("  Members: {}", group.user_count);
        return Ok(());
    }

    if group.is_disabled() {
        eprintln!("User group \"{}\" is already disabled.", group.name);
        return Ok(());
    }

    if !yes {
        eprintln!(
            "{} This will disable user group \"{}\" ({} member(s)).",
            "⚠".yellow(),
            group.name,
            group.user_count
        );
        eprintln!("  Mentions of @{} will stop notifying anyone.", group.handle);
        eprintln!();

        let confirm = Confirm::new()
            .with_prompt("Confirm disable?")
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let result = disable_user_group(&resolver, id).await?;
    report(&result, ctx.format)
}
