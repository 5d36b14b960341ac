//! User and profile commands

use colored::Colorize;
use log::debug;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::cli::{CommandContext, OutputFormat, PaginationArgs, UserField};
use crate::client::{ProfileApi, SlackApi};
use crate::client::models::{ProfileUpdate, User, UserProfile, UserStatus};
use crate::error::{LookupField, Result};
use crate::models::UserDisplay;
use crate::output::Formattable;
use crate::output::formatters::{format_expiration, or_missing};
use crate::output::json::print_json;
use crate::reconcile::Resolver;

impl From<UserField> for LookupField {
    fn from(field: UserField) -> Self {
        match field {
            UserField::Id => LookupField::Id,
            UserField::Email => LookupField::Email,
            UserField::Name => LookupField::Name,
        }
    }
}

/// Run the user list command
pub async fn list(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    include_deleted: bool,
    pagination: &PaginationArgs,
) -> Result<()> {
    run_list_command::<User, UserDisplay, _, _>(
        opts,
        cancel,
        pagination,
        "users",
        |client, cancel, page_limit| async move {
            let mut users = Resolver::new(client.as_ref(), cancel)
                .page_limit(page_limit)
                .users()
                .await?;
            if !include_deleted {
                users.retain(|u| !u.deleted);
            }
            Ok(users)
        },
    )
    .await
}

/// Run the user get command
pub async fn get(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    identifier: &str,
    by: UserField,
) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;
    let user = ctx.resolver().user(by.into(), identifier).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&user)?,
        _ => vec![UserDisplay::from(&user)].print(ctx.format)?,
    }

    Ok(())
}

/// Run the user profile command
pub async fn profile(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    user_id: Option<&str>,
) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;
    let profile = ctx
        .resolver()
        .call(ctx.client.get_user_profile(user_id))
        .await?;

    match ctx.format {
        OutputFormat::Json => print_json(&profile)?,
        _ => display_profile(&profile),
    }

    Ok(())
}

fn display_profile(profile: &UserProfile) {
    println!();
    println!("{}: {}", "Name".bold(), or_missing(&profile.real_name));
    println!("{}: {}", "Display name".dimmed(), or_missing(&profile.display_name));
    println!("{}: {}", "Email".dimmed(), or_missing(&profile.email));
    println!("{}: {}", "Title".dimmed(), or_missing(&profile.title));
    println!("{}: {}", "Phone".dimmed(), or_missing(&profile.phone));
    println!();
    display_status(&UserStatus::from(profile));
}

fn display_status(status: &UserStatus) {
    if status.status_text.is_empty() && status.status_emoji.is_empty() {
        println!("{}: {}", "Status".bold(), "(none)".dimmed());
    } else {
        println!(
            "{}: {} {}",
            "Status".bold(),
            status.status_emoji,
            status.status_text
        );
        println!(
            "{}: {}",
            "Expires".dimmed(),
            format_expiration(status.status_expiration)
        );
    }
    println!();
}

// ============================================================================
// Status
// ============================================================================

/// Resolve the expiration flags to Unix seconds (0 = never).
pub fn status_expiration(expires_in: Option<u32>, expiration: Option<i64>, now: i64) -> i64 {
    match (expires_in, expiration) {
        (Some(minutes), _) => now + i64::from(minutes) * 60,
        (None, Some(at)) => at.max(0),
        (None, None) => 0,
    }
}

fn print_status(format: OutputFormat, status: UserStatus) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&status),
        _ => {
            display_status(&status);
            Ok(())
        }
    }
}

/// Status of a user from the workspace listing, or of the token owner
pub async fn read_status<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    user_id: Option<&str>,
) -> Result<UserStatus> {
    match user_id {
        Some(id) => {
            let user = resolver.user(LookupField::Id, id).await?;
            Ok(UserStatus::from(&user.profile))
        }
        None => {
            let profile = resolver
                .call(resolver.client().get_user_profile(None))
                .await?;
            Ok(UserStatus::from(&profile))
        }
    }
}

/// Show a user's status (the token owner's by default)
pub async fn status_get(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    user_id: Option<&str>,
) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;
    let status = read_status(&ctx.resolver(), user_id).await?;

    print_status(ctx.format, status)
}

/// Set the token owner's status
pub async fn status_set(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    text: &str,
    emoji: &str,
    expires_in: Option<u32>,
    expiration: Option<i64>,
) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;

    let status = UserStatus {
        status_text: text.to_string(),
        status_emoji: emoji.to_string(),
        status_expiration: status_expiration(
            expires_in,
            expiration,
            chrono::Utc::now().timestamp(),
        ),
    };
    debug!("Setting status {:?}", status);

    let profile = ctx
        .resolver()
        .call(ctx.client.set_user_profile(None, &ProfileUpdate::from(status)))
        .await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Status updated", "✓".green());
    }
    print_status(ctx.format, UserStatus::from(&profile))
}

/// Clear the token owner's status
pub async fn status_unset(opts: &GlobalOptions, cancel: CancellationToken) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;

    let update = ProfileUpdate::from(UserStatus::cleared());
    let profile = ctx
        .resolver()
        .call(ctx.client.set_user_profile(None, &update))
        .await?;

    if ctx.format != OutputFormat::Json {
        eprintln!("{} Status cleared", "✓".green());
    }
    print_status(ctx.format, UserStatus::from(&profile))
}

// ============================================================================
// Real Name
// ============================================================================

#[derive(Serialize)]
struct RealNameOutput<'a> {
    user_id: &'a str,
    real_name: &'a str,
}

/// Set a user's full name
pub async fn real_name_set(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    user_id: &str,
    real_name: &str,
) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;

    let profile = ctx
        .resolver()
        .call(
            ctx.client
                .set_user_profile(Some(user_id), &ProfileUpdate::real_name(real_name)),
        )
        .await?;

    match ctx.format {
        OutputFormat::Json => print_json(&RealNameOutput {
            user_id,
            real_name: &profile.real_name,
        })?,
        _ => eprintln!(
            "{} Real name of {} set to \"{}\"",
            "✓".green(),
            user_id,
            profile.real_name
        ),
    }

    Ok(())
}
