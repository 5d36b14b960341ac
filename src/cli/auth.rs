//! Token and workspace commands

use colored::Colorize;
use tokio_util::sync::CancellationToken;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::AuthApi;
use crate::error::Result;
use crate::output::json::print_json;
use crate::output::formatters::or_missing;

/// Show the identity behind the token (`auth.test`)
pub async fn test(opts: &GlobalOptions, cancel: CancellationToken) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;
    let resolver = ctx.resolver();
    let identity = resolver.call(ctx.client.auth_test()).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&identity)?,
        _ => {
            println!("{} Token is valid", "✓".green());
            println!("{}: {} ({})", "User".bold(), identity.user, identity.user_id);
            println!("{}: {} ({})", "Team".bold(), identity.team, identity.team_id);
            println!("{}: {}", "URL".dimmed(), identity.url);
            if let Some(ref bot) = identity.bot_id {
                println!("{}: {}", "Bot".dimmed(), bot);
            }
        }
    }

    Ok(())
}

/// Show the token's workspace (`team.info`)
pub async fn team_info(opts: &GlobalOptions, cancel: CancellationToken) -> Result<()> {
    let ctx = CommandContext::new(opts, cancel)?;
    let resolver = ctx.resolver();
    let team = resolver.call(ctx.client.team_info()).await?;

    match ctx.format {
        OutputFormat::Json => print_json(&team)?,
        _ => {
            println!("{}: {}", "Workspace".bold(), team.name);
            println!("{}: {}", "ID".dimmed(), team.id);
            println!("{}: {}.slack.com", "Domain".dimmed(), team.domain);
            println!("{}: {}", "Email domain".dimmed(), or_missing(&team.email_domain));
        }
    }

    Ok(())
}
