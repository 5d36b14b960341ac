//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{AuthApi, SlackClient};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for a token, checks it with `auth.test` and saves it. An existing
/// config keeps its preferences.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to slackform!".bold().green());
    println!("Let's set up your Slack configuration.\n");

    let token: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your Slack user token (xoxp-...)")
        .interact()?;

    println!("\n{}", "Checking token...".cyan());
    let mut client = SlackClient::new(token.clone())?;
    if let Some(host) = opts.api_host_ref() {
        client = client.with_base_url(host);
    }
    let identity = client.auth_test().await?;

    println!(
        "{} Authenticated as {} in {}",
        "✓".green(),
        identity.user.bold(),
        identity.team.bold()
    );

    if !token.starts_with("xoxp-") {
        println!(
            "{} This is not a user token; user group and profile commands may be refused.",
            "⚠".yellow()
        );
        let keep = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Save it anyway?")
            .default(false)
            .interact()?;
        if !keep {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let mut config = Config::load_or_default_at(opts.config_ref())?;
    config.api_token = Some(token);
    if opts.api_host.is_some() {
        config.api_host = opts.api_host.clone();
    }
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "slackform status".cyan());
    println!("  {} - List user groups", "slackform usergroup list".cyan());

    Ok(())
}
