//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::{Config, TOKEN_ENV_VAR};
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "slackform Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;

    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            if opts.token.is_some() {
                println!(
                    "{} API token supplied by --token or {}",
                    "✓".green(),
                    TOKEN_ENV_VAR
                );
            } else if config.require_token().is_ok() {
                println!("{} API token configured", "✓".green());
            } else {
                println!("{} API token not configured", "✗".red());
                println!("  → Run 'slackform init' to configure");
            }

            let prefs = &config.preferences;
            println!(
                "{} Page size: {}",
                "○".dimmed(),
                prefs.page_limit.to_string().cyan()
            );
            println!(
                "{} Channel types: {}",
                "○".dimmed(),
                prefs.channel_types.join(", ").cyan()
            );
            if let Some(ref format) = prefs.format {
                println!("{} Default format: {}", "○".dimmed(), format.cyan());
            }

            if let Some(ref host) = config.api_host {
                println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
            }

            println!();
        }
        Err(_) if opts.token.is_some() => {
            println!("{} No configuration file", "○".dimmed());
            println!(
                "{} API token supplied by --token or {}",
                "✓".green(),
                TOKEN_ENV_VAR
            );
            println!();
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} or set {}.",
                "slackform init".cyan(),
                TOKEN_ENV_VAR.cyan()
            );
            println!();
        }
    }

    Ok(())
}
