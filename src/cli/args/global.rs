//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file values are applied in
/// `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format; `None` defers to `preferences.format`
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.slackform/config.yaml)
    pub config: Option<String>,

    /// Slack API token (from --token or SLACK_API_TOKEN)
    pub token: Option<String>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            token: cli.token.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get token override as `Option<&str>`.
    pub fn token_ref(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Get API host override as `Option<&str>`.
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }

    /// Resolve the output format against the config preference.
    pub fn format_or(&self, preferred: Option<&str>) -> OutputFormat {
        self.format
            .or_else(|| preferred.and_then(OutputFormat::from_name))
            .unwrap_or_default()
    }
}
