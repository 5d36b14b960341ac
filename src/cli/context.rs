//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, token resolution, and client initialization.

use std::sync::Arc;

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::SlackClient;
use crate::config::Config;
use crate::error::Result;
use crate::reconcile::Resolver;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration with flag/env overrides applied
    pub config: Config,
    /// Authenticated API client
    pub client: Arc<SlackClient>,
    /// Output format preference
    pub format: OutputFormat,
    /// Cancelled on Ctrl-C
    pub cancel: CancellationToken,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A missing config file is fine as long as a token arrives by flag or
    /// environment.
    ///
    /// # Errors
    /// Returns error if the config file is invalid or no token is available.
    pub fn new(opts: &GlobalOptions, cancel: CancellationToken) -> Result<Self> {
        let config = Config::load_or_default_at(opts.config_ref())?
            .with_token_override(opts.token_ref())
            .with_host_override(opts.api_host_ref());

        let mut client = SlackClient::new(config.require_token()?)?;
        if let Some(host) = config.api_host.as_deref() {
            debug!("Using custom API host: {}", host);
            client = client.with_base_url(host);
        }

        let format = opts.format_or(config.preferences.format.as_deref());

        Ok(Self {
            config,
            client: Arc::new(client),
            format,
            cancel,
        })
    }

    /// A resolver over this context's client, sized by the config preferences.
    pub fn resolver(&self) -> Resolver<'_, SlackClient> {
        self.resolver_with_page_size(None)
    }

    /// Like [`resolver`](Self::resolver), with an optional page size override.
    pub fn resolver_with_page_size(&self, page_size: Option<usize>) -> Resolver<'_, SlackClient> {
        Resolver::new(self.client.as_ref(), self.cancel.clone())
            .page_limit(page_size.unwrap_or(self.config.preferences.page_limit))
            .channel_types(self.config.preferences.channel_types.clone())
    }
}
