//! Configuration management for slackform

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Environment variable holding the Slack Web API token
pub const TOKEN_ENV_VAR: &str = "SLACK_API_TOKEN";

/// Default number of items requested per page from cursor-paginated endpoints
pub const DEFAULT_PAGE_LIMIT: usize = 1000;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Slack Web API token (user token, `xoxp-...`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Custom API host (for development/testing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Page size for cursor-paginated listings
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,

    /// Conversation types searched when translating channel names
    #[serde(default = "default_channel_types")]
    pub channel_types: Vec<String>,
}

fn default_page_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

fn default_channel_types() -> Vec<String> {
    vec!["public_channel".to_string(), "private_channel".to_string()]
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            page_limit: default_page_limit(),
            channel_types: default_channel_types(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".slackform").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional override path
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration, falling back to defaults when no file exists.
    ///
    /// Used when the token may come from a flag or the environment instead.
    pub fn load_or_default_at(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Ok(config) => Ok(config),
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to an optional override path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Token is a secret: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Apply a token override (flag or environment) on top of the file value
    pub fn with_token_override(mut self, token: Option<&str>) -> Self {
        if let Some(t) = token.filter(|t| !t.trim().is_empty()) {
            self.api_token = Some(t.to_string());
        }
        self
    }

    /// Apply an API host override on top of the file value
    pub fn with_host_override(mut self, host: Option<&str>) -> Self {
        if let Some(h) = host {
            self.api_host = Some(h.to_string());
        }
        self
    }

    /// Get the API token, returning an error if not set
    pub fn require_token(&self) -> Result<&str> {
        self.api_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiToken.into())
    }

    fn validate(&self) -> Result<()> {
        if self.preferences.page_limit == 0 {
            return Err(ConfigError::Invalid("page_limit must be greater than 0".to_string()).into());
        }
        if self.preferences.channel_types.is_empty() {
            return Err(
                ConfigError::Invalid("channel_types must not be empty".to_string()).into(),
            );
        }
        Ok(())
    }
}
