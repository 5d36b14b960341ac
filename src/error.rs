//! Error types for slackform

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for slackform operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A required collection was unset, or a declared value breaks a rule.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A page of a listing could not be fetched. The whole listing fails.
    #[error("Failed to fetch {collection} (page {page}): {source}")]
    RemoteFetch {
        collection: &'static str,
        page: usize,
        #[source]
        source: Box<Error>,
    },

    /// A name, email or ID could not be resolved. Aborts the whole batch.
    #[error("No {kind} found with {field} '{identifier}'")]
    Translation {
        kind: EntityKind,
        field: LookupField,
        identifier: String,
    },

    /// A step of a user group or membership reconciliation failed.
    #[error("Reconciliation failed during {phase}: {source}")]
    Reconciliation {
        phase: Phase,
        #[source]
        source: Box<Error>,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// Wrap this error with the reconciliation phase it happened in.
    ///
    /// Cancellation passes through untouched so callers can still match on it.
    pub fn in_phase(self, phase: Phase) -> Self {
        match self {
            Error::Cancelled => Error::Cancelled,
            other => Error::Reconciliation {
                phase,
                source: Box::new(other),
            },
        }
    }

    /// True if this error, or any reconciliation/fetch error wrapping it, is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Error::Cancelled => true,
            Error::RemoteFetch { source, .. } | Error::Reconciliation { source, .. } => {
                source.is_cancelled()
            }
            _ => false,
        }
    }
}

/// Kinds of remote entities the resolver can look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Conversation,
    User,
    UserGroup,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Conversation => "conversation",
            EntityKind::User => "user",
            EntityKind::UserGroup => "user group",
        };
        f.write_str(s)
    }
}

/// Field a lookup matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupField {
    Id,
    Name,
    Email,
}

impl fmt::Display for LookupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LookupField::Id => "id",
            LookupField::Name => "name",
            LookupField::Email => "email",
        };
        f.write_str(s)
    }
}

/// Steps of a reconciliation, reported when one of them fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Validate,
    Translate,
    Team,
    Lookup,
    Create,
    Enable,
    Update,
    Disable,
    Members,
    Describe,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Validate => "validate",
            Phase::Translate => "translate",
            Phase::Team => "team lookup",
            Phase::Lookup => "lookup",
            Phase::Create => "create",
            Phase::Enable => "enable",
            Phase::Update => "update",
            Phase::Disable => "disable",
            Phase::Members => "member update",
            Phase::Describe => "describe",
        };
        f.write_str(s)
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Run `slackform init` or set SLACK_API_TOKEN.")]
    Unauthorized,

    #[error("Access denied: token is missing a required scope ({0}).")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Slack API error from {method}: {code}")]
    Slack { method: String, code: String },
}

impl ApiError {
    /// Map a Slack `error` code from an `ok: false` envelope to an API error.
    pub fn from_slack_code(method: &str, code: &str, needed_scope: Option<&str>) -> Self {
        match code {
            "invalid_auth" | "not_authed" | "account_inactive" | "token_revoked"
            | "token_expired" => ApiError::Unauthorized,
            "missing_scope" | "not_allowed_token_type" | "no_permission" => {
                ApiError::Forbidden(needed_scope.unwrap_or(code).to_string())
            }
            "ratelimited" => ApiError::RateLimit(Duration::from_secs(60)),
            "invalid_arguments" | "invalid_cursor" | "invalid_limit" | "name_already_exists"
            | "handle_already_exists" | "invalid_users" | "invalid_channel" => {
                ApiError::BadRequest(format!("{}: {}", method, code))
            }
            c if c.ends_with("_not_found") || c == "no_such_subteam" => {
                ApiError::NotFound(format!("{}: {}", method, code))
            }
            "internal_error" | "fatal_error" | "service_unavailable" | "request_timeout" => {
                ApiError::ServerError(format!("{}: {}", method, code))
            }
            _ => ApiError::Slack {
                method: method.to_string(),
                code: code.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `slackform init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error(
        "API token not configured. Run `slackform init`, pass --token, or set SLACK_API_TOKEN."
    )]
    MissingApiToken,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
