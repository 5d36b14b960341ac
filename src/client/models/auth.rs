//! Authentication and workspace models

use serde::{Deserialize, Serialize};

/// Identity behind the configured token, as reported by `auth.test`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthIdentity {
    /// Workspace URL
    #[serde(default)]
    pub url: String,

    /// Workspace name
    #[serde(default)]
    pub team: String,

    /// User name the token belongs to
    #[serde(default)]
    pub user: String,

    /// Workspace ID
    #[serde(default)]
    pub team_id: String,

    /// User ID the token belongs to
    #[serde(default)]
    pub user_id: String,

    /// Bot ID (bot tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,

    /// Whether the app is installed org-wide on Enterprise Grid
    #[serde(default)]
    pub is_enterprise_install: bool,
}

/// Workspace details from `team.info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInfo {
    /// Workspace ID
    pub id: String,

    /// Workspace name
    #[serde(default)]
    pub name: String,

    /// Workspace subdomain
    #[serde(default)]
    pub domain: String,

    /// Email domain(s) allowed to sign up
    #[serde(default)]
    pub email_domain: String,

    /// Workspace icon
    #[serde(default)]
    pub icon: TeamIcon,
}

/// Workspace icon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamIcon {
    /// 34px image URL
    #[serde(default)]
    pub image_34: String,

    /// True when the workspace uses the default icon
    #[serde(default)]
    pub image_default: bool,
}
