//! User and profile models

use serde::{Deserialize, Serialize};

/// Workspace member from `users.list`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: String,

    /// Workspace ID
    #[serde(default)]
    pub team_id: String,

    /// Username
    #[serde(default)]
    pub name: String,

    /// Whether the account is deactivated
    #[serde(default)]
    pub deleted: bool,

    /// Display color
    #[serde(default)]
    pub color: String,

    /// Full name
    #[serde(default)]
    pub real_name: String,

    /// Time zone identifier
    #[serde(default)]
    pub tz: String,

    #[serde(default)]
    pub is_admin: bool,

    #[serde(default)]
    pub is_owner: bool,

    #[serde(default)]
    pub is_primary_owner: bool,

    #[serde(default)]
    pub is_restricted: bool,

    #[serde(default)]
    pub is_ultra_restricted: bool,

    #[serde(default)]
    pub is_bot: bool,

    #[serde(default)]
    pub is_app_user: bool,

    /// Last update (Unix seconds)
    #[serde(default)]
    pub updated: i64,

    /// Profile fields
    #[serde(default)]
    pub profile: UserProfile,
}

impl User {
    /// Email from the profile (empty for bots and when the token lacks `users:read.email`)
    pub fn email(&self) -> &str {
        &self.profile.email
    }
}

/// User profile from `users.profile.get` (also embedded in `users.list`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub real_name: String,

    #[serde(default)]
    pub real_name_normalized: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub status_text: String,

    #[serde(default)]
    pub status_emoji: String,

    /// Status expiry (Unix seconds, 0 = never)
    #[serde(default)]
    pub status_expiration: i64,

    #[serde(default)]
    pub image_72: String,
}

/// Custom status to set on a profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStatus {
    pub status_text: String,
    pub status_emoji: String,
    /// Unix seconds, 0 = never expires
    pub status_expiration: i64,
}

impl UserStatus {
    /// Status with every field cleared (used to unset)
    pub fn cleared() -> Self {
        Self::default()
    }
}

/// Fields written by `users.profile.set`.
///
/// Only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_emoji: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_expiration: Option<i64>,
}

impl ProfileUpdate {
    /// Update that only changes the real name
    pub fn real_name(name: impl Into<String>) -> Self {
        Self {
            real_name: Some(name.into()),
            ..Default::default()
        }
    }
}

impl From<UserStatus> for ProfileUpdate {
    fn from(status: UserStatus) -> Self {
        Self {
            real_name: None,
            status_text: Some(status.status_text),
            status_emoji: Some(status.status_emoji),
            status_expiration: Some(status.status_expiration),
        }
    }
}

impl From<&UserProfile> for UserStatus {
    fn from(profile: &UserProfile) -> Self {
        Self {
            status_text: profile.status_text.clone(),
            status_emoji: profile.status_emoji.clone(),
            status_expiration: profile.status_expiration,
        }
    }
}
