//! User group models

use serde::{Deserialize, Deserializer, Serialize};

/// User group from the `usergroups.*` methods
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserGroup {
    /// User group ID (`S...`)
    pub id: String,

    /// Workspace ID
    #[serde(default)]
    pub team_id: String,

    #[serde(default)]
    pub is_usergroup: bool,

    #[serde(default)]
    pub is_external: bool,

    /// Display name
    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,

    /// Mention handle (without the `@`)
    #[serde(default)]
    pub handle: String,

    /// Non-empty for workspace-managed groups (`admin`, `owner`)
    #[serde(default, deserialize_with = "nullable_string")]
    pub auto_type: String,

    #[serde(default, deserialize_with = "nullable_string")]
    pub created_by: String,

    #[serde(default, deserialize_with = "nullable_string")]
    pub updated_by: String,

    /// Non-empty when the group is disabled
    #[serde(default, deserialize_with = "nullable_string")]
    pub deleted_by: String,

    #[serde(default)]
    pub date_create: i64,

    #[serde(default)]
    pub date_update: i64,

    #[serde(default)]
    pub date_delete: i64,

    /// Default channels and groups
    #[serde(default)]
    pub prefs: UserGroupPrefs,

    /// Member IDs (only when requested with `include_users`)
    #[serde(default)]
    pub users: Vec<String>,

    /// Member count (only when requested with `include_count`)
    #[serde(default, deserialize_with = "count_from_number_or_string")]
    pub user_count: i64,
}

impl UserGroup {
    /// True when the group has been disabled (soft-deleted)
    pub fn is_disabled(&self) -> bool {
        !self.deleted_by.is_empty()
    }
}

/// Default channels and groups of a user group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserGroupPrefs {
    #[serde(default)]
    pub channels: Vec<String>,

    #[serde(default)]
    pub groups: Vec<String>,
}

/// Parameters for `usergroups.create`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserGroupRequest {
    pub name: String,
    pub handle: Option<String>,
    pub description: Option<String>,
    /// Default channel IDs
    pub channels: Vec<String>,
    pub team_id: Option<String>,
    /// Workspace-managed type (`admin`, `owner`); only settable on create
    pub auto_type: Option<String>,
}

/// Parameters for `usergroups.update`.
///
/// `None` fields are left untouched by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserGroupRequest {
    pub usergroup: String,
    pub name: Option<String>,
    pub handle: Option<String>,
    pub description: Option<String>,
    pub channels: Option<Vec<String>>,
}

/// Filters for `usergroups.list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserGroupQuery {
    pub include_users: bool,
    pub include_count: bool,
    pub include_disabled: bool,
    pub team_id: Option<String>,
}

impl UserGroupQuery {
    /// Everything needed for reconciliation: members, counts and disabled groups
    pub fn complete() -> Self {
        Self {
            include_users: true,
            include_count: true,
            include_disabled: true,
            team_id: None,
        }
    }
}

// Slack sends `null` for unset string fields on user groups.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// `user_count` arrives as a number from `usergroups.list` and as a string from some write methods.
fn count_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(i64),
        Text(String),
        Null,
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Count::Null => Ok(0),
    }
}
