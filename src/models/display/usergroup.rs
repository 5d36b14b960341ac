//! User group display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::UserGroup;
use crate::output::formatters::or_missing;

/// User group row for `usergroup list`.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserGroupDisplay {
    #[tabled(rename = "GROUP ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "HANDLE")]
    pub handle: String,

    #[tabled(rename = "USERS")]
    pub user_count: i64,

    #[tabled(rename = "CHANNELS")]
    pub channels: usize,

    #[tabled(rename = "ENABLED")]
    pub enabled: bool,

    #[tabled(skip)]
    pub description: String,
}

impl From<&UserGroup> for UserGroupDisplay {
    fn from(group: &UserGroup) -> Self {
        Self {
            id: group.id.clone(),
            name: group.name.clone(),
            handle: or_missing(&group.handle),
            user_count: group.user_count,
            channels: group.prefs.channels.len(),
            enabled: !group.is_disabled(),
            description: group.description.clone(),
        }
    }
}

impl From<UserGroup> for UserGroupDisplay {
    fn from(group: UserGroup) -> Self {
        UserGroupDisplay::from(&group)
    }
}
