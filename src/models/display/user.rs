//! User display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::User;
use crate::output::formatters::or_missing;

/// User display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "USER ID")]
    pub id: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "USERNAME")]
    pub username: String,

    /// owner, admin, member, guest or bot
    #[tabled(rename = "ROLE")]
    pub role: String,

    #[tabled(rename = "ACTIVE")]
    pub active: bool,
}

fn role(user: &User) -> &'static str {
    if user.is_bot || user.is_app_user {
        "bot"
    } else if user.is_primary_owner || user.is_owner {
        "owner"
    } else if user.is_admin {
        "admin"
    } else if user.is_restricted || user.is_ultra_restricted {
        "guest"
    } else {
        "member"
    }
}

impl From<&User> for UserDisplay {
    fn from(user: &User) -> Self {
        // Prefer the profile's full name, then the top-level one
        let name = if user.profile.real_name.is_empty() {
            or_missing(&user.real_name)
        } else {
            user.profile.real_name.clone()
        };

        Self {
            id: user.id.clone(),
            email: or_missing(user.email()),
            name,
            username: user.name.clone(),
            role: role(user).to_string(),
            active: !user.deleted,
        }
    }
}

impl From<User> for UserDisplay {
    fn from(user: User) -> Self {
        UserDisplay::from(&user)
    }
}
