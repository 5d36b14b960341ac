//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::models::auth::TeamIcon;
use super::models::conversation::TopicOrPurpose;
use super::models::usergroup::UserGroupPrefs;
use super::models::{AuthIdentity, Conversation, TeamInfo, User, UserGroup, UserProfile};

// ============================================================================
// ConversationBuilder
// ============================================================================

/// Builder for creating test Conversation instances.
///
/// # Example
/// ```ignore
/// let channel = ConversationBuilder::new("C123")
///     .name("general")
///     .private()
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConversationBuilder {
    id: String,
    name: String,
    is_private: bool,
    is_archived: bool,
    is_im: bool,
    is_mpim: bool,
    purpose: String,
    topic: String,
    num_members: i64,
}

impl ConversationBuilder {
    /// Create a new public channel builder with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: format!("channel-{}", id.to_lowercase()),
            id,
            is_private: false,
            is_archived: false,
            is_im: false,
            is_mpim: false,
            purpose: String::new(),
            topic: String::new(),
            num_members: 0,
        }
    }

    /// Set the channel name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Make this a private channel.
    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    /// Make this a direct message.
    pub fn im(mut self) -> Self {
        self.is_im = true;
        self.is_private = true;
        self
    }

    /// Make this a multi-person direct message.
    pub fn mpim(mut self) -> Self {
        self.is_mpim = true;
        self.is_private = true;
        self
    }

    /// Mark the channel archived.
    pub fn archived(mut self) -> Self {
        self.is_archived = true;
        self
    }

    /// Set the purpose text.
    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    /// Set the topic text.
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Set the member count.
    pub fn members(mut self, count: i64) -> Self {
        self.num_members = count;
        self
    }

    /// Build the Conversation.
    pub fn build(self) -> Conversation {
        let is_channel = !self.is_im && !self.is_mpim;
        Conversation {
            name_normalized: self.name.clone(),
            id: self.id,
            name: self.name,
            created: 1_700_000_000,
            creator: "U000".to_string(),
            is_archived: self.is_archived,
            is_channel: is_channel && !self.is_private,
            is_group: is_channel && self.is_private,
            is_im: self.is_im,
            is_mpim: self.is_mpim,
            is_private: self.is_private,
            num_members: self.num_members,
            purpose: TopicOrPurpose {
                value: self.purpose,
                ..Default::default()
            },
            topic: TopicOrPurpose {
                value: self.topic,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

// ============================================================================
// UserBuilder
// ============================================================================

/// Builder for creating test User instances.
///
/// # Example
/// ```ignore
/// let user = UserBuilder::new("U123")
///     .email("jane@company.com")
///     .real_name("Jane Doe")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct UserBuilder {
    id: String,
    name: String,
    email: String,
    real_name: String,
    deleted: bool,
    is_bot: bool,
    is_admin: bool,
}

impl UserBuilder {
    /// Create a new builder with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let login = id.to_lowercase();
        Self {
            email: format!("{}@example.com", login),
            real_name: format!("User {}", id),
            name: login,
            id,
            deleted: false,
            is_bot: false,
            is_admin: false,
        }
    }

    /// Set the username.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the profile email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the real name.
    pub fn real_name(mut self, real_name: impl Into<String>) -> Self {
        self.real_name = real_name.into();
        self
    }

    /// Mark the account deactivated.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Mark the account as a bot (bots carry no email).
    pub fn bot(mut self) -> Self {
        self.is_bot = true;
        self.email = String::new();
        self
    }

    /// Mark the account as a workspace admin.
    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    /// Build the User.
    pub fn build(self) -> User {
        User {
            id: self.id,
            team_id: "T000".to_string(),
            name: self.name.clone(),
            deleted: self.deleted,
            real_name: self.real_name.clone(),
            tz: "Europe/London".to_string(),
            is_admin: self.is_admin,
            is_bot: self.is_bot,
            profile: UserProfile {
                email: self.email,
                real_name_normalized: self.real_name.clone(),
                real_name: self.real_name,
                display_name: self.name,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

// ============================================================================
// UserGroupBuilder
// ============================================================================

/// Builder for creating test UserGroup instances.
///
/// # Example
/// ```ignore
/// let group = UserGroupBuilder::new("S123")
///     .name("Group 2")
///     .users(["U1", "U2"])
///     .disabled()
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct UserGroupBuilder {
    id: String,
    name: String,
    handle: String,
    description: String,
    auto_type: String,
    deleted_by: String,
    channels: Vec<String>,
    users: Vec<String>,
}

impl UserGroupBuilder {
    /// Create a new builder with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: format!("Group {}", &id),
            handle: format!("group-{}", id.to_lowercase()),
            id,
            description: String::new(),
            auto_type: String::new(),
            deleted_by: String::new(),
            channels: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Set the group name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the mention handle.
    pub fn handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = handle.into();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the group workspace-managed (e.g. `admin`).
    pub fn auto_type(mut self, auto_type: impl Into<String>) -> Self {
        self.auto_type = auto_type.into();
        self
    }

    /// Mark the group disabled.
    pub fn disabled(mut self) -> Self {
        self.deleted_by = "U000".to_string();
        self
    }

    /// Set the default channel IDs.
    pub fn channels<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.channels = channels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the member IDs (user count follows).
    pub fn users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users = users.into_iter().map(Into::into).collect();
        self
    }

    /// Build the UserGroup.
    pub fn build(self) -> UserGroup {
        UserGroup {
            id: self.id,
            team_id: "T000".to_string(),
            is_usergroup: true,
            name: self.name,
            description: self.description,
            handle: self.handle,
            auto_type: self.auto_type,
            created_by: "U000".to_string(),
            deleted_by: self.deleted_by,
            date_create: 1_700_000_000,
            prefs: UserGroupPrefs {
                channels: self.channels,
                groups: Vec::new(),
            },
            user_count: self.users.len() as i64,
            users: self.users,
            ..Default::default()
        }
    }
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Create a public channel with the given ID and name.
pub fn test_channel(id: &str, name: &str) -> Conversation {
    ConversationBuilder::new(id).name(name).build()
}

/// Create a user with the given ID and email.
pub fn test_user(id: &str, email: &str) -> User {
    UserBuilder::new(id).email(email).build()
}

/// Create an enabled, empty user group with the given ID and name.
pub fn test_group(id: &str, name: &str) -> UserGroup {
    UserGroupBuilder::new(id).name(name).build()
}

/// Token identity for the mock workspace.
pub fn test_identity() -> AuthIdentity {
    AuthIdentity {
        url: "https://acme.slack.com/".to_string(),
        team: "Acme".to_string(),
        user: "admin".to_string(),
        team_id: "T000".to_string(),
        user_id: "U000".to_string(),
        bot_id: None,
        is_enterprise_install: false,
    }
}

/// Workspace info for the mock workspace.
pub fn test_team() -> TeamInfo {
    TeamInfo {
        id: "T000".to_string(),
        name: "Acme".to_string(),
        domain: "acme".to_string(),
        email_domain: "example.com".to_string(),
        icon: TeamIcon::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_builder_defaults() {
        let channel = ConversationBuilder::new("C1").build();
        assert_eq!(channel.id, "C1");
        assert_eq!(channel.name, "channel-c1");
        assert!(channel.is_channel);
        assert!(!channel.is_private);
    }

    #[test]
    fn test_conversation_builder_private() {
        let channel = ConversationBuilder::new("G1").name("secret").private().build();
        assert!(channel.is_private);
        assert!(channel.is_group);
        assert!(!channel.is_channel);
    }

    #[test]
    fn test_user_builder_defaults() {
        let user = UserBuilder::new("U1").build();
        assert_eq!(user.email(), "u1@example.com");
        assert_eq!(user.real_name, "User U1");
    }

    #[test]
    fn test_user_builder_bot_has_no_email() {
        let user = UserBuilder::new("B1").bot().build();
        assert!(user.is_bot);
        assert_eq!(user.email(), "");
    }

    #[test]
    fn test_group_builder_counts_users() {
        let group = UserGroupBuilder::new("S1")
            .users(["U1", "U2"])
            .disabled()
            .build();
        assert_eq!(group.user_count, 2);
        assert!(group.is_disabled());
    }

    #[test]
    fn test_convenience_functions() {
        assert_eq!(test_channel("C9", "general").name, "general");
        assert_eq!(test_user("U9", "x@example.com").email(), "x@example.com");
        assert_eq!(test_group("S9", "Ops").name, "Ops");
        assert_eq!(test_identity().team_id, test_team().id);
    }
}
