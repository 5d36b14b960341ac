//! Slack Web API data models
//!
//! Domain types returned by the Slack Web API, organized by resource type.

pub mod auth;
pub mod conversation;
pub mod user;
pub mod usergroup;

pub use auth::{AuthIdentity, TeamInfo};
pub use conversation::{CONVERSATION_TYPES, Conversation};
pub use user::{ProfileUpdate, User, UserProfile, UserStatus};
pub use usergroup::{CreateUserGroupRequest, UpdateUserGroupRequest, UserGroup, UserGroupQuery};
