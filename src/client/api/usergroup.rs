//! User group API trait for write operations
//!
//! Covers the `usergroups.*` write methods:
//! - Create and update group attributes
//! - Enable and disable (Slack never deletes a user group)
//! - Replace the member list

use async_trait::async_trait;

use crate::client::models::{CreateUserGroupRequest, UpdateUserGroupRequest, UserGroup};
use crate::error::Result;

/// User group management operations for the Slack Web API
#[async_trait]
pub trait UserGroupApi: Send + Sync {
    /// Create a user group (`usergroups.create`)
    async fn create_user_group(&self, request: CreateUserGroupRequest) -> Result<UserGroup>;

    /// Update a user group's attributes (`usergroups.update`).
    ///
    /// Fields left as `None` are not sent and keep their remote value.
    async fn update_user_group(&self, request: UpdateUserGroupRequest) -> Result<UserGroup>;

    /// Re-enable a disabled user group (`usergroups.enable`)
    async fn enable_user_group(&self, usergroup_id: &str) -> Result<UserGroup>;

    /// Disable a user group (`usergroups.disable`)
    async fn disable_user_group(&self, usergroup_id: &str) -> Result<UserGroup>;

    /// Replace the full member list of a user group (`usergroups.users.update`).
    ///
    /// The list is a complete replacement, not incremental.
    async fn update_user_group_members(
        &self,
        usergroup_id: &str,
        user_ids: &[String],
    ) -> Result<UserGroup>;
}
