//! Profile API trait

use async_trait::async_trait;

use crate::client::models::{ProfileUpdate, UserProfile};
use crate::error::Result;

/// User profile operations for the Slack Web API
///
/// A `user_id` of `None` targets the token owner.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Get a user's profile (`users.profile.get`)
    async fn get_user_profile(&self, user_id: Option<&str>) -> Result<UserProfile>;

    /// Write profile fields (`users.profile.set`) and return the updated profile
    async fn set_user_profile(
        &self,
        user_id: Option<&str>,
        update: &ProfileUpdate,
    ) -> Result<UserProfile>;
}
