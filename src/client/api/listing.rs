//! Listing API trait for collection operations

use async_trait::async_trait;

use crate::client::models::{Conversation, User, UserGroup, UserGroupQuery};
use crate::client::pagination::{ConversationQuery, CursorPage, CursorParams};
use crate::error::Result;

/// Collection listing operations for the Slack Web API
///
/// Conversations and users are cursor-paginated and return one page per call;
/// callers drive the cursor. User groups come back in a single response.
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// List one page of conversations (`conversations.list`)
    async fn list_conversations(
        &self,
        query: &ConversationQuery,
        page: &CursorParams,
    ) -> Result<CursorPage<Conversation>>;

    /// List one page of workspace members (`users.list`)
    async fn list_users(&self, page: &CursorParams) -> Result<CursorPage<User>>;

    /// List user groups (`usergroups.list`)
    async fn list_user_groups(&self, query: &UserGroupQuery) -> Result<Vec<UserGroup>>;
}
