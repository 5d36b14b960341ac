//! Mock Slack API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls. User groups and profiles are stateful:
//! writes are visible to later reads, like a small in-memory workspace.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{AuthApi, ListingApi, ProfileApi, UserGroupApi};
use super::fixtures::{test_identity, test_team};
use super::models::{
    AuthIdentity, Conversation, CreateUserGroupRequest, ProfileUpdate, TeamInfo,
    UpdateUserGroupRequest, User, UserGroup, UserGroupQuery, UserProfile,
};
use super::pagination::{ConversationQuery, CursorPage, CursorParams};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockSlackClient::new()
///     .with_conversation_pages(vec![vec![test_channel("C1", "general")], vec![]])
///     .await;
///
/// let page = mock.list_conversations(&ConversationQuery::default(), &CursorParams::first(100)).await?;
/// assert!(page.has_next_page());
/// ```
pub struct MockSlackClient {
    /// Identity returned from auth_test
    identity: Arc<Mutex<AuthIdentity>>,
    /// Workspace returned from team_info
    team: Arc<Mutex<TeamInfo>>,
    /// Conversation pages (page index -> conversations on that page)
    conversation_pages: Arc<Mutex<Vec<Vec<Conversation>>>>,
    /// User pages (page index -> users on that page)
    user_pages: Arc<Mutex<Vec<Vec<User>>>>,
    /// User groups, mutated by the write methods
    user_groups: Arc<Mutex<Vec<UserGroup>>>,
    /// Profiles by user ID, mutated by set_user_profile
    profiles: Arc<Mutex<HashMap<String, UserProfile>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Error to return from one specific method - consumed on first use
    method_errors: Arc<Mutex<HashMap<String, ApiError>>>,
    /// Artificial delay before every call
    latency: Arc<Mutex<Option<Duration>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Default for MockSlackClient {
    fn default() -> Self {
        Self {
            identity: Arc::new(Mutex::new(test_identity())),
            team: Arc::new(Mutex::new(test_team())),
            conversation_pages: Arc::new(Mutex::new(Vec::new())),
            user_pages: Arc::new(Mutex::new(Vec::new())),
            user_groups: Arc::new(Mutex::new(Vec::new())),
            profiles: Arc::new(Mutex::new(HashMap::new())),
            error: Arc::new(Mutex::new(None)),
            method_errors: Arc::new(Mutex::new(HashMap::new())),
            latency: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub auth_test: usize,
    pub team_info: usize,
    pub list_conversations: usize,
    pub list_users: usize,
    pub list_user_groups: usize,
    // User group writes
    pub create_user_group: usize,
    pub update_user_group: usize,
    pub enable_user_group: usize,
    pub disable_user_group: usize,
    pub update_user_group_members: usize,
    // Profiles
    pub get_user_profile: usize,
    pub set_user_profile: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.auth_test
            + self.team_info
            + self.list_conversations
            + self.list_users
            + self.list_user_groups
            + self.create_user_group
            + self.update_user_group
            + self.enable_user_group
            + self.disable_user_group
            + self.update_user_group_members
            + self.get_user_profile
            + self.set_user_profile
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The Web API method called (e.g., "conversations.list")
    pub method: String,
    /// Target user group or user ID, if the method takes one
    pub target: Option<String>,
    /// Cursor sent with a list request
    pub cursor: Option<String>,
    /// Page size sent with a list request
    pub limit: Option<usize>,
    /// Conversation types sent with conversations.list
    pub types: Vec<String>,
}

impl CapturedRequest {
    fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            target: None,
            cursor: None,
            limit: None,
            types: Vec::new(),
        }
    }

    fn target(mut self, target: Option<&str>) -> Self {
        self.target = target.map(str::to_string);
        self
    }

    fn page(mut self, page: &CursorParams) -> Self {
        self.cursor = page.cursor.clone();
        self.limit = page.limit;
        self
    }
}

impl MockSlackClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the identity returned from auth_test.
    pub async fn with_identity(self, identity: AuthIdentity) -> Self {
        *self.identity.lock().await = identity;
        self
    }

    /// Configure conversations returned as a single page.
    pub async fn with_conversations(self, conversations: Vec<Conversation>) -> Self {
        *self.conversation_pages.lock().await = vec![conversations];
        self
    }

    /// Configure paginated conversation responses.
    /// Page 0 returns pages[0], page 1 returns pages[1], etc.
    pub async fn with_conversation_pages(self, pages: Vec<Vec<Conversation>>) -> Self {
        *self.conversation_pages.lock().await = pages;
        self
    }

    /// Configure users returned as a single page.
    pub async fn with_users(self, users: Vec<User>) -> Self {
        *self.user_pages.lock().await = vec![users];
        self
    }

    /// Configure paginated user responses.
    pub async fn with_user_pages(self, pages: Vec<Vec<User>>) -> Self {
        *self.user_pages.lock().await = pages;
        self
    }

    /// Configure the workspace's user groups.
    pub async fn with_user_groups(self, groups: Vec<UserGroup>) -> Self {
        *self.user_groups.lock().await = groups;
        self
    }

    /// Configure a stored profile for a user.
    pub async fn with_profile(self, user_id: &str, profile: UserProfile) -> Self {
        self.profiles
            .lock()
            .await
            .insert(user_id.to_string(), profile);
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Configure an error for the next call of one Web API method
    /// (e.g. `"usergroups.enable"`). Consumed after one use.
    pub async fn with_error_on(self, method: &str, error: ApiError) -> Self {
        self.method_errors
            .lock()
            .await
            .insert(method.to_string(), error);
        self
    }

    /// Delay every call by the given duration.
    pub async fn with_latency(self, latency: Duration) -> Self {
        *self.latency.lock().await = Some(latency);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Current user groups, including writes made through the mock.
    pub async fn user_groups(&self) -> Vec<UserGroup> {
        self.user_groups.lock().await.clone()
    }

    /// Record the request, apply latency and return any pending error.
    async fn begin(&self, request: CapturedRequest) -> Result<()> {
        let method = request.method.clone();
        self.captured_requests.lock().await.push(request);

        let latency = *self.latency.lock().await;
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }

        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        if let Some(e) = self.method_errors.lock().await.remove(&method) {
            return Err(e.into());
        }

        Ok(())
    }

    async fn self_id(&self) -> String {
        self.identity.lock().await.user_id.clone()
    }

    fn page_of<T: Clone>(pages: &[Vec<T>], cursor: Option<&str>) -> Result<CursorPage<T>> {
        let index = match cursor {
            None => 0,
            Some(c) => c
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| ApiError::BadRequest(format!("invalid_cursor: {}", c)))?,
        };

        let items = pages.get(index).cloned().unwrap_or_default();
        let next = if index + 1 < pages.len() {
            format!("page-{}", index + 1)
        } else {
            String::new()
        };
        Ok(CursorPage::new(items, next))
    }

    fn group_mut<'a>(groups: &'a mut [UserGroup], id: &str) -> Result<&'a mut UserGroup> {
        groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("no_such_subteam: {}", id)).into())
    }
}

/// The `conversations.list` type a conversation belongs to.
fn conversation_type(conversation: &Conversation) -> &'static str {
    if conversation.is_im {
        "im"
    } else if conversation.is_mpim {
        "mpim"
    } else if conversation.is_private {
        "private_channel"
    } else {
        "public_channel"
    }
}

// ============================================================================
// AuthApi Implementation
// ============================================================================

#[async_trait]
impl AuthApi for MockSlackClient {
    async fn auth_test(&self) -> Result<AuthIdentity> {
        self.begin(CapturedRequest::new("auth.test")).await?;
        self.call_count.lock().await.auth_test += 1;

        Ok(self.identity.lock().await.clone())
    }

    async fn team_info(&self) -> Result<TeamInfo> {
        self.begin(CapturedRequest::new("team.info")).await?;
        self.call_count.lock().await.team_info += 1;

        Ok(self.team.lock().await.clone())
    }
}

// ============================================================================
// ListingApi Implementation
// ============================================================================

#[async_trait]
impl ListingApi for MockSlackClient {
    async fn list_conversations(
        &self,
        query: &ConversationQuery,
        page: &CursorParams,
    ) -> Result<CursorPage<Conversation>> {
        let mut request = CapturedRequest::new("conversations.list").page(page);
        request.types = query.types.clone();
        self.begin(request).await?;
        self.call_count.lock().await.list_conversations += 1;

        let pages = self.conversation_pages.lock().await;
        let mut result = Self::page_of(&pages, page.cursor.as_deref())?;
        result.items.retain(|c| {
            query.types.iter().any(|t| t == conversation_type(c))
                && !(query.exclude_archived && c.is_archived)
        });
        Ok(result)
    }

    async fn list_users(&self, page: &CursorParams) -> Result<CursorPage<User>> {
        self.begin(CapturedRequest::new("users.list").page(page))
            .await?;
        self.call_count.lock().await.list_users += 1;

        let pages = self.user_pages.lock().await;
        Self::page_of(&pages, page.cursor.as_deref())
    }

    async fn list_user_groups(&self, query: &UserGroupQuery) -> Result<Vec<UserGroup>> {
        let request = CapturedRequest::new("usergroups.list").target(query.team_id.as_deref());
        self.begin(request).await?;
        self.call_count.lock().await.list_user_groups += 1;

        let groups = self.user_groups.lock().await;
        Ok(groups
            .iter()
            .filter(|g| query.include_disabled || !g.is_disabled())
            .cloned()
            .map(|mut g| {
                if !query.include_users {
                    g.users.clear();
                }
                if !query.include_count {
                    g.user_count = 0;
                }
                g
            })
            .collect())
    }
}

// ============================================================================
// UserGroupApi Implementation
// ============================================================================

#[async_trait]
impl UserGroupApi for MockSlackClient {
    async fn create_user_group(&self, request: CreateUserGroupRequest) -> Result<UserGroup> {
        self.begin(CapturedRequest::new("usergroups.create")).await?;
        self.call_count.lock().await.create_user_group += 1;

        let creator = self.self_id().await;
        let mut groups = self.user_groups.lock().await;
        if groups.iter().any(|g| g.name == request.name) {
            return Err(ApiError::BadRequest("usergroups.create: name_already_exists".into()).into());
        }

        let team_id = match request.team_id {
            Some(id) => id,
            None => self.team.lock().await.id.clone(),
        };
        let group = UserGroup {
            id: format!("S{:03}", groups.len() + 1),
            team_id,
            is_usergroup: true,
            name: request.name,
            description: request.description.unwrap_or_default(),
            handle: request.handle.unwrap_or_default(),
            auto_type: request.auto_type.unwrap_or_default(),
            created_by: creator.clone(),
            updated_by: creator,
            prefs: super::models::usergroup::UserGroupPrefs {
                channels: request.channels,
                groups: Vec::new(),
            },
            ..Default::default()
        };
        groups.push(group.clone());

        Ok(group)
    }

    async fn update_user_group(&self, request: UpdateUserGroupRequest) -> Result<UserGroup> {
        let captured =
            CapturedRequest::new("usergroups.update").target(Some(request.usergroup.as_str()));
        self.begin(captured).await?;
        self.call_count.lock().await.update_user_group += 1;

        let mut groups = self.user_groups.lock().await;
        let group = Self::group_mut(&mut groups, &request.usergroup)?;

        if let Some(name) = request.name {
            group.name = name;
        }
        if let Some(handle) = request.handle {
            group.handle = handle;
        }
        if let Some(description) = request.description {
            group.description = description;
        }
        if let Some(channels) = request.channels {
            group.prefs.channels = channels;
        }

        Ok(group.clone())
    }

    async fn enable_user_group(&self, usergroup_id: &str) -> Result<UserGroup> {
        self.begin(CapturedRequest::new("usergroups.enable").target(Some(usergroup_id)))
            .await?;
        self.call_count.lock().await.enable_user_group += 1;

        let mut groups = self.user_groups.lock().await;
        let group = Self::group_mut(&mut groups, usergroup_id)?;
        group.deleted_by.clear();
        group.date_delete = 0;

        Ok(group.clone())
    }

    async fn disable_user_group(&self, usergroup_id: &str) -> Result<UserGroup> {
        self.begin(CapturedRequest::new("usergroups.disable").target(Some(usergroup_id)))
            .await?;
        self.call_count.lock().await.disable_user_group += 1;

        let actor = self.self_id().await;
        let mut groups = self.user_groups.lock().await;
        let group = Self::group_mut(&mut groups, usergroup_id)?;
        group.deleted_by = actor;
        group.date_delete = 1_700_000_000;

        Ok(group.clone())
    }

    async fn update_user_group_members(
        &self,
        usergroup_id: &str,
        user_ids: &[String],
    ) -> Result<UserGroup> {
        let request = CapturedRequest::new("usergroups.users.update").target(Some(usergroup_id));
        self.begin(request).await?;
        self.call_count.lock().await.update_user_group_members += 1;

        if user_ids.is_empty() {
            return Err(ApiError::BadRequest("usergroups.users.update: no_users_provided".into()).into());
        }

        let mut groups = self.user_groups.lock().await;
        let group = Self::group_mut(&mut groups, usergroup_id)?;
        group.users = user_ids.to_vec();
        group.user_count = user_ids.len() as i64;

        Ok(group.clone())
    }
}

// ============================================================================
// ProfileApi Implementation
// ============================================================================

#[async_trait]
impl ProfileApi for MockSlackClient {
    async fn get_user_profile(&self, user_id: Option<&str>) -> Result<UserProfile> {
        self.begin(CapturedRequest::new("users.profile.get").target(user_id))
            .await?;
        self.call_count.lock().await.get_user_profile += 1;

        let id = match user_id {
            Some(id) => id.to_string(),
            None => self.self_id().await,
        };
        self.profiles
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("users.profile.get: user_not_found ({})", id)).into())
    }

    async fn set_user_profile(
        &self,
        user_id: Option<&str>,
        update: &ProfileUpdate,
    ) -> Result<UserProfile> {
        self.begin(CapturedRequest::new("users.profile.set").target(user_id))
            .await?;
        self.call_count.lock().await.set_user_profile += 1;

        let id = match user_id {
            Some(id) => id.to_string(),
            None => self.self_id().await,
        };
        let mut profiles = self.profiles.lock().await;
        let profile = profiles.entry(id).or_default();

        if let Some(real_name) = &update.real_name {
            profile.real_name = real_name.clone();
            profile.real_name_normalized = real_name.clone();
        }
        if let Some(text) = &update.status_text {
            profile.status_text = text.clone();
        }
        if let Some(emoji) = &update.status_emoji {
            profile.status_emoji = emoji.clone();
        }
        if let Some(expiration) = update.status_expiration {
            profile.status_expiration = expiration;
        }

        Ok(profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockSlackClient::new();

        let page = mock
            .list_conversations(&ConversationQuery::default(), &CursorParams::first(100))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_next_page());

        let groups = mock.list_user_groups(&UserGroupQuery::complete()).await.unwrap();
        assert!(groups.is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_conversation_pages() {
        let mock = MockSlackClient::new()
            .with_conversation_pages(vec![
                vec![test_channel("C1", "general")],
                vec![test_channel("C2", "random")],
            ])
            .await;
        let query = ConversationQuery::default();

        let first = mock
            .list_conversations(&query, &CursorParams::first(1))
            .await
            .unwrap();
        assert_eq!(first.items[0].id, "C1");
        let cursor = first.next_cursor.clone().unwrap();

        let second = mock
            .list_conversations(&query, &CursorParams::first(1).next(cursor))
            .await
            .unwrap();
        assert_eq!(second.items[0].id, "C2");
        assert!(!second.has_next_page());
    }

    #[tokio::test]
    async fn test_mock_client_filters_conversation_types() {
        let mock = MockSlackClient::new()
            .with_conversations(vec![
                test_channel("C1", "general"),
                ConversationBuilder::new("G1").name("secret").private().build(),
                ConversationBuilder::new("D1").im().build(),
            ])
            .await;

        let public = mock
            .list_conversations(&ConversationQuery::default(), &CursorParams::first(10))
            .await
            .unwrap();
        assert_eq!(public.items.len(), 1);

        let both = mock
            .list_conversations(
                &ConversationQuery::types(["public_channel", "private_channel"]),
                &CursorParams::first(10),
            )
            .await
            .unwrap();
        assert_eq!(both.items.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_client_with_error() {
        let mock = MockSlackClient::new()
            .with_error(ApiError::Unauthorized)
            .await;

        let result = mock.auth_test().await;
        assert!(matches!(result, Err(Error::Api(ApiError::Unauthorized))));

        // Error is consumed
        assert!(mock.auth_test().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_error_on_method() {
        let mock = MockSlackClient::new()
            .with_user_groups(vec![test_group("S1", "Ops")])
            .await
            .with_error_on("usergroups.enable", ApiError::ServerError("boom".into()))
            .await;

        // Other methods are unaffected
        assert!(mock.list_user_groups(&UserGroupQuery::complete()).await.is_ok());
        assert!(mock.enable_user_group("S1").await.is_err());
        assert!(mock.enable_user_group("S1").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_call_counts() {
        let mock = MockSlackClient::new();

        mock.auth_test().await.unwrap();
        mock.team_info().await.unwrap();
        mock.list_users(&CursorParams::first(10)).await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.auth_test, 1);
        assert_eq!(counts.team_info, 1);
        assert_eq!(counts.list_users, 1);
        assert_eq!(counts.total(), 3);
    }

    #[tokio::test]
    async fn test_mock_client_captured_requests() {
        let mock = MockSlackClient::new();
        mock.list_users(&CursorParams::first(25)).await.unwrap();

        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "users.list");
        assert_eq!(requests[0].limit, Some(25));
        assert!(requests[0].cursor.is_none());
    }

    #[tokio::test]
    async fn test_mock_group_lifecycle() {
        let mock = MockSlackClient::new();

        let created = mock
            .create_user_group(CreateUserGroupRequest {
                name: "Ops".to_string(),
                handle: Some("ops".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.team_id, "T000");

        let disabled = mock.disable_user_group(&created.id).await.unwrap();
        assert!(disabled.is_disabled());

        // Disabled groups are hidden unless requested
        let visible = mock
            .list_user_groups(&UserGroupQuery::default())
            .await
            .unwrap();
        assert!(visible.is_empty());

        let enabled = mock.enable_user_group(&created.id).await.unwrap();
        assert!(!enabled.is_disabled());

        let members = mock
            .update_user_group_members(&created.id, &["U1".to_string()])
            .await
            .unwrap();
        assert_eq!(members.user_count, 1);
    }

    #[tokio::test]
    async fn test_mock_duplicate_group_name_rejected() {
        let mock = MockSlackClient::new()
            .with_user_groups(vec![test_group("S1", "Ops")])
            .await;

        let result = mock
            .create_user_group(CreateUserGroupRequest {
                name: "Ops".to_string(),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(Error::Api(ApiError::BadRequest(_)))));
    }

    #[tokio::test]
    async fn test_mock_update_unknown_group() {
        let mock = MockSlackClient::new();
        let result = mock
            .update_user_group(UpdateUserGroupRequest {
                usergroup: "S404".to_string(),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(Error::Api(ApiError::NotFound(_)))));
    }

    #[tokio::test]
    async fn test_mock_profile_set_defaults_to_token_owner() {
        let mock = MockSlackClient::new();

        mock.set_user_profile(None, &ProfileUpdate::real_name("Admin"))
            .await
            .unwrap();

        let profile = mock.get_user_profile(Some("U000")).await.unwrap();
        assert_eq!(profile.real_name, "Admin");
    }
}
