//! Slack Web API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::api::{AuthApi, ListingApi, ProfileApi, UserGroupApi};
use super::models::{
    AuthIdentity, Conversation, CreateUserGroupRequest, ProfileUpdate, TeamInfo,
    UpdateUserGroupRequest, User, UserGroup, UserGroupQuery, UserProfile,
};
use super::pagination::{ConversationQuery, CursorPage, CursorParams, ResponseMetadata};
use super::rate_limit::{MethodTier, RateLimiterSet};
use crate::error::{ApiError, Result};

/// Slack Web API base URL
pub const API_BASE_URL: &str = "https://slack.com/api";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Slack Web API client
pub struct SlackClient {
    http: HttpClient,
    base_url: String,
    token: String,
    rate_limiters: Arc<RateLimiterSet>,
}

/// The `ok`/`error` part every Web API response carries
#[derive(Debug, Deserialize)]
struct Envelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    needed: Option<String>,
}

impl SlackClient {
    /// Create a new client authenticating with the given token
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("slackform/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
            token: token.into(),
            rate_limiters: Arc::new(RateLimiterSet::new()),
        })
    }

    /// Point the client at a different API host (for development/testing)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Call a Web API method and decode the successful response body.
    ///
    /// Parameters are sent form-encoded. Failures are never retried; a 429
    /// only switches on pacing for the method's tier.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let tier = MethodTier::for_method(method);
        self.rate_limiters.wait_for(tier).await;

        let url = format!("{}/{}", self.base_url, method);
        debug!("POST {} ({} params)", method, params.len());

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .form(params)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            s if s.is_success() => {}
            StatusCode::TOO_MANY_REQUESTS => {
                self.rate_limiters.activate(tier).await;
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into());
            }
            StatusCode::UNAUTHORIZED => return Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => return Err(ApiError::Forbidden(method.to_string()).into()),
            StatusCode::NOT_FOUND => {
                return Err(ApiError::NotFound(format!("Unknown API method: {}", method)).into());
            }
            s if s.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", s));
                return Err(ApiError::ServerError(error_msg).into());
            }
            s => {
                return Err(
                    ApiError::InvalidResponse(format!("Unexpected status code: {}", s)).into(),
                );
            }
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse {} response: {}", method, e))
        })?;

        let envelope = Envelope::deserialize(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("Missing ok flag in {} response: {}", method, e))
        })?;

        if !envelope.ok {
            let code = envelope.error.as_deref().unwrap_or("unknown_error");
            let err = ApiError::from_slack_code(method, code, envelope.needed.as_deref());
            if matches!(err, ApiError::RateLimit(_)) {
                self.rate_limiters.activate(tier).await;
            }
            return Err(err.into());
        }

        T::deserialize(body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse {} response: {}", method, e)).into()
        })
    }
}

fn flag(value: bool) -> String {
    value.to_string()
}

#[async_trait]
impl AuthApi for SlackClient {
    async fn auth_test(&self) -> Result<AuthIdentity> {
        self.call("auth.test", &[]).await
    }

    async fn team_info(&self) -> Result<TeamInfo> {
        #[derive(Deserialize)]
        struct TeamResponse {
            team: TeamInfo,
        }

        let response: TeamResponse = self.call("team.info", &[]).await?;
        Ok(response.team)
    }
}

#[async_trait]
impl ListingApi for SlackClient {
    async fn list_conversations(
        &self,
        query: &ConversationQuery,
        page: &CursorParams,
    ) -> Result<CursorPage<Conversation>> {
        #[derive(Deserialize)]
        struct ConversationsResponse {
            #[serde(default)]
            channels: Vec<Conversation>,
            #[serde(default)]
            response_metadata: ResponseMetadata,
        }

        let mut params = query.to_query_params();
        params.extend(page.to_query_params());

        let response: ConversationsResponse = self.call("conversations.list", &params).await?;
        Ok(CursorPage::new(
            response.channels,
            response.response_metadata.next_cursor,
        ))
    }

    async fn list_users(&self, page: &CursorParams) -> Result<CursorPage<User>> {
        #[derive(Deserialize)]
        struct UsersResponse {
            #[serde(default)]
            members: Vec<User>,
            #[serde(default)]
            response_metadata: ResponseMetadata,
        }

        let response: UsersResponse = self.call("users.list", &page.to_query_params()).await?;
        Ok(CursorPage::new(
            response.members,
            response.response_metadata.next_cursor,
        ))
    }

    async fn list_user_groups(&self, query: &UserGroupQuery) -> Result<Vec<UserGroup>> {
        #[derive(Deserialize)]
        struct UserGroupsResponse {
            #[serde(default)]
            usergroups: Vec<UserGroup>,
        }

        let mut params = vec![
            ("include_users", flag(query.include_users)),
            ("include_count", flag(query.include_count)),
            ("include_disabled", flag(query.include_disabled)),
        ];
        if let Some(team_id) = &query.team_id {
            params.push(("team_id", team_id.clone()));
        }

        let response: UserGroupsResponse = self.call("usergroups.list", &params).await?;
        Ok(response.usergroups)
    }
}

#[derive(Deserialize)]
struct UserGroupResponse {
    usergroup: UserGroup,
}

#[async_trait]
impl UserGroupApi for SlackClient {
    async fn create_user_group(&self, request: CreateUserGroupRequest) -> Result<UserGroup> {
        let mut params = vec![("name", request.name), ("include_count", flag(true))];
        if let Some(handle) = request.handle {
            params.push(("handle", handle));
        }
        if let Some(description) = request.description {
            params.push(("description", description));
        }
        if !request.channels.is_empty() {
            params.push(("channels", request.channels.join(",")));
        }
        if let Some(team_id) = request.team_id {
            params.push(("team_id", team_id));
        }
        if let Some(auto_type) = request.auto_type {
            params.push(("auto_type", auto_type));
        }

        let response: UserGroupResponse = self.call("usergroups.create", &params).await?;
        Ok(response.usergroup)
    }

    async fn update_user_group(&self, request: UpdateUserGroupRequest) -> Result<UserGroup> {
        let mut params = vec![
            ("usergroup", request.usergroup),
            ("include_count", flag(true)),
        ];
        if let Some(name) = request.name {
            params.push(("name", name));
        }
        if let Some(handle) = request.handle {
            params.push(("handle", handle));
        }
        if let Some(description) = request.description {
            params.push(("description", description));
        }
        if let Some(channels) = request.channels {
            params.push(("channels", channels.join(",")));
        }

        let response: UserGroupResponse = self.call("usergroups.update", &params).await?;
        Ok(response.usergroup)
    }

    async fn enable_user_group(&self, usergroup_id: &str) -> Result<UserGroup> {
        let params = [
            ("usergroup", usergroup_id.to_string()),
            ("include_count", flag(true)),
        ];
        let response: UserGroupResponse = self.call("usergroups.enable", &params).await?;
        Ok(response.usergroup)
    }

    async fn disable_user_group(&self, usergroup_id: &str) -> Result<UserGroup> {
        let params = [
            ("usergroup", usergroup_id.to_string()),
            ("include_count", flag(true)),
        ];
        let response: UserGroupResponse = self.call("usergroups.disable", &params).await?;
        Ok(response.usergroup)
    }

    async fn update_user_group_members(
        &self,
        usergroup_id: &str,
        user_ids: &[String],
    ) -> Result<UserGroup> {
        let params = [
            ("usergroup", usergroup_id.to_string()),
            ("users", user_ids.join(",")),
            ("include_count", flag(true)),
        ];
        let response: UserGroupResponse = self.call("usergroups.users.update", &params).await?;
        Ok(response.usergroup)
    }
}

#[derive(Deserialize)]
struct ProfileResponse {
    profile: UserProfile,
}

#[async_trait]
impl ProfileApi for SlackClient {
    async fn get_user_profile(&self, user_id: Option<&str>) -> Result<UserProfile> {
        let mut params = Vec::new();
        if let Some(user) = user_id {
            params.push(("user", user.to_string()));
        }

        let response: ProfileResponse = self.call("users.profile.get", &params).await?;
        Ok(response.profile)
    }

    async fn set_user_profile(
        &self,
        user_id: Option<&str>,
        update: &ProfileUpdate,
    ) -> Result<UserProfile> {
        let mut params = vec![("profile", serde_json::to_string(update)?)];
        if let Some(user) = user_id {
            params.push(("user", user.to_string()));
        }

        let response: ProfileResponse = self.call("users.profile.set", &params).await?;
        Ok(response.profile)
    }
}
