//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{AuthIdentity, TeamInfo};
use crate::error::Result;

/// Identity operations for the Slack Web API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Check the token and return who it belongs to (`auth.test`)
    async fn auth_test(&self) -> Result<AuthIdentity>;

    /// Get the workspace the token belongs to (`team.info`)
    async fn team_info(&self) -> Result<TeamInfo>;
}
