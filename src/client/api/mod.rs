//! API trait definitions split by responsibility
//!
//! This module organizes the Slack Web API surface into focused sub-traits:
//! - [`AuthApi`] - Token identity and workspace info
//! - [`ListingApi`] - Conversation, user and user group listings
//! - [`UserGroupApi`] - User group writes and membership
//! - [`ProfileApi`] - User profile reads and writes
//!
//! The [`SlackApi`](super::SlackApi) super-trait combines all four.

mod auth;
mod listing;
mod profile;
mod usergroup;

pub use auth::AuthApi;
pub use listing::ListingApi;
pub use profile::ProfileApi;
pub use usergroup::UserGroupApi;
