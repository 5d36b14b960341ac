//! Slack Web API client
//!
//! The API surface is split into focused traits under [`api`] and combined
//! into [`SlackApi`]. [`SlackClient`] talks HTTP; the test-only
//! `MockSlackClient` serves canned data.

pub mod api;
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod rate_limit;
pub mod slack;

pub use api::{AuthApi, ListingApi, ProfileApi, UserGroupApi};
pub use slack::SlackClient;

/// Full Slack Web API client.
///
/// Implemented automatically for anything implementing every sub-trait.
pub trait SlackApi: AuthApi + ListingApi + UserGroupApi + ProfileApi {}

impl<T> SlackApi for T where T: AuthApi + ListingApi + UserGroupApi + ProfileApi {}
