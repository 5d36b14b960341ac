//! Conversation (channel) models

use serde::{Deserialize, Serialize};

/// A channel, private channel, multi-person DM or DM
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation ID
    pub id: String,

    /// Conversation name (empty for DMs)
    #[serde(default)]
    pub name: String,

    /// Normalized name
    #[serde(default)]
    pub name_normalized: String,

    /// Creation time (Unix seconds)
    #[serde(default)]
    pub created: i64,

    /// Creator user ID
    #[serde(default)]
    pub creator: String,

    #[serde(default)]
    pub is_archived: bool,

    #[serde(default)]
    pub is_channel: bool,

    #[serde(default)]
    pub is_ext_shared: bool,

    #[serde(default)]
    pub is_general: bool,

    #[serde(default)]
    pub is_group: bool,

    #[serde(default)]
    pub is_im: bool,

    #[serde(default)]
    pub is_member: bool,

    #[serde(default)]
    pub is_mpim: bool,

    #[serde(default)]
    pub is_org_shared: bool,

    #[serde(default)]
    pub is_pending_ext_shared: bool,

    #[serde(default)]
    pub is_private: bool,

    #[serde(default)]
    pub is_shared: bool,

    /// Member count (only for channels)
    #[serde(default)]
    pub num_members: i64,

    /// Channel purpose
    #[serde(default)]
    pub purpose: TopicOrPurpose,

    /// Channel topic
    #[serde(default)]
    pub topic: TopicOrPurpose,

    #[serde(default)]
    pub unlinked: i64,
}

/// Topic or purpose text with its author
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicOrPurpose {
    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub creator: String,

    /// When it was last set (Unix seconds)
    #[serde(default)]
    pub last_set: i64,
}

/// Conversation types accepted by `conversations.list`
pub const CONVERSATION_TYPES: [&str; 4] = ["public_channel", "private_channel", "mpim", "im"];
