//! Conversation display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Conversation;
use crate::output::formatters::{format_iso, truncate};

/// Shown when a channel has no purpose set
pub const NO_PURPOSE: &str = "No Purpose";

/// Shown when a channel has no topic set
pub const NO_TOPIC: &str = "No Topic";

/// Conversation display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ConversationDisplay {
    #[tabled(rename = "CHANNEL ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// public_channel, private_channel, mpim or im
    #[tabled(rename = "TYPE")]
    #[serde(rename = "type")]
    pub kind: String,

    #[tabled(rename = "MEMBERS")]
    pub members: i64,

    #[tabled(rename = "ARCHIVED")]
    pub archived: bool,

    #[tabled(rename = "TOPIC")]
    pub topic: String,

    #[tabled(rename = "PURPOSE")]
    pub purpose: String,

    #[tabled(skip)]
    pub creator: String,

    #[tabled(skip)]
    pub created: String,
}

impl ConversationDisplay {
    /// Full topic and purpose instead of the table-width excerpts
    pub fn untruncated(conversation: &Conversation) -> Self {
        Self {
            topic: text_or(&conversation.topic.value, NO_TOPIC),
            purpose: text_or(&conversation.purpose.value, NO_PURPOSE),
            ..Self::from(conversation)
        }
    }
}

fn text_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn kind(conversation: &Conversation) -> &'static str {
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

impl From<&Conversation> for ConversationDisplay {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.clone(),
            name: conversation.name.clone(),
            kind: kind(conversation).to_string(),
            members: conversation.num_members,
            archived: conversation.is_archived,
            topic: truncate(&text_or(&conversation.topic.value, NO_TOPIC), 40),
            purpose: truncate(&text_or(&conversation.purpose.value, NO_PURPOSE), 40),
            creator: conversation.creator.clone(),
            created: format_iso(conversation.created),
        }
    }
}

impl From<Conversation> for ConversationDisplay {
    fn from(conversation: Conversation) -> Self {
        ConversationDisplay::from(&conversation)
    }
}
