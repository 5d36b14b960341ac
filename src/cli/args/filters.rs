//! Filter argument types for CLI commands

use clap::Args;

/// Conversation filters shared by `conversation list` and `conversation get`.
#[derive(Args, Debug, Clone, Default)]
pub struct ConversationFilterArgs {
    /// Conversation types to include in addition to public_channel
    /// (private_channel, mpim, im), comma-separated or repeated
    #[arg(long = "type", short = 't', value_delimiter = ',')]
    pub types: Vec<String>,

    /// Leave archived conversations out
    #[arg(long)]
    pub exclude_archived: bool,
}

impl ConversationFilterArgs {
    /// Declared types, or `None` when the flag was not given
    pub fn declared_types(&self) -> Option<&[String]> {
        if self.types.is_empty() {
            None
        } else {
            Some(&self.types)
        }
    }
}
