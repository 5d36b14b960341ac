//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod conversation;
mod user;
mod usergroup;

pub use conversation::ConversationDisplay;
pub use user::UserDisplay;
pub use usergroup::UserGroupDisplay;
