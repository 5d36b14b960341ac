//! Display models for CLI output
//!
//! Converts API and reconciliation types into CLI-friendly rows.

pub mod display;

pub use display::{ConversationDisplay, UserDisplay, UserGroupDisplay};
