//! Presentation state for reconciled entities
//!
//! Reconciliation works with plain values; this is where "absent" becomes
//! `null`. Empty `auto_type`, member lists of an empty group and undeclared
//! or empty channel lists all serialize as `null`.

use serde::Serialize;

use super::members::MembershipResult;
use super::upsert::ReconciliationResult;

/// A reconciled user group as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserGroupState {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub handle: String,
    pub description: String,
    /// Workspace-managed group type (`admin`, `owner`), `null` for regular groups
    pub auto_type: Option<String>,
    /// Default channel names
    pub channels: Option<Vec<String>>,
    pub user_count: i64,
    pub users_id: Option<Vec<String>>,
    pub users_email: Option<Vec<String>>,
    pub enabled: bool,
}

impl From<&ReconciliationResult> for UserGroupState {
    fn from(result: &ReconciliationResult) -> Self {
        let group = &result.group;
        let has_members = group.user_count != 0;

        Self {
            id: group.id.clone(),
            team_id: group.team_id.clone(),
            name: group.name.clone(),
            handle: group.handle.clone(),
            description: group.description.clone(),
            auto_type: (!group.auto_type.is_empty()).then(|| group.auto_type.clone()),
            channels: (result.channels_declared && !result.channel_names.is_empty())
                .then(|| result.channel_names.clone()),
            user_count: group.user_count,
            users_id: has_members.then(|| result.member_ids.clone()),
            users_email: has_members.then(|| result.member_emails.clone()),
            enabled: !group.is_disabled(),
        }
    }
}

/// A user group's membership as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipState {
    pub usergroup: String,
    pub usergroup_id: String,
    pub default_user: String,
    /// Members besides the default user, `null` when there are none
    pub users: Option<Vec<String>>,
}

impl From<&MembershipResult> for MembershipState {
    fn from(result: &MembershipResult) -> Self {
        Self {
            usergroup: result.group.name.clone(),
            usergroup_id: result.group.id.clone(),
            default_user: result.default_user.clone(),
            users: (!result.other_members.is_empty()).then(|| result.other_members.clone()),
        }
    }
}
