//! Reconciliation of declared Slack state against the live workspace
//!
//! - [`sets`]: set algebra over string lists
//! - [`lookup`]: paginated fetching and name/email/ID resolution
//! - [`upsert`]: user group create-or-update
//! - [`members`]: user group membership
//! - [`state`]: presentation of reconciled results

pub mod lookup;
pub mod members;
pub mod sets;
pub mod state;
pub mod upsert;

pub use lookup::{Resolver, conversation_types};
pub use members::{
    MembershipResult, MembershipSpec, apply_membership, preview_membership, read_membership,
    release_membership,
};
pub use state::{MembershipState, UserGroupState};
pub use upsert::{
    Action, ReconciliationResult, UserGroupPlan, UserGroupSpec, disable_user_group,
    preview_user_group, read_user_group, read_user_group_by_name, reconcile_user_group,
    update_user_group,
};
