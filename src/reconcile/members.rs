//! User group membership reconciliation
//!
//! A membership declaration names a group, a default user and any number of
//! additional users, all by email. Applying it replaces the group's members
//! wholesale. The default user keeps the group non-empty: Slack rejects a
//! user group without members, so releasing a membership falls back to the
//! default user alone.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::lookup::Resolver;
use super::sets::{CompareMode, MembershipDelta, compare, merge, remove};
use crate::client::SlackApi;
use crate::client::models::UserGroup;
use crate::error::{Error, Phase, Result};

/// Declared membership of a user group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MembershipSpec {
    /// Name of the user group
    pub usergroup: String,

    /// Email of the member that always stays in the group
    pub default_user: String,

    /// Emails of the other members
    #[serde(default)]
    pub users: Vec<String>,
}

impl MembershipSpec {
    /// All desired member emails, default user included, sorted and deduplicated.
    pub fn desired_emails(&self) -> Result<Vec<String>> {
        if self.usergroup.trim().is_empty() {
            return Err(Error::InvalidInput("usergroup must not be empty".to_string()));
        }
        if self.default_user.trim().is_empty() {
            return Err(Error::InvalidInput(format!(
                "default_user for user group '{}' must not be empty",
                self.usergroup
            )));
        }

        let default = [self.default_user.clone()];
        if compare(Some(&self.users[..]), Some(&default[..]), CompareMode::Any)? {
            return Err(Error::InvalidInput(format!(
                "default user {} must not also be listed in users",
                self.default_user
            )));
        }

        merge(&[Some(&default[..]), Some(&self.users[..])])
    }
}

/// A user group's membership after an operation.
#[derive(Debug, Clone)]
pub struct MembershipResult {
    pub group: UserGroup,
    pub default_user: String,
    /// Every member ID, default user included
    pub member_ids: Vec<String>,
    /// Member emails other than the default user
    pub other_members: Vec<String>,
}

/// What applying a membership would change, by email.
#[derive(Debug, Clone)]
pub struct MembershipPlan {
    pub group: UserGroup,
    pub delta: MembershipDelta,
}

/// Replace the group's members with the declared ones.
pub async fn apply_membership<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    spec: &MembershipSpec,
) -> Result<MembershipResult> {
    let emails = spec
        .desired_emails()
        .map_err(|e| e.in_phase(Phase::Validate))?;

    let ids = resolver
        .user_ids(&emails)
        .await
        .map_err(|e| e.in_phase(Phase::Translate))?;
    if ids.is_empty() {
        return Err(Error::InvalidInput(format!(
            "user group '{}' needs at least one member",
            spec.usergroup
        ))
        .in_phase(Phase::Validate));
    }

    let group = resolver
        .require_user_group(&spec.usergroup)
        .await
        .map_err(|e| e.in_phase(Phase::Lookup))?;

    info!(
        "Setting {} members on user group '{}' ({})",
        ids.len(),
        group.name,
        group.id
    );
    let group = resolver
        .call(resolver.client().update_user_group_members(&group.id, &ids))
        .await
        .map_err(|e| e.in_phase(Phase::Members))?;

    describe(resolver, group, &spec.default_user).await
}

/// Read the group's members, separating out the default user.
pub async fn read_membership<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    usergroup: &str,
    default_user: &str,
) -> Result<MembershipResult> {
    let group = resolver
        .require_user_group(usergroup)
        .await
        .map_err(|e| e.in_phase(Phase::Lookup))?;

    describe(resolver, group, default_user).await
}

/// Reset the group's members to the default user only.
pub async fn release_membership<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    usergroup: &str,
    default_user: &str,
) -> Result<MembershipResult> {
    let ids = resolver
        .user_ids(&[default_user.to_string()])
        .await
        .map_err(|e| e.in_phase(Phase::Translate))?;

    let group = resolver
        .require_user_group(usergroup)
        .await
        .map_err(|e| e.in_phase(Phase::Lookup))?;

    info!(
        "Releasing members of user group '{}' ({}), keeping {}",
        group.name, group.id, default_user
    );
    let group = resolver
        .call(resolver.client().update_user_group_members(&group.id, &ids))
        .await
        .map_err(|e| e.in_phase(Phase::Members))?;

    describe(resolver, group, default_user).await
}

/// Compute what [`apply_membership`] would change without changing anything.
pub async fn preview_membership<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    spec: &MembershipSpec,
) -> Result<MembershipPlan> {
    let desired = spec
        .desired_emails()
        .map_err(|e| e.in_phase(Phase::Validate))?;

    // Unknown emails fail here the same way they would on apply
    resolver
        .user_ids(&desired)
        .await
        .map_err(|e| e.in_phase(Phase::Translate))?;

    let group = resolver
        .require_user_group(&spec.usergroup)
        .await
        .map_err(|e| e.in_phase(Phase::Lookup))?;

    let current = resolver
        .user_emails(&group.users)
        .await
        .map_err(|e| e.in_phase(Phase::Describe))?;

    let delta = MembershipDelta::between(&current, &desired);
    debug!(
        "Membership plan for '{}': +{} -{} ={}",
        group.name,
        delta.to_add.len(),
        delta.to_remove.len(),
        delta.unchanged.len()
    );

    Ok(MembershipPlan { group, delta })
}

async fn describe<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    group: UserGroup,
    default_user: &str,
) -> Result<MembershipResult> {
    let member_ids = group.users.clone();
    let emails = resolver
        .user_emails(&member_ids)
        .await
        .map_err(|e| e.in_phase(Phase::Describe))?;

    let default = [default_user];
    let other_members = remove(Some(&emails[..]), &[Some(&default[..])])
        .map_err(|e| e.in_phase(Phase::Describe))?;

    Ok(MembershipResult {
        group,
        default_user: default_user.to_string(),
        member_ids,
        other_members,
    })
}
