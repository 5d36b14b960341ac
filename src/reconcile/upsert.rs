//! Reconciling upsert controller for user groups
//!
//! A user group is keyed by its name. Reconciling a declaration looks the
//! name up among all groups (disabled ones included), creates the group when
//! it is missing, and otherwise re-enables it if needed and updates it in
//! place. Every run starts from a fresh listing, so running it again after a
//! failure is safe.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::lookup::Resolver;
use super::sets::set_eq;
use crate::client::SlackApi;
use crate::client::models::{CreateUserGroupRequest, UpdateUserGroupRequest, UserGroup};
use crate::error::{Error, Phase, Result};

/// Declared attributes of a user group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserGroupSpec {
    /// Group name (the reconciliation key)
    pub name: String,

    /// Mention handle, without the `@`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default channel names. Omit to leave channels alone; an empty list is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,

    /// Workspace ID. Read from the token's workspace when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,

    /// Workspace-managed type (`admin`, `owner`). Applied only when the group is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_type: Option<String>,
}

impl UserGroupSpec {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("user group name must not be empty".to_string()));
        }
        if matches!(&self.channels, Some(channels) if channels.is_empty()) {
            return Err(Error::InvalidInput(format!(
                "channels for user group '{}' must not be empty when declared; omit it instead",
                self.name
            )));
        }
        Ok(())
    }
}

/// What reconciliation did to the remote group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Created,
    Updated {
        /// The group was disabled and has been enabled first
        reenabled: bool,
    },
    Read,
    Disabled,
}

/// Outcome of a user group operation, with member and channel references
/// resolved both ways.
#[derive(Debug, Clone)]
pub struct ReconciliationResult {
    pub action: Action,
    /// The group as last returned by the API
    pub group: UserGroup,
    /// Whether channels were part of the declaration
    pub channels_declared: bool,
    pub channel_ids: Vec<String>,
    pub channel_names: Vec<String>,
    pub member_ids: Vec<String>,
    pub member_emails: Vec<String>,
}

impl ReconciliationResult {
    pub fn id(&self) -> &str {
        &self.group.id
    }
}

/// Create or update the user group named in `spec`.
pub async fn reconcile_user_group<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    spec: &UserGroupSpec,
) -> Result<ReconciliationResult> {
    spec.validate().map_err(|e| e.in_phase(Phase::Validate))?;

    let channel_ids = translate_channels(resolver, spec).await?;

    let team_id = resolve_team(resolver, spec).await?;

    let existing = resolver
        .user_group_by_name(&spec.name, Some(&team_id))
        .await
        .map_err(|e| e.in_phase(Phase::Lookup))?;

    let (action, group) = match existing {
        None => {
            info!("Creating user group '{}'", spec.name);
            let request = CreateUserGroupRequest {
                name: spec.name.clone(),
                handle: spec.handle.clone(),
                description: spec.description.clone(),
                channels: channel_ids.unwrap_or_default(),
                team_id: Some(team_id),
                auto_type: spec.auto_type.clone(),
            };
            let group = resolver
                .call(resolver.client().create_user_group(request))
                .await
                .map_err(|e| e.in_phase(Phase::Create))?;
            (Action::Created, group)
        }
        Some(current) => {
            let reenabled = current.is_disabled();
            if reenabled {
                info!("Enabling disabled user group '{}' ({})", current.name, current.id);
                resolver
                    .call(resolver.client().enable_user_group(&current.id))
                    .await
                    .map_err(|e| e.in_phase(Phase::Enable))?;
            }

            info!("Updating user group '{}' ({})", current.name, current.id);
            let group = update_by_id(resolver, &current.id, spec, channel_ids).await?;
            (Action::Updated { reenabled }, group)
        }
    };

    describe(resolver, action, group, spec.channels.is_some()).await
}

/// The declared workspace, or the token's own when none is declared.
async fn resolve_team<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    spec: &UserGroupSpec,
) -> Result<String> {
    if let Some(id) = &spec.team_id {
        return Ok(id.clone());
    }
    let team = resolver
        .call(resolver.client().team_info())
        .await
        .map_err(|e| e.in_phase(Phase::Team))?;
    debug!("Using workspace {} for user group '{}'", team.id, spec.name);
    Ok(team.id)
}

/// What [`reconcile_user_group`] would do, computed without writing.
#[derive(Debug, Clone)]
pub struct UserGroupPlan {
    /// The group that would be updated; `None` means it would be created
    pub existing: Option<UserGroup>,
    /// Declared channels as IDs
    pub channel_ids: Option<Vec<String>>,
}

impl UserGroupPlan {
    pub fn creates(&self) -> bool {
        self.existing.is_none()
    }

    pub fn reenables(&self) -> bool {
        self.existing.as_ref().is_some_and(UserGroup::is_disabled)
    }
}

/// Validate and resolve `spec` the way reconciliation would, without writing.
pub async fn preview_user_group<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    spec: &UserGroupSpec,
) -> Result<UserGroupPlan> {
    spec.validate().map_err(|e| e.in_phase(Phase::Validate))?;

    let channel_ids = translate_channels(resolver, spec).await?;

    let team_id = resolve_team(resolver, spec).await?;

    let existing = resolver
        .user_group_by_name(&spec.name, Some(&team_id))
        .await
        .map_err(|e| e.in_phase(Phase::Lookup))?;

    Ok(UserGroupPlan {
        existing,
        channel_ids,
    })
}

/// Read a user group by ID.
pub async fn read_user_group<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    id: &str,
) -> Result<ReconciliationResult> {
    let group = resolver
        .user_group_by_id(id)
        .await
        .map_err(|e| e.in_phase(Phase::Lookup))?;

    describe(resolver, Action::Read, group, true).await
}

/// Read a user group by name, disabled groups included.
pub async fn read_user_group_by_name<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    name: &str,
) -> Result<ReconciliationResult> {
    let group = resolver
        .require_user_group(name)
        .await
        .map_err(|e| e.in_phase(Phase::Lookup))?;

    describe(resolver, Action::Read, group, true).await
}

/// Update a user group by ID with the declared attributes.
pub async fn update_user_group<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    id: &str,
    spec: &UserGroupSpec,
) -> Result<ReconciliationResult> {
    spec.validate().map_err(|e| e.in_phase(Phase::Validate))?;

    let channel_ids = translate_channels(resolver, spec).await?;

    info!("Updating user group '{}' ({})", spec.name, id);
    let group = update_by_id(resolver, id, spec, channel_ids).await?;

    describe(
        resolver,
        Action::Updated { reenabled: false },
        group,
        spec.channels.is_some(),
    )
    .await
}

/// Disable a user group. Slack has no hard delete for user groups.
pub async fn disable_user_group<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    id: &str,
) -> Result<ReconciliationResult> {
    info!("Disabling user group {}", id);
    let group = resolver
        .call(resolver.client().disable_user_group(id))
        .await
        .map_err(|e| e.in_phase(Phase::Disable))?;

    describe(resolver, Action::Disabled, group, true).await
}

async fn translate_channels<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    spec: &UserGroupSpec,
) -> Result<Option<Vec<String>>> {
    match &spec.channels {
        None => Ok(None),
        Some(names) => resolver
            .channel_ids(names)
            .await
            .map(Some)
            .map_err(|e| e.in_phase(Phase::Translate)),
    }
}

async fn update_by_id<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    id: &str,
    spec: &UserGroupSpec,
    channel_ids: Option<Vec<String>>,
) -> Result<UserGroup> {
    let request = UpdateUserGroupRequest {
        usergroup: id.to_string(),
        name: Some(spec.name.clone()),
        handle: spec.handle.clone(),
        description: spec.description.clone(),
        channels: channel_ids.clone(),
    };

    let group = resolver
        .call(resolver.client().update_user_group(request))
        .await
        .map_err(|e| e.in_phase(Phase::Update))?;

    if let Some(sent) = channel_ids
        && !set_eq(&sent, &group.prefs.channels)
    {
        warn!(
            "User group '{}' reports channels {:?} after update, expected {:?}",
            group.name, group.prefs.channels, sent
        );
    }

    Ok(group)
}

/// Resolve the group's member IDs to emails and channel IDs to names.
async fn describe<C: SlackApi + ?Sized>(
    resolver: &Resolver<'_, C>,
    action: Action,
    group: UserGroup,
    channels_declared: bool,
) -> Result<ReconciliationResult> {
    let describe_err = |e: Error| e.in_phase(Phase::Describe);

    // Write methods report the count but not always the members
    let group = if group.user_count > 0 && group.users.is_empty() {
        debug!("Re-reading members of user group {}", group.id);
        let members = resolver.user_group_by_id(&group.id).await.map_err(describe_err)?;
        UserGroup {
            users: members.users,
            ..group
        }
    } else {
        group
    };

    let member_ids = if group.user_count > 0 {
        group.users.clone()
    } else {
        Vec::new()
    };
    let member_emails = resolver
        .user_emails(&member_ids)
        .await
        .map_err(describe_err)?;

    let channel_ids = if channels_declared {
        group.prefs.channels.clone()
    } else {
        Vec::new()
    };
    let channel_names = resolver
        .channel_names(&channel_ids)
        .await
        .map_err(describe_err)?;

    Ok(ReconciliationResult {
        action,
        group,
        channels_declared,
        channel_ids,
        channel_names,
        member_ids,
        member_emails,
    })
}
