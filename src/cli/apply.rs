//! Declarative apply of a workspace manifest
//!
//! A manifest lists user groups and memberships in YAML. Groups are applied
//! first, in file order, so memberships can refer to groups created in the
//! same run. The first failure stops the run; entries already applied stay
//! applied and a rerun picks up from there.

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::cli::args::GlobalOptions;
use crate::cli::member::{delta_json, print_delta};
use crate::cli::{CommandContext, OutputFormat};
use crate::error::{Error, Result};
use crate::output::json::{JsonOutput, print_json};
use crate::reconcile::{
    Action, MembershipSpec, MembershipState, UserGroupSpec, UserGroupState, apply_membership,
    preview_membership, preview_user_group, reconcile_user_group,
};

/// Declared workspace state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub user_groups: Vec<UserGroupSpec>,

    #[serde(default)]
    pub memberships: Vec<MembershipSpec>,
}

impl Manifest {
    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
            .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))
    }

    /// Parse a manifest from YAML
    pub fn parse(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    pub fn len(&self) -> usize {
        self.user_groups.len() + self.memberships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Results of an apply run, as printed with `--format json`
#[derive(Debug, Default, Serialize)]
struct ApplyReport {
    user_groups: Vec<UserGroupState>,
    memberships: Vec<MembershipState>,
}

fn progress_bar(total: usize, format: OutputFormat) -> ProgressBar {
    if format == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn stop(bar: &ProgressBar, err: &Error) {
    if err.is_cancelled() {
        bar.abandon_with_message("interrupted");
    } else {
        bar.abandon();
    }
}

/// Run the apply command
pub async fn run(
    opts: &GlobalOptions,
    cancel: CancellationToken,
    file: &Path,
    dry_run: bool,
) -> Result<()> {
    let manifest = Manifest::load(file)?;
    if manifest.is_empty() {
        eprintln!("Nothing to apply in {}", file.display());
        return Ok(());
    }

    let ctx = CommandContext::new(opts, cancel)?;

    if dry_run {
        return preview(&ctx, &manifest).await;
    }

    info!(
        "Applying {} user group(s) and {} membership(s) from {}",
        manifest.user_groups.len(),
        manifest.memberships.len(),
        file.display()
    );

    let resolver = ctx.resolver();
    let bar = progress_bar(manifest.len(), ctx.format);
    let mut report = ApplyReport::default();

    for spec in &manifest.user_groups {
        bar.set_message(format!("user group {}", spec.name));
        let result = reconcile_user_group(&resolver, spec)
            .await
            .inspect_err(|e| stop(&bar, e))?;

        let verb = match result.action {
            Action::Created => "created",
            Action::Updated { reenabled: true } => "re-enabled",
            _ => "updated",
        };
        bar.println(format!(
            "{} user group \"{}\" {} ({})",
            "✓".green(),
            result.group.name,
            verb,
            result.id()
        ));
        report.user_groups.push(UserGroupState::from(&result));
        bar.inc(1);
    }

    for spec in &manifest.memberships {
        bar.set_message(format!("members of {}", spec.usergroup));
        let result = apply_membership(&resolver, spec)
            .await
            .inspect_err(|e| stop(&bar, e))?;

        bar.println(format!(
            "{} membership of \"{}\" set ({} member(s))",
            "✓".green(),
            result.group.name,
            result.member_ids.len()
        ));
        report.memberships.push(MembershipState::from(&result));
        bar.inc(1);
    }

    bar.finish_and_clear();

    match ctx.format {
        OutputFormat::Json => print_json(&report)?,
        _ => eprintln!(
            "{} Applied {} user group(s) and {} membership(s)",
            "✓".green(),
            report.user_groups.len(),
            report.memberships.len()
        ),
    }

    Ok(())
}

async fn preview(ctx: &CommandContext, manifest: &Manifest) -> Result<()> {
    let resolver = ctx.resolver();
    let json = ctx.format == OutputFormat::Json;
    let mut planned = Vec::new();

    if !json {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
    }

    for spec in &manifest.user_groups {
        let plan = preview_user_group(&resolver, spec).await?;
        let action = match (&plan.existing, plan.reenables()) {
            (None, _) => "create",
            (Some(_), true) => "re-enable and update",
            (Some(_), false) => "update",
        };
        if !json {
            eprintln!("Would {} user group: {}", action, spec.name.bold());
        }
        planned.push(serde_json::json!({
            "kind": "user_group",
            "name": spec.name,
            "action": action,
        }));
    }

    // Groups created in this run do not exist yet; their memberships cannot be previewed
    let creating: Vec<&str> = manifest
        .user_groups
        .iter()
        .map(|g| g.name.as_str())
        .collect();

    for spec in &manifest.memberships {
        let plan = match preview_membership(&resolver, spec).await {
            Ok(plan) => plan,
            Err(e) if creating.contains(&spec.usergroup.as_str()) && is_missing_group(&e) => {
                if !json {
                    eprintln!(
                        "Would set membership of new user group {}",
                        spec.usergroup.bold()
                    );
                }
                planned.push(serde_json::json!({
                    "kind": "membership",
                    "usergroup": spec.usergroup,
                    "action": "set",
                }));
                continue;
            }
            Err(e) => return Err(e),
        };

        if !json {
            print_delta(&plan.group.name, &plan.delta);
        }
        let action = if plan.delta.is_empty() { "none" } else { "set" };
        planned.push(serde_json::json!({
            "kind": "membership",
            "usergroup": spec.usergroup,
            "action": action,
            "changes": delta_json(&plan.delta),
        }));
    }

    if json {
        let output = JsonOutput::new(planned).dry_run();
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

fn is_missing_group(err: &Error) -> bool {
    match err {
        Error::Reconciliation { source, .. } => matches!(
            **source,
            Error::Translation {
                kind: crate::error::EntityKind::UserGroup,
                ..
            }
        ),
        _ => false,
    }
}
