//! Application service: copy the project folder to a node.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sctl_common::contents_of;

use crate::application::ports::{CommandRunner, ProjectRegistry, TokenStore};
use crate::application::services::{auth, nodes};

/// rsync the active project's folder contents into `target_folder` on `host`.
///
/// `target_folder` defaults to the project name, i.e. a directory in the
/// remote user's home.
///
/// # Errors
///
/// Returns an error if the node is unknown, the token has expired, or rsync fails.
pub fn sync_project(
    runner: &impl CommandRunner,
    registry: &impl ProjectRegistry,
    tokens: &impl TokenStore,
    host: &str,
    target_folder: Option<&str>,
    now: DateTime<Utc>,
) -> Result<String> {
    let project = registry.active_project()?;
    let node = nodes::find(registry, &project.name, host)?;
    auth::authorize(tokens, &project, now)?;

    let target = target_folder.unwrap_or(project.name.as_str());
    let command = node.rsync_command(&contents_of(&project.folder), target);
    let output = runner.run(&command)?;
    tracing::info!(project = %project.name, host = %host, target = %target, "project synced");
    Ok(output)
}
