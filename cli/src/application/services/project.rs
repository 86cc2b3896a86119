//! Application service: project creation and selection.

use std::path::Path;

use anyhow::Result;
use sctl_common::Token;

use crate::application::ports::{ProjectRegistry, TokenStore};
use crate::domain::project::AUTH_TOKEN_SEGMENTS;
use crate::domain::{Project, RegistryError};

/// Create a project, make it active and write its first token bundle.
///
/// # Errors
///
/// Returns an error if a project with the same name exists, or if the
/// registry or token store cannot be written.
pub fn init(
    registry: &impl ProjectRegistry,
    tokens: &impl TokenStore,
    name: &str,
    folder: &Path,
) -> Result<Project> {
    match registry.find_project(name) {
        Ok(_) => anyhow::bail!("Project '{name}' already exists."),
        Err(RegistryError::ProjectNotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }

    let project = Project::new(name, folder);
    registry.save_project(&project)?;

    let bundle = Token::new(AUTH_TOKEN_SEGMENTS).to_bundle(project.master_token.clone());
    tokens.save(&project, &bundle)?;

    tracing::info!(project = %project.name, network = %project.network, "project created");
    Ok(project)
}

/// Switch the active project.
///
/// # Errors
///
/// Returns an error if no project has this name.
pub fn activate(registry: &impl ProjectRegistry, name: &str) -> Result<Project> {
    registry.set_active(name)?;
    tracing::info!(project = %name, "project activated");
    Ok(registry.find_project(name)?)
}
