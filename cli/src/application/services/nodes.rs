//! Application service: adding and removing nodes.

use anyhow::Result;
use sctl_common::NodeAddress;

use crate::application::ports::ProjectRegistry;
use crate::domain::RegistryError;

/// Register `node` as a worker.
///
/// The active project is only consulted when the node does not name one.
///
/// # Errors
///
/// Returns an error if the active project cannot be determined, the project
/// does not exist, or the node is already registered.
pub fn join_worker(registry: &impl ProjectRegistry, mut node: NodeAddress) -> Result<NodeAddress> {
    let active = if node.project.is_empty() {
        registry.active_project_name()?
    } else {
        String::new()
    };
    node.provision_as_worker(&active);
    registry.find_project(&node.project)?;
    registry.add_node(&node)?;
    tracing::info!(project = %node.project, host = %node.host, "worker joined");
    Ok(node)
}

/// Register `node` as its project's master. A project has at most one.
///
/// # Errors
///
/// Returns an error if the project already has a master or the node is
/// already registered.
pub fn add_master(registry: &impl ProjectRegistry, mut node: NodeAddress) -> Result<NodeAddress> {
    if node.project.is_empty() {
        node.project = registry.active_project_name()?;
    }
    registry.find_project(&node.project)?;
    if let Some(existing) = registry.master_node(&node.project)? {
        anyhow::bail!(
            "Project '{}' already has a master node ({}). Remove it first: sctl node remove {}",
            node.project,
            existing.host,
            existing.host
        );
    }
    node.is_master = true;
    registry.add_node(&node)?;
    tracing::info!(project = %node.project, host = %node.host, "master added");
    Ok(node)
}

/// Nodes of `project`, or of the active project when `None`.
///
/// # Errors
///
/// Returns an error if the registry cannot be read.
pub fn list(registry: &impl ProjectRegistry, project: Option<&str>) -> Result<Vec<NodeAddress>> {
    let project = match project {
        Some(name) => name.to_string(),
        None => registry.active_project_name()?,
    };
    Ok(registry.nodes(&project)?)
}

/// Unregister `host` from the active project.
///
/// # Errors
///
/// Returns an error if there is no active project or no such node.
pub fn remove(registry: &impl ProjectRegistry, host: &str) -> Result<NodeAddress> {
    let project = registry.active_project_name()?;
    let removed = registry.remove_node(&project, host)?;
    tracing::info!(project = %project, host = %host, "node removed");
    Ok(removed)
}

/// Look a node up by host within `project`.
///
/// # Errors
///
/// [`RegistryError::NodeNotFound`] if it is not registered.
pub fn find(
    registry: &impl ProjectRegistry,
    project: &str,
    host: &str,
) -> Result<NodeAddress, RegistryError> {
    registry
        .nodes(project)?
        .into_iter()
        .find(|n| n.host == host)
        .ok_or_else(|| RegistryError::NodeNotFound {
            project: project.to_string(),
            host: host.to_string(),
        })
}
