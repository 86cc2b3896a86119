//! Application service: starting, stopping and distributing services.
//!
//! Engine commands for the swarm run on the active project's master node and
//! are gated by the project's auth token. Pushing an image happens on the
//! operator's machine and needs no token.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sctl_common::{NodeAddress, TargetedCommand};
use serde::Serialize;

use crate::application::ports::{CommandRunner, ProjectRegistry, TokenStore};
use crate::application::services::{auth, dispatch};
use crate::domain::{Project, RegistryError, SctlConfig, ServiceSpec, validate_service_name};

/// The project and node a swarm-level command goes to.
#[derive(Debug, Clone)]
pub struct DeployTarget {
    pub project: Project,
    pub master: NodeAddress,
}

/// Result of one command on one node when fanning out.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NodeOutcome {
    pub host: String,
    pub ok: bool,
    /// Captured stdout on success. On failure the tool's stderr, or the
    /// error itself when the tool never ran.
    pub output: String,
}

/// Validate `name` and load its definition from the project's definitions dir.
///
/// # Errors
///
/// Returns an error for an unsafe name or an unreadable/malformed definition.
pub fn load_service(config: &SctlConfig, project: &Project, name: &str) -> Result<ServiceSpec> {
    validate_service_name(name)?;
    let mut service = ServiceSpec::named(name);
    service.load_definition(&config.definitions_dir(&project.folder))?;
    Ok(service)
}

/// Active project plus its master node.
///
/// # Errors
///
/// Returns an error if there is no active project or it has no master.
pub fn resolve_target(registry: &impl ProjectRegistry) -> Result<DeployTarget> {
    let project = registry.active_project()?;
    let master = registry
        .master_node(&project.name)?
        .ok_or_else(|| RegistryError::NoMasterNode {
            project: project.name.clone(),
        })?;
    Ok(DeployTarget { project, master })
}

/// `docker service create ...` on the master.
///
/// # Errors
///
/// Returns an error if the target cannot be resolved, the token has expired,
/// or the engine command fails.
pub fn start(
    runner: &impl CommandRunner,
    registry: &impl ProjectRegistry,
    tokens: &impl TokenStore,
    service: &ServiceSpec,
    now: DateTime<Utc>,
) -> Result<String> {
    let target = resolve_target(registry)?;
    auth::authorize(tokens, &target.project, now)?;
    let command = service.run_command(&target.project.network);
    let output = dispatch::run_targeted(runner, &TargetedCommand::new(target.master, command))?;
    tracing::info!(project = %target.project.name, service = %service.name, "service started");
    Ok(output)
}

/// `docker service rm <name>` on the master.
///
/// # Errors
///
/// Same as [`start`].
pub fn stop(
    runner: &impl CommandRunner,
    registry: &impl ProjectRegistry,
    tokens: &impl TokenStore,
    service: &ServiceSpec,
    now: DateTime<Utc>,
) -> Result<String> {
    let target = resolve_target(registry)?;
    auth::authorize(tokens, &target.project, now)?;
    let output = dispatch::run_targeted(
        runner,
        &TargetedCommand::new(target.master, service.stop_command()),
    )?;
    tracing::info!(project = %target.project.name, service = %service.name, "service stopped");
    Ok(output)
}

/// `docker pull <image>` on the master.
///
/// # Errors
///
/// Same as [`start`].
pub fn pull(
    runner: &impl CommandRunner,
    registry: &impl ProjectRegistry,
    tokens: &impl TokenStore,
    service: &ServiceSpec,
    now: DateTime<Utc>,
) -> Result<String> {
    let target = resolve_target(registry)?;
    auth::authorize(tokens, &target.project, now)?;
    Ok(dispatch::run_targeted(
        runner,
        &TargetedCommand::new(target.master, service.pull_command()),
    )?)
}

/// `docker pull <image>` on every worker, one after the other.
///
/// A failing node does not stop the others; each gets its own outcome.
///
/// # Errors
///
/// Returns an error only if the project or token cannot be resolved.
pub fn pull_on_workers(
    runner: &impl CommandRunner,
    registry: &impl ProjectRegistry,
    tokens: &impl TokenStore,
    service: &ServiceSpec,
    now: DateTime<Utc>,
) -> Result<Vec<NodeOutcome>> {
    let project = registry.active_project()?;
    auth::authorize(tokens, &project, now)?;
    let workers = registry
        .nodes(&project.name)?
        .into_iter()
        .filter(|n| !n.is_master);

    let mut outcomes = Vec::new();
    for node in workers {
        let host = node.host.clone();
        let outcome = match dispatch::run_targeted(
            runner,
            &TargetedCommand::new(node, service.pull_command()),
        ) {
            Ok(output) => NodeOutcome {
                host,
                ok: true,
                output,
            },
            Err(e) => {
                tracing::warn!(host = %host, error = %e, "pull failed");
                let output = match e.captured_output() {
                    "" => e.to_string(),
                    captured => captured.to_string(),
                };
                NodeOutcome {
                    host,
                    ok: false,
                    output,
                }
            }
        };
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// `docker push <image>` from this machine.
///
/// # Errors
///
/// Returns the engine's error if the push fails.
pub fn push(runner: &impl CommandRunner, service: &ServiceSpec) -> Result<String> {
    Ok(runner.run(&service.push_command())?)
}
