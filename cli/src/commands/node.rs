//! `sctl node`: register, list and remove nodes of a project.

use anyhow::Result;
use clap::Subcommand;
use sctl_common::NodeAddress;

use crate::app::AppContext;
use crate::application::services::{config_service, nodes};
use crate::domain::validate_config_value;
use crate::output::json;

/// Node subcommands.
#[derive(Subcommand)]
pub enum NodeCommand {
    /// Register a node (worker unless --master)
    Add {
        /// IP address or hostname
        host: String,
        /// Remote user (default: remote.user from config)
        #[arg(long)]
        user: Option<String>,
        /// Project to join (default: active project)
        #[arg(long)]
        project: Option<String>,
        /// Register as the project's master node
        #[arg(long)]
        master: bool,
    },
    /// List nodes of a project
    List {
        /// Project to list (default: active project)
        #[arg(long)]
        project: Option<String>,
    },
    /// Unregister a node from the active project
    Remove {
        /// IP address or hostname
        host: String,
    },
}

/// Run the node command.
///
/// # Errors
///
/// Returns an error if the registry cannot be read or written, or the node
/// conflicts with an existing one.
pub fn run(app: &AppContext, cmd: NodeCommand) -> Result<()> {
    match cmd {
        NodeCommand::Add {
            host,
            user,
            project,
            master,
        } => add(app, host, user, project, master),
        NodeCommand::List { project } => list(app, project.as_deref()),
        NodeCommand::Remove { host } => remove(app, &host),
    }
}

fn add(
    app: &AppContext,
    host: String,
    user: Option<String>,
    project: Option<String>,
    master: bool,
) -> Result<()> {
    let user = match user {
        Some(u) => {
            validate_config_value("remote.user", &u)?;
            u
        }
        None => config_service::load_config(&app.config_store)?.remote.user,
    };
    let node = NodeAddress::new(project.unwrap_or_default(), host, user);
    let node = if master {
        nodes::add_master(&app.registry, node)?
    } else {
        nodes::join_worker(&app.registry, node)?
    };

    if app.is_json() {
        return json::print(&node);
    }
    let role = if node.is_master { "master" } else { "worker" };
    app.output.success(&format!(
        "Added {role} {} to project '{}'",
        node.remote_label(),
        node.project
    ));
    Ok(())
}

fn list(app: &AppContext, project: Option<&str>) -> Result<()> {
    let found = nodes::list(&app.registry, project)?;

    if app.is_json() {
        return json::print(&found);
    }
    if found.is_empty() {
        app.output.info("No nodes registered. Add one with: sctl node add <host>");
        return Ok(());
    }
    app.output.header("Nodes");
    for node in &found {
        app.output.node_line(node);
    }
    Ok(())
}

fn remove(app: &AppContext, host: &str) -> Result<()> {
    if !app.confirm(&format!("Remove node {host}?"), true)? {
        app.output.info("Cancelled.");
        return Ok(());
    }
    let removed = nodes::remove(&app.registry, host)?;

    if app.is_json() {
        return json::print(&removed);
    }
    app.output.success(&format!("Removed {}", removed.remote_label()));
    Ok(())
}
