//! `sctl project`: create, switch and inspect projects.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ProjectRegistry;
use crate::application::services::project;
use crate::output::json;

/// Project subcommands.
#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Create a project and make it active
    Init {
        /// Project name
        name: String,
        /// Folder holding service definitions and the token file (default: current directory)
        #[arg(long)]
        folder: Option<PathBuf>,
    },
    /// Switch the active project
    Use {
        /// Project name
        name: String,
    },
    /// Show the active project
    Show,
}

/// Run the project command.
///
/// # Errors
///
/// Returns an error if the registry or token store cannot be read or written.
pub fn run(app: &AppContext, cmd: ProjectCommand) -> Result<()> {
    match cmd {
        ProjectCommand::Init { name, folder } => init(app, &name, folder),
        ProjectCommand::Use { name } => use_project(app, &name),
        ProjectCommand::Show => show(app),
    }
}

fn init(app: &AppContext, name: &str, folder: Option<PathBuf>) -> Result<()> {
    let folder = match folder {
        Some(f) => f,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let folder = std::path::absolute(&folder)
        .with_context(|| format!("cannot resolve {}", folder.display()))?;

    let created = project::init(&app.registry, &app.tokens, name, &folder)?;

    if app.is_json() {
        return json::print(&serde_json::json!({
            "name": created.name,
            "folder": created.folder,
            "network": created.network,
        }));
    }
    app.output.success(&format!("Project '{}' created", created.name));
    app.output.kv("folder ", &created.folder.display().to_string());
    app.output.kv("network", &created.network);
    Ok(())
}

fn use_project(app: &AppContext, name: &str) -> Result<()> {
    let active = project::activate(&app.registry, name)?;
    if app.is_json() {
        return json::print(&serde_json::json!({ "active": active.name }));
    }
    app.output.success(&format!("Active project: {}", active.name));
    Ok(())
}

fn show(app: &AppContext) -> Result<()> {
    let active = app.registry.active_project()?;
    let nodes = app.registry.nodes(&active.name)?;

    if app.is_json() {
        return json::print(&serde_json::json!({
            "name": active.name,
            "folder": active.folder,
            "network": active.network,
            "nodes": nodes,
        }));
    }

    app.output.header(&active.name);
    app.output.kv("folder ", &active.folder.display().to_string());
    app.output.kv("network", &active.network);
    app.output.kv("nodes  ", &nodes.len().to_string());
    Ok(())
}
