//! `sctl sync`: copy the project folder to a node with rsync.

use anyhow::Result;
use chrono::Utc;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::sync;
use crate::output::json;

/// Arguments for the sync command.
#[derive(Args)]
pub struct SyncArgs {
    /// Registered node to sync to
    pub host: String,
    /// Destination folder on the node (default: the project name)
    #[arg(long)]
    pub target: Option<String>,
}

/// Run the sync command.
///
/// # Errors
///
/// Returns an error if the node is unknown, the auth token has expired, or
/// rsync fails.
pub fn run(app: &AppContext, args: &SyncArgs) -> Result<()> {
    let output = sync::sync_project(
        &app.runner,
        &app.registry,
        &app.tokens,
        &args.host,
        args.target.as_deref(),
        Utc::now(),
    )?;

    if app.is_dry_run() {
        app.flush_dry_run();
        return Ok(());
    }
    if app.is_json() {
        return json::print(&serde_json::json!({ "host": args.host, "output": output }));
    }
    app.output.passthrough(&output);
    app.output.success(&format!("Synced to {}", args.host));
    Ok(())
}
