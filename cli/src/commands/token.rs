//! `sctl token`: inspect and renew the active project's auth token.

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ProjectRegistry;
use crate::application::services::auth;
use crate::output::json;

/// Token subcommands.
#[derive(Subcommand)]
pub enum TokenCommand {
    /// Show the auth token's age and remaining lifetime
    Show,
    /// Mint a new auth token (the master token is kept)
    Refresh,
    /// Exit non-zero when the auth token has expired
    Check,
}

/// Run the token command.
///
/// # Errors
///
/// Returns an error if the token bundle cannot be read or written, or for
/// `check`, if the token has expired.
pub fn run(app: &AppContext, cmd: TokenCommand) -> Result<()> {
    let project = app.registry.active_project()?;
    match cmd {
        TokenCommand::Show => {
            let status = auth::status(&app.tokens, &project, Utc::now())?;
            if app.is_json() {
                return json::print(&status);
            }
            app.output.header(&format!("Auth token ({})", status.project));
            app.output.kv("minted ", &status.minted_at.to_rfc3339());
            app.output.kv("age    ", &format!("{}s", status.age_secs));
            if status.valid {
                app.output
                    .kv("expires", &format!("in {}s", status.expires_in_secs));
            } else {
                app.output.warn("Expired. Run: sctl token refresh");
            }
            Ok(())
        }
        TokenCommand::Refresh => {
            let bundle = auth::refresh(&app.tokens, &project)?;
            if app.is_json() {
                return json::print(&serde_json::json!({
                    "project": project.name,
                    "mintedAt": bundle.auth.timestamp,
                }));
            }
            app.output
                .success(&format!("Auth token refreshed for '{}'", project.name));
            Ok(())
        }
        TokenCommand::Check => {
            auth::authorize(&app.tokens, &project, Utc::now())?;
            if app.is_json() {
                return json::print(&serde_json::json!({ "project": project.name, "valid": true }));
            }
            app.output.success("Auth token is valid");
            Ok(())
        }
    }
}
