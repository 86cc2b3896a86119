//! Application service: token gating for cross-node operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sctl_common::{TOKEN_MAX_AGE_SECS, Token, TokenBundle};
use serde::Serialize;

use crate::application::ports::TokenStore;
use crate::domain::project::AUTH_TOKEN_SEGMENTS;
use crate::domain::{AuthError, Project};

/// Snapshot of a project's auth token, for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TokenStatus {
    pub project: String,
    pub valid: bool,
    pub age_secs: i64,
    pub expires_in_secs: i64,
    pub minted_at: DateTime<Utc>,
}

/// Load the project's bundle and require its auth token to be valid at `now`.
///
/// # Errors
///
/// Returns [`AuthError::TokenExpired`] for a stale token, or a registry error
/// if the bundle cannot be read.
pub fn authorize(
    tokens: &impl TokenStore,
    project: &Project,
    now: DateTime<Utc>,
) -> Result<TokenBundle> {
    let bundle = tokens.load(project)?;
    if !bundle.auth.is_valid_at(now) {
        return Err(AuthError::TokenExpired {
            project: project.name.clone(),
            age_secs: bundle.auth.age_secs_at(now),
        }
        .into());
    }
    Ok(bundle)
}

/// Mint a new auth token for `project`, keeping its master token.
///
/// # Errors
///
/// Returns an error if the bundle cannot be written.
pub fn refresh(tokens: &impl TokenStore, project: &Project) -> Result<TokenBundle> {
    let bundle = Token::new(AUTH_TOKEN_SEGMENTS).to_bundle(project.master_token.clone());
    tokens.save(project, &bundle)?;
    tracing::info!(project = %project.name, "auth token refreshed");
    Ok(bundle)
}

/// Describe the current auth token without enforcing anything.
///
/// # Errors
///
/// Returns an error if the bundle cannot be read.
pub fn status(
    tokens: &impl TokenStore,
    project: &Project,
    now: DateTime<Utc>,
) -> Result<TokenStatus> {
    let bundle = tokens.load(project)?;
    let age_secs = bundle.auth.age_secs_at(now);
    Ok(TokenStatus {
        project: project.name.clone(),
        valid: bundle.auth.is_valid_at(now),
        age_secs,
        expires_in_secs: (TOKEN_MAX_AGE_SECS - age_secs).max(0),
        minted_at: bundle.auth.timestamp,
    })
}
