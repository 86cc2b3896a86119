//! Domain types and validators for sctl configuration.
//!
//! Pure functions only: no I/O, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["remote.user", "services.dir"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.sctl/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SctlConfig {
    /// Remote access settings.
    #[serde(default)]
    pub remote: RemoteConfig,
    /// Service definition settings.
    #[serde(default)]
    pub services: ServicesConfig,
}

/// Remote access configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// User for nodes added without `--user` (default `root`).
    #[serde(default = "default_remote_user")]
    pub user: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            user: default_remote_user(),
        }
    }
}

fn default_remote_user() -> String {
    "root".to_string()
}

/// Where service definitions live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Directory of `<service>.json` files, relative to the project folder unless absolute.
    #[serde(default = "default_services_dir")]
    pub dir: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            dir: default_services_dir(),
        }
    }
}

fn default_services_dir() -> String {
    "services".to_string()
}

impl SctlConfig {
    /// Resolve the definitions directory for a project rooted at `project_folder`.
    #[must_use]
    pub fn definitions_dir(&self, project_folder: &std::path::Path) -> std::path::PathBuf {
        project_folder.join(&self.services.dir)
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let reason = match key {
        "remote.user" if value.is_empty() => Some("User must not be empty."),
        "remote.user" if value.contains(['@', ':']) || value.contains(char::is_whitespace) => {
            Some("User must not contain '@', ':' or whitespace.")
        }
        "services.dir" if value.trim().is_empty() => Some("Directory must not be empty."),
        _ => None,
    };
    if let Some(reason) = reason {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Apply an already-validated `key = value` to `config`.
///
/// # Errors
///
/// Returns an error for keys outside [`VALID_CONFIG_KEYS`].
pub fn apply_config_value(config: &mut SctlConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "remote.user" => config.remote.user = value.to_string(),
        "services.dir" => config.services.dir = value.to_string(),
        _ => validate_config_key(key)?,
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
