//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Service definition errors ─────────────────────────────────────────────────

/// Errors loading a `<service>.json` definition file.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("cannot read service definition {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed service definition {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Invalid service name '{0}': must match ^[A-Za-z0-9][A-Za-z0-9_.-]*$")]
    InvalidName(String),
}

// ── Registry errors ───────────────────────────────────────────────────────────

/// Errors reading or updating the project/node registry and token store.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read {what}: {reason}")]
    LookupFailed { what: String, reason: String },

    #[error("failed to write {what}: {reason}")]
    WriteFailed { what: String, reason: String },

    #[error("No active project. Create one with: sctl project init <name>")]
    NoActiveProject,

    #[error("Project '{0}' not found.")]
    ProjectNotFound(String),

    #[error("Project '{project}' has no master node. Add one with: sctl node add <host> --master")]
    NoMasterNode { project: String },

    #[error("Node '{host}' is already registered in project '{project}'.")]
    DuplicateNode { project: String, host: String },

    #[error("Node '{host}' is not registered in project '{project}'.")]
    NodeNotFound { project: String, host: String },
}

// ── Auth errors ───────────────────────────────────────────────────────────────

/// Token policy failures. Expiry itself is not an error; the services that
/// gate remote operations turn it into one.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(
        "Auth token for project '{project}' expired {age_secs}s after minting. Run: sctl token refresh"
    )]
    TokenExpired { project: String, age_secs: i64 },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
