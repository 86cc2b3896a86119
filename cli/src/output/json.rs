//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed document on stdout.

use anyhow::{Context, Result};
use sctl_common::CommandError;
use serde::Serialize;

use crate::domain::{AuthError, ConfigError, DefinitionError, RegistryError};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stable machine-readable code for a command failure.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<RegistryError>() {
        return match e {
            RegistryError::NoActiveProject => "NO_ACTIVE_PROJECT",
            RegistryError::ProjectNotFound(_) => "PROJECT_NOT_FOUND",
            RegistryError::NoMasterNode { .. } => "NO_MASTER_NODE",
            RegistryError::DuplicateNode { .. } => "DUPLICATE_NODE",
            RegistryError::NodeNotFound { .. } => "NODE_NOT_FOUND",
            RegistryError::LookupFailed { .. } | RegistryError::WriteFailed { .. } => "REGISTRY",
        };
    }
    if err.downcast_ref::<AuthError>().is_some() {
        "TOKEN_EXPIRED"
    } else if err.downcast_ref::<DefinitionError>().is_some() {
        "DEFINITION"
    } else if err.downcast_ref::<CommandError>().is_some() {
        "COMMAND_FAILED"
    } else if err.downcast_ref::<ConfigError>().is_some() {
        "CONFIG"
    } else {
        "ERROR"
    }
}

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}
