//! Service definitions and their translation into container-engine arguments.
//!
//! A definition lives in `<dir>/<name>.json`. Resolution turns its environment
//! and keyword entries into the exact argument list handed to the engine; the
//! order of that list is fixed and must not change.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use sctl_common::ExternalCommand;
use serde::{Deserialize, Serialize};

use crate::domain::error::DefinitionError;

/// Engine flag that precedes every environment entry.
pub const ENV_FLAG: &str = "-e";

/// Prefix marking an environment value as a variable reference.
pub const ENV_SIGIL: char = '$';

/// Only definition schema version understood by this build.
pub const DEFINITION_VERSION: u32 = 1;

/// Service names end up in file paths and as swarm service names.
pub static SERVICE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("valid regex")
});

/// A deployable containerized service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    pub name: String,
    pub image: String,
    /// `KEY=VALUE`, bare `KEY`, or a stray `-e` (dropped on resolution).
    pub env_args: Vec<String>,
    /// Free-form engine arguments; each entry may hold several whitespace-separated tokens.
    pub keyword_args: Vec<String>,
}

/// On-disk schema of a definition file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefinitionFile {
    #[serde(default)]
    version: Option<u32>,
    name: String,
    image: String,
    #[serde(default, alias = "envVars")]
    env_args: Vec<String>,
    #[serde(default)]
    keyword_args: Vec<String>,
}

impl DefinitionFile {
    fn validate(self, path: &Path) -> Result<ServiceSpec, DefinitionError> {
        let malformed = |reason: String| DefinitionError::Malformed {
            path: path.to_path_buf(),
            reason,
        };
        if let Some(version) = self.version
            && version != DEFINITION_VERSION
        {
            return Err(malformed(format!(
                "unsupported version {version} (expected {DEFINITION_VERSION})"
            )));
        }
        if self.name.trim().is_empty() {
            return Err(malformed("`name` must not be empty".to_string()));
        }
        if self.image.trim().is_empty() {
            return Err(malformed("`image` must not be empty".to_string()));
        }
        Ok(ServiceSpec {
            name: self.name,
            image: self.image,
            env_args: self.env_args,
            keyword_args: self.keyword_args,
        })
    }
}

impl ServiceSpec {
    /// A spec that only knows its name; fill it with [`Self::load_definition`].
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Environment entries as engine arguments: `-e <entry>` per surviving entry.
    ///
    /// Entries that are exactly `-e` are dropped. For `KEY=VALUE` only the
    /// value (after the first `=`) is substituted; a bare entry is substituted whole.
    #[must_use]
    pub fn resolve_env_args(&self) -> Vec<String> {
        self.env_args
            .iter()
            .filter(|entry| entry.as_str() != ENV_FLAG)
            .flat_map(|entry| [ENV_FLAG.to_string(), resolve_env_entry(entry)])
            .collect()
    }

    /// Keyword entries split on whitespace and flattened in order.
    #[must_use]
    pub fn resolve_keyword_args(&self) -> Vec<String> {
        self.keyword_args
            .iter()
            .flat_map(|entry| entry.split_whitespace().map(str::to_string))
            .collect()
    }

    /// `service create --name <name> --network <network> [-e ..]* [kw..]* <image>`
    #[must_use]
    pub fn compose_run_args(&self, network: &str) -> Vec<String> {
        let head = ["service", "create", "--name", self.name.as_str(), "--network", network];
        let mut args: Vec<String> = head.into_iter().map(str::to_string).collect();
        args.extend(self.resolve_env_args());
        args.extend(self.resolve_keyword_args());
        args.push(self.image.clone());
        args
    }

    #[must_use]
    pub fn compose_stop_args(&self) -> Vec<String> {
        vec!["service".to_string(), "rm".to_string(), self.name.clone()]
    }

    #[must_use]
    pub fn compose_push_args(&self) -> Vec<String> {
        vec!["push".to_string(), self.image.clone()]
    }

    #[must_use]
    pub fn compose_pull_args(&self) -> Vec<String> {
        vec!["pull".to_string(), self.image.clone()]
    }

    #[must_use]
    pub fn run_command(&self, network: &str) -> ExternalCommand {
        ExternalCommand::docker(self.compose_run_args(network))
    }

    #[must_use]
    pub fn stop_command(&self) -> ExternalCommand {
        ExternalCommand::docker(self.compose_stop_args())
    }

    #[must_use]
    pub fn push_command(&self) -> ExternalCommand {
        ExternalCommand::docker(self.compose_push_args())
    }

    #[must_use]
    pub fn pull_command(&self) -> ExternalCommand {
        ExternalCommand::docker(self.compose_pull_args())
    }

    /// `<base_dir>/<name>.json`
    #[must_use]
    pub fn definition_file_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(format!("{}.json", self.name))
    }

    /// Replace this record with the definition stored under `base_dir`.
    ///
    /// On any error the record is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::Unreadable`] when the file cannot be read and
    /// [`DefinitionError::Malformed`] when it does not match the schema.
    pub fn load_definition(&mut self, base_dir: &Path) -> Result<(), DefinitionError> {
        let path = self.definition_file_path(base_dir);
        let content =
            std::fs::read_to_string(&path).map_err(|source| DefinitionError::Unreadable {
                path: path.clone(),
                source,
            })?;
        let file: DefinitionFile =
            serde_json::from_str(&content).map_err(|e| DefinitionError::Malformed {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        *self = file.validate(&path)?;
        tracing::debug!(service = %self.name, path = %path.display(), "loaded service definition");
        Ok(())
    }
}

/// Check that `name` is safe to use as a file stem and service name.
///
/// # Errors
///
/// Returns [`DefinitionError::InvalidName`] if it is not.
pub fn validate_service_name(name: &str) -> Result<(), DefinitionError> {
    if SERVICE_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(DefinitionError::InvalidName(name.to_string()))
    }
}

/// Substitute the value side of a single environment entry.
#[must_use]
pub fn resolve_env_entry(entry: &str) -> String {
    resolve_env_entry_with(entry, lookup_process_env)
}

/// Like [`resolve_env_entry`], with a custom variable lookup.
pub fn resolve_env_entry_with<F>(entry: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match entry.split_once('=') {
        Some((key, value)) => format!("{key}={}", substitute_env_arg_with(value, lookup)),
        None => substitute_env_arg_with(entry, lookup),
    }
}

/// Expand `$NAME` from the process environment.
///
/// Values without the sigil pass through. Unset or empty variables leave the
/// value as written, sigil included; a failed lookup is never an error.
#[must_use]
pub fn substitute_env_arg(value: &str) -> String {
    substitute_env_arg_with(value, lookup_process_env)
}

/// Like [`substitute_env_arg`], with a custom variable lookup.
pub fn substitute_env_arg_with<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let Some(key) = value.strip_prefix(ENV_SIGIL) else {
        return value.to_string();
    };
    match lookup(key) {
        Some(found) if !found.is_empty() => found,
        _ => value.to_string(),
    }
}

fn lookup_process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
