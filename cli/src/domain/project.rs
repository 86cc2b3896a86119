//! Project domain type.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Segments in a project's master token.
pub const MASTER_TOKEN_SEGMENTS: usize = 4;

/// Segments in a short-lived auth token.
pub const AUTH_TOKEN_SEGMENTS: usize = 1;

/// A named deployment environment: one master, many workers, many services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    /// Local folder holding the project's service definitions and token file.
    pub folder: PathBuf,
    /// Join token handed out by the swarm manager; empty until the swarm exists.
    #[serde(default)]
    pub swarm_token: String,
    #[serde(default)]
    pub is_active: bool,
    pub network: String,
    pub master_token: String,
}

impl Project {
    /// A fresh, active project with its own overlay network and master token.
    #[must_use]
    pub fn new(name: impl Into<String>, folder: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            network: network_name(&name),
            name,
            folder: folder.into(),
            swarm_token: String::new(),
            is_active: true,
            master_token: sctl_common::generate(MASTER_TOKEN_SEGMENTS),
        }
    }
}

/// `<project>-net`
#[must_use]
pub fn network_name(project: &str) -> String {
    format!("{project}-net")
}
