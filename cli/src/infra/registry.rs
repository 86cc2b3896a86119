//! Infrastructure implementation of the `ProjectRegistry` port.
//!
//! `JsonRegistry` keeps every project and node in one JSON document
//! (`~/.sctl/registry.json`). Each mutation is a full load-modify-save with an
//! atomic write, so a crash never leaves a half-written registry behind.

use std::path::PathBuf;

use anyhow::Result;
use sctl_common::NodeAddress;
use serde::{Deserialize, Serialize};

use crate::application::ports::ProjectRegistry;
use crate::domain::{Project, RegistryError};
use crate::infra::fs::{sctl_home, write_atomic};

/// On-disk registry document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    nodes: Vec<NodeAddress>,
}

/// Registry file manager.
#[derive(Debug, Clone)]
pub struct JsonRegistry {
    path: PathBuf,
}

impl JsonRegistry {
    /// Create a registry at `<sctl home>/registry.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(sctl_home()?.join("registry.json")))
    }

    /// Create a registry with an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn what(&self) -> String {
        format!("registry {}", self.path.display())
    }

    fn load(&self) -> Result<RegistryFile, RegistryError> {
        if !self.path.exists() {
            return Ok(RegistryFile::default());
        }
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| RegistryError::LookupFailed {
                what: self.what(),
                reason: e.to_string(),
            })?;
        serde_json::from_str(&content).map_err(|e| RegistryError::LookupFailed {
            what: self.what(),
            reason: e.to_string(),
        })
    }

    fn save(&self, file: &RegistryFile) -> Result<(), RegistryError> {
        let write_failed = |reason: String| RegistryError::WriteFailed {
            what: self.what(),
            reason,
        };
        let content = serde_json::to_string_pretty(file).map_err(|e| write_failed(e.to_string()))?;
        write_atomic(&self.path, &content).map_err(|e| write_failed(format!("{e:#}")))?;
        tracing::debug!(path = %self.path.display(), "registry saved");
        Ok(())
    }
}

impl ProjectRegistry for JsonRegistry {
    fn active_project(&self) -> Result<Project, RegistryError> {
        self.load()?
            .projects
            .into_iter()
            .find(|p| p.is_active)
            .ok_or(RegistryError::NoActiveProject)
    }

    fn find_project(&self, name: &str) -> Result<Project, RegistryError> {
        self.load()?
            .projects
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| RegistryError::ProjectNotFound(name.to_string()))
    }

    fn save_project(&self, project: &Project) -> Result<(), RegistryError> {
        let mut file = self.load()?;
        if project.is_active {
            for p in &mut file.projects {
                p.is_active = false;
            }
        }
        match file.projects.iter_mut().find(|p| p.name == project.name) {
            Some(existing) => *existing = project.clone(),
            None => file.projects.push(project.clone()),
        }
        self.save(&file)
    }

    fn set_active(&self, name: &str) -> Result<(), RegistryError> {
        let mut file = self.load()?;
        if !file.projects.iter().any(|p| p.name == name) {
            return Err(RegistryError::ProjectNotFound(name.to_string()));
        }
        for p in &mut file.projects {
            p.is_active = p.name == name;
        }
        self.save(&file)
    }

    fn nodes(&self, project: &str) -> Result<Vec<NodeAddress>, RegistryError> {
        Ok(self
            .load()?
            .nodes
            .into_iter()
            .filter(|n| n.project == project)
            .collect())
    }

    fn add_node(&self, node: &NodeAddress) -> Result<(), RegistryError> {
        let mut file = self.load()?;
        if file
            .nodes
            .iter()
            .any(|n| n.project == node.project && n.host == node.host)
        {
            return Err(RegistryError::DuplicateNode {
                project: node.project.clone(),
                host: node.host.clone(),
            });
        }
        file.nodes.push(node.clone());
        self.save(&file)
    }

    fn remove_node(&self, project: &str, host: &str) -> Result<NodeAddress, RegistryError> {
        let mut file = self.load()?;
        let idx = file
            .nodes
            .iter()
            .position(|n| n.project == project && n.host == host)
            .ok_or_else(|| RegistryError::NodeNotFound {
                project: project.to_string(),
                host: host.to_string(),
            })?;
        let removed = file.nodes.remove(idx);
        self.save(&file)?;
        Ok(removed)
    }
}
