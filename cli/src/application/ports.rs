//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `sctl_common`, never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use anyhow::Result;
use sctl_common::{CommandError, ExternalCommand, NodeAddress, TokenBundle};

use crate::domain::{Project, RegistryError, SctlConfig};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
pub trait CommandRunner {
    /// Run a command to completion and return its captured stdout.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] carrying the program's own stderr on failure.
    fn run(&self, command: &ExternalCommand) -> Result<String, CommandError>;
}

// ── Registry Port ─────────────────────────────────────────────────────────────

/// Projects and their nodes. Implementations own the storage; services only
/// read and write through this trait.
pub trait ProjectRegistry {
    /// The project currently marked active.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NoActiveProject`] if none is, or a lookup failure.
    fn active_project(&self) -> Result<Project, RegistryError>;

    /// Name of the active project.
    ///
    /// # Errors
    ///
    /// Same as [`Self::active_project`].
    fn active_project_name(&self) -> Result<String, RegistryError> {
        self.active_project().map(|p| p.name)
    }

    /// # Errors
    ///
    /// [`RegistryError::ProjectNotFound`] if no project has this name.
    fn find_project(&self, name: &str) -> Result<Project, RegistryError>;

    /// Insert or replace a project by name. Saving an active project
    /// deactivates every other one.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read or written.
    fn save_project(&self, project: &Project) -> Result<(), RegistryError>;

    /// Make `name` the only active project.
    ///
    /// # Errors
    ///
    /// [`RegistryError::ProjectNotFound`] if no project has this name.
    fn set_active(&self, name: &str) -> Result<(), RegistryError>;

    /// Every node registered under `project`.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    fn nodes(&self, project: &str) -> Result<Vec<NodeAddress>, RegistryError>;

    /// The master node of `project`, if one was added.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    fn master_node(&self, project: &str) -> Result<Option<NodeAddress>, RegistryError> {
        Ok(self.nodes(project)?.into_iter().find(|n| n.is_master))
    }

    /// Register a node. `(project, host)` must be unique.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateNode`] if the pair is already registered.
    fn add_node(&self, node: &NodeAddress) -> Result<(), RegistryError>;

    /// # Errors
    ///
    /// [`RegistryError::NodeNotFound`] if no such node is registered.
    fn remove_node(&self, project: &str, host: &str) -> Result<NodeAddress, RegistryError>;
}

// ── Token Store Port ──────────────────────────────────────────────────────────

/// One token bundle per project.
pub trait TokenStore {
    /// # Errors
    ///
    /// [`RegistryError::LookupFailed`] if the bundle cannot be read.
    fn load(&self, project: &Project) -> Result<TokenBundle, RegistryError>;

    /// # Errors
    ///
    /// Returns an error if the bundle cannot be written.
    fn save(&self, project: &Project, bundle: &TokenBundle) -> Result<(), RegistryError>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load configuration, returning defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<SctlConfig>;

    /// Persist configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &SctlConfig) -> Result<()>;

    /// Path of the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
