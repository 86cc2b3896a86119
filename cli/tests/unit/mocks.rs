//! Shared mock infrastructure for unit tests.
//!
//! In-memory implementations of the application ports so service tests can
//! assert on exactly which commands were dispatched, and where.

#![allow(clippy::expect_used)]

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use sctl_common::{CommandError, ExternalCommand, NodeAddress, Token, TokenBundle};
use sctl_cli::application::ports::{CommandRunner, ProjectRegistry, TokenStore};
use sctl_cli::domain::{Project, RegistryError};

// ── Runner ────────────────────────────────────────────────────────────────────

/// Records every command; fails those whose display string contains a marker.
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: RefCell<Vec<ExternalCommand>>,
    fail_when_contains: Vec<String>,
    cannot_spawn: bool,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any command whose display string contains `marker`.
    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_when_contains: vec![marker.to_string()],
            ..Self::default()
        }
    }

    /// Every command fails to start, as when `ssh` is not installed.
    pub fn unspawnable() -> Self {
        Self {
            cannot_spawn: true,
            ..Self::default()
        }
    }

    pub fn displays(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &ExternalCommand) -> Result<String, CommandError> {
        self.calls.borrow_mut().push(command.clone());
        let display = command.to_string();
        if self.cannot_spawn {
            return Err(CommandError::SpawnFailed {
                command: display,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
            });
        }
        if self.fail_when_contains.iter().any(|m| display.contains(m)) {
            return Err(CommandError::ExitedNonZero {
                command: display,
                code: Some(255),
                stderr: "ssh: connect to host port 22: Connection refused\n".to_string(),
            });
        }
        Ok(format!("ok: {display}\n"))
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemRegistry {
    pub projects: RefCell<Vec<Project>>,
    pub nodes: RefCell<Vec<NodeAddress>>,
}

impl MemRegistry {
    /// A registry holding one active project `demo` at `/srv/demo`.
    pub fn with_demo_project() -> Self {
        let reg = Self::default();
        reg.projects.borrow_mut().push(Project::new("demo", "/srv/demo"));
        reg
    }

    pub fn with_master(self, host: &str) -> Self {
        let mut node = NodeAddress::new("demo", host, "root");
        node.is_master = true;
        self.nodes.borrow_mut().push(node);
        self
    }

    pub fn with_worker(self, host: &str) -> Self {
        self.nodes
            .borrow_mut()
            .push(NodeAddress::new("demo", host, "deploy"));
        self
    }

    pub fn demo(&self) -> Project {
        self.find_project("demo").expect("demo project")
    }
}

impl ProjectRegistry for MemRegistry {
    fn active_project(&self) -> Result<Project, RegistryError> {
        self.projects
            .borrow()
            .iter()
            .find(|p| p.is_active)
            .cloned()
            .ok_or(RegistryError::NoActiveProject)
    }

    fn find_project(&self, name: &str) -> Result<Project, RegistryError> {
        self.projects
            .borrow()
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| RegistryError::ProjectNotFound(name.to_string()))
    }

    fn save_project(&self, project: &Project) -> Result<(), RegistryError> {
        let mut projects = self.projects.borrow_mut();
        if project.is_active {
            for p in projects.iter_mut() {
                p.is_active = false;
            }
        }
        projects.retain(|p| p.name != project.name);
        projects.push(project.clone());
        Ok(())
    }

    fn set_active(&self, name: &str) -> Result<(), RegistryError> {
        let mut projects = self.projects.borrow_mut();
        if !projects.iter().any(|p| p.name == name) {
            return Err(RegistryError::ProjectNotFound(name.to_string()));
        }
        for p in projects.iter_mut() {
            p.is_active = p.name == name;
        }
        Ok(())
    }

    fn nodes(&self, project: &str) -> Result<Vec<NodeAddress>, RegistryError> {
        Ok(self
            .nodes
            .borrow()
            .iter()
            .filter(|n| n.project == project)
            .cloned()
            .collect())
    }

    fn add_node(&self, node: &NodeAddress) -> Result<(), RegistryError> {
        let mut nodes = self.nodes.borrow_mut();
        if nodes
            .iter()
            .any(|n| n.project == node.project && n.host == node.host)
        {
            return Err(RegistryError::DuplicateNode {
                project: node.project.clone(),
                host: node.host.clone(),
            });
        }
        nodes.push(node.clone());
        Ok(())
    }

    fn remove_node(&self, project: &str, host: &str) -> Result<NodeAddress, RegistryError> {
        let mut nodes = self.nodes.borrow_mut();
        let idx = nodes
            .iter()
            .position(|n| n.project == project && n.host == host)
            .ok_or_else(|| RegistryError::NodeNotFound {
                project: project.to_string(),
                host: host.to_string(),
            })?;
        Ok(nodes.remove(idx))
    }
}

/// Registry whose every read fails, as a corrupt registry file would.
pub struct BrokenRegistry;

impl BrokenRegistry {
    fn fail<T>() -> Result<T, RegistryError> {
        Err(RegistryError::LookupFailed {
            what: "registry".to_string(),
            reason: "disk on fire".to_string(),
        })
    }
}

impl ProjectRegistry for BrokenRegistry {
    fn active_project(&self) -> Result<Project, RegistryError> {
        Self::fail()
    }
    fn find_project(&self, _: &str) -> Result<Project, RegistryError> {
        Self::fail()
    }
    fn save_project(&self, _: &Project) -> Result<(), RegistryError> {
        Self::fail()
    }
    fn set_active(&self, _: &str) -> Result<(), RegistryError> {
        Self::fail()
    }
    fn nodes(&self, _: &str) -> Result<Vec<NodeAddress>, RegistryError> {
        Self::fail()
    }
    fn add_node(&self, _: &NodeAddress) -> Result<(), RegistryError> {
        Self::fail()
    }
    fn remove_node(&self, _: &str, _: &str) -> Result<NodeAddress, RegistryError> {
        Self::fail()
    }
}

// ── Token store ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemTokens {
    pub bundles: RefCell<HashMap<String, TokenBundle>>,
}

impl MemTokens {
    /// Store a bundle for `project` whose auth token was minted `age` before `now`.
    pub fn minted(project: &Project, now: DateTime<Utc>, age: TimeDelta) -> Self {
        let store = Self::default();
        let token = Token {
            data: sctl_common::generate(1),
            timestamp: now - age,
        };
        store.bundles.borrow_mut().insert(
            project.name.clone(),
            token.to_bundle(project.master_token.clone()),
        );
        store
    }
}

impl TokenStore for MemTokens {
    fn load(&self, project: &Project) -> Result<TokenBundle, RegistryError> {
        self.bundles
            .borrow()
            .get(&project.name)
            .cloned()
            .ok_or_else(|| RegistryError::LookupFailed {
                what: format!("token bundle for {}", project.name),
                reason: "missing".to_string(),
            })
    }

    fn save(&self, project: &Project, bundle: &TokenBundle) -> Result<(), RegistryError> {
        self.bundles
            .borrow_mut()
            .insert(project.name.clone(), bundle.clone());
        Ok(())
    }
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

pub fn fresh() -> TimeDelta {
    TimeDelta::seconds(10)
}

pub fn stale() -> TimeDelta {
    TimeDelta::seconds(301)
}
