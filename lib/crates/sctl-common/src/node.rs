//! Node addressing: local vs. remote targeting for ssh and rsync.

use serde::{Deserialize, Serialize};

use crate::command::{ExternalCommand, RSYNC, SSH};

/// Host names that always mean "this machine". Closed, case-sensitive set;
/// no DNS resolution is involved.
pub const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0"];

/// Operating system every worker node is assumed to run.
pub const DEFAULT_OS: &str = "linux";

fn default_os() -> String {
    DEFAULT_OS.to_string()
}

fn default_user() -> String {
    "root".to_string()
}

/// A machine within a project. `(project, host)` identifies it in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAddress {
    #[serde(default)]
    pub project: String,
    /// IP address or hostname (`ip` in older registry files).
    #[serde(alias = "ip")]
    pub host: String,
    #[serde(default = "default_os")]
    pub os: String,
    #[serde(default)]
    pub is_master: bool,
    #[serde(default = "default_user")]
    pub user: String,
}

impl NodeAddress {
    #[must_use]
    pub fn new(project: impl Into<String>, host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            host: host.into(),
            os: default_os(),
            is_master: false,
            user: user.into(),
        }
    }

    /// `true` iff the host is one of [`LOOPBACK_HOSTS`].
    #[must_use]
    pub fn is_local(&self) -> bool {
        LOOPBACK_HOSTS.contains(&self.host.as_str())
    }

    /// `user@host`, regardless of whether the node is local.
    #[must_use]
    pub fn remote_label(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// `ssh user@host <extra_args...>`
    #[must_use]
    pub fn ssh_command<I, S>(&self, extra_args: I) -> ExternalCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = std::iter::once(self.remote_label())
            .chain(extra_args.into_iter().map(Into::into));
        ExternalCommand::new(SSH, args)
    }

    /// Where rsync should write `folder` on this node.
    ///
    /// This is the only place local and remote addressing diverge for file
    /// transfer: local nodes get the bare folder, remote ones `user@host:folder`.
    #[must_use]
    pub fn rsync_target(&self, folder: &str) -> String {
        if self.is_local() {
            folder.to_string()
        } else {
            format!("{}:{folder}", self.remote_label())
        }
    }

    /// `rsync <source> <target>`.
    ///
    /// The source is passed through untouched: a trailing separator syncs the
    /// directory's contents, none syncs the directory itself as a nested entry.
    /// Use [`contents_of`] to get the former.
    #[must_use]
    pub fn rsync_command(&self, source: &str, target_folder: &str) -> ExternalCommand {
        ExternalCommand::new(RSYNC, [source.to_string(), self.rsync_target(target_folder)])
    }

    /// Normalise this node for joining a project as a worker.
    ///
    /// An empty project is filled in with `active_project`. The node is
    /// always demoted from master and its OS pinned to [`DEFAULT_OS`].
    pub fn provision_as_worker(&mut self, active_project: &str) {
        if self.project.is_empty() {
            self.project = active_project.to_string();
        }
        self.is_master = false;
        self.os = default_os();
    }
}

/// `dir` with a trailing platform separator, so rsync copies what is inside it.
#[must_use]
pub fn contents_of(dir: &std::path::Path) -> String {
    let mut source = dir.display().to_string();
    if !source.ends_with(std::path::MAIN_SEPARATOR) {
        source.push(std::path::MAIN_SEPARATOR);
    }
    source
}
