//! External command synthesis and synchronous execution.

use std::borrow::Cow;
use std::fmt;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::error::CommandError;
use crate::node::NodeAddress;

/// Container engine binary.
pub const DOCKER: &str = "docker";
/// Remote shell binary.
pub const SSH: &str = "ssh";
/// File synchronisation binary.
pub const RSYNC: &str = "rsync";

/// A program plus its ordered arguments.
///
/// Each argument is handed to the OS as its own element. Only the remote
/// half of an ssh invocation is ever re-parsed by a shell, see
/// [`TargetedCommand::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCommand {
    #[serde(alias = "main")]
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ExternalCommand {
    #[must_use]
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a container-engine command. All engine invocations go through here.
    #[must_use]
    pub fn docker<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(DOCKER, args)
    }

    /// Program followed by its arguments, as one flat list.
    #[must_use]
    pub fn to_argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Spawn the program, block until it exits and capture its output.
    ///
    /// Returns captured stdout on success. A non-zero exit returns
    /// [`CommandError::ExitedNonZero`] carrying the captured stderr.
    /// There is no retry and no timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::SpawnFailed`] when the program cannot be started
    /// and [`CommandError::ExitedNonZero`] when it exits unsuccessfully.
    pub fn execute(&self) -> Result<String, CommandError> {
        tracing::debug!(command = %self, "executing");
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CommandError::SpawnFailed {
                command: self.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::warn!(command = %self, code = ?output.status.code(), "command failed");
            return Err(CommandError::ExitedNonZero {
                command: self.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// `program arg1 arg2 ...`, in exactly the order used for execution.
impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.args.join(" "))
    }
}

/// A command together with the node it has to run on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetedCommand {
    pub node: NodeAddress,
    pub command: ExternalCommand,
}

impl TargetedCommand {
    #[must_use]
    pub fn new(node: NodeAddress, command: ExternalCommand) -> Self {
        Self { node, command }
    }

    /// The command that actually has to be spawned on this machine.
    ///
    /// Local nodes run the command directly; remote ones get it wrapped in
    /// `ssh user@host <program> <args...>`.
    ///
    /// ssh joins everything after the destination into one line for the
    /// remote login shell, so each remote word is shell-quoted here. The
    /// remote side then sees exactly the argv a local run would.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Unquotable`] when a remote argument contains a
    /// NUL byte, which no shell word can carry.
    pub fn resolve(&self) -> Result<ExternalCommand, CommandError> {
        if self.node.is_local() {
            return Ok(self.command.clone());
        }
        let remote = self
            .command
            .to_argv()
            .iter()
            .map(|arg| {
                shlex::try_quote(arg)
                    .map(Cow::into_owned)
                    .map_err(|_| CommandError::Unquotable {
                        command: self.command.to_string(),
                        argument: arg.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.node.ssh_command(remote))
    }
}
