//! Application service: run a command on the node it targets.

use sctl_common::{CommandError, TargetedCommand};

use crate::application::ports::CommandRunner;

/// Run `targeted` on its node: directly when local, over ssh otherwise.
///
/// # Errors
///
/// Returns [`CommandError::Unquotable`] when a remote argument cannot be
/// shell-quoted. Otherwise returns the runner's [`CommandError`] untouched
/// so the remote tool's diagnostics reach the caller verbatim.
pub fn run_targeted(
    runner: &impl CommandRunner,
    targeted: &TargetedCommand,
) -> Result<String, CommandError> {
    let command = targeted.resolve()?;
    tracing::debug!(host = %targeted.node.host, command = %command, "dispatching");
    runner.run(&command)
}
