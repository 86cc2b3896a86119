//! Infrastructure implementations of the `CommandRunner` port.
//!
//! `ProcessRunner` spawns real processes and blocks until they exit.
//! `DryRunRunner` records what would have run and runs nothing.

use std::cell::RefCell;

use sctl_common::{CommandError, ExternalCommand};

use crate::application::ports::CommandRunner;

/// Production `CommandRunner`: one fresh subprocess per call, no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &ExternalCommand) -> Result<String, CommandError> {
        command.execute()
    }
}

/// Records commands instead of running them (`--dry-run`).
#[derive(Debug, Default)]
pub struct DryRunRunner {
    recorded: RefCell<Vec<ExternalCommand>>,
}

impl DryRunRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far.
    pub fn take_recorded(&self) -> Vec<ExternalCommand> {
        self.recorded.take()
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, command: &ExternalCommand) -> Result<String, CommandError> {
        tracing::debug!(command = %command, "dry run");
        self.recorded.borrow_mut().push(command.clone());
        Ok(String::new())
    }
}

/// Runner selected at startup from the `--dry-run` flag.
#[derive(Debug)]
pub enum Runner {
    Process(ProcessRunner),
    DryRun(DryRunRunner),
}

impl Runner {
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        if dry_run {
            Self::DryRun(DryRunRunner::new())
        } else {
            Self::Process(ProcessRunner)
        }
    }

    /// Commands recorded by a dry run; always empty for real execution.
    pub fn take_recorded(&self) -> Vec<ExternalCommand> {
        match self {
            Self::Process(_) => Vec::new(),
            Self::DryRun(r) => r.take_recorded(),
        }
    }
}

impl CommandRunner for Runner {
    fn run(&self, command: &ExternalCommand) -> Result<String, CommandError> {
        match self {
            Self::Process(r) => r.run(command),
            Self::DryRun(r) => r.run(command),
        }
    }
}
