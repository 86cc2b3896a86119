use thiserror::Error;

/// Failure to run an external program.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started at all (not found, not executable, ...).
    #[error("failed to spawn '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully. `stderr` is its captured diagnostics.
    #[error("'{command}' exited with {}: {}", display_code(*code), stderr.trim())]
    ExitedNonZero {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A remote argument cannot be expressed as a shell word (it contains NUL).
    #[error("cannot quote argument {argument:?} of '{command}' for the remote shell")]
    Unquotable { command: String, argument: String },
}

impl CommandError {
    /// Output captured from the failed process, verbatim.
    ///
    /// Spawn failures never produced any output, so this is empty for them.
    #[must_use]
    pub fn captured_output(&self) -> &str {
        match self {
            Self::SpawnFailed { .. } | Self::Unquotable { .. } => "",
            Self::ExitedNonZero { stderr, .. } => stderr,
        }
    }
}

fn display_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
