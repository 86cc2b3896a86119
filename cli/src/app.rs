//! Application context: unified state passed to every command handler.

use anyhow::Result;

use crate::infra::command_runner::Runner;
use crate::infra::config::YamlConfigStore;
use crate::infra::registry::JsonRegistry;
use crate::infra::token_store::FileTokenStore;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `SCTL_YES` env vars).
    pub yes: bool,
    /// Print external commands instead of running them.
    pub dry_run: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Project and node registry.
    pub registry: JsonRegistry,
    /// Per-project token bundles.
    pub tokens: FileTokenStore,
    /// User configuration file.
    pub config_store: YamlConfigStore,
    /// Executes (or records, under `--dry-run`) external commands.
    pub runner: Runner,
    /// When `true`, skip interactive prompts and use defaults.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the state home directory cannot be determined.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("SCTL_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            registry: JsonRegistry::new()?,
            tokens: FileTokenStore,
            config_store: YamlConfigStore::default(),
            runner: Runner::new(flags.behaviour.dry_run),
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns `true` when external commands are only recorded.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        matches!(self.runner, Runner::DryRun(_))
    }

    /// Print every command recorded by a dry run, in execution order.
    pub fn flush_dry_run(&self) {
        for command in self.runner.take_recorded() {
            self.output.dry_run(&command);
        }
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `SCTL_YES` env),
    /// returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
