//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Operate a docker swarm of one master and many workers
#[derive(Parser)]
#[command(
    name = "sctl",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Print external commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage projects
    #[command(subcommand)]
    Project(commands::project::ProjectCommand),

    /// Manage master and worker nodes
    #[command(subcommand)]
    Node(commands::node::NodeCommand),

    /// Deploy and distribute services
    #[command(subcommand)]
    Service(commands::service::ServiceCommand),

    /// Copy the project folder to a node
    Sync(commands::sync::SyncArgs),

    /// Inspect and renew the auth token
    #[command(subcommand)]
    Token(commands::token::TokenCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            dry_run,
            yes,
            command,
        } = self;

        if let Command::Version = command {
            commands::version::run(json);
            return Ok(());
        }

        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes, dry_run },
        })?;

        match command {
            Command::Project(cmd) => commands::project::run(&app, cmd),
            Command::Node(cmd) => commands::node::run(&app, cmd),
            Command::Service(cmd) => commands::service::run(&app, cmd),
            Command::Sync(args) => commands::sync::run(&app, &args),
            Command::Token(cmd) => commands::token::run(&app, cmd),
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => Ok(()),
        }
    }
}
