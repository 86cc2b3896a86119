//! `sctl service`: deploy, remove and distribute container services.

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ProjectRegistry;
use crate::application::services::{config_service, deploy};
use crate::domain::ServiceSpec;
use crate::output::json;

/// Service subcommands.
#[derive(Subcommand)]
pub enum ServiceCommand {
    /// Create the service on the master node
    Start {
        /// Service name (<services.dir>/<name>.json)
        name: String,
    },
    /// Remove the service from the master node
    Stop {
        /// Service name
        name: String,
    },
    /// Pull the service image on the master node
    Pull {
        /// Service name
        name: String,
        /// Pull on every worker node instead
        #[arg(long)]
        workers: bool,
    },
    /// Push the service image from this machine
    Push {
        /// Service name
        name: String,
    },
    /// Show a resolved service definition
    Show {
        /// Service name
        name: String,
    },
}

/// Run the service command.
///
/// # Errors
///
/// Returns an error if the definition cannot be loaded, the auth token has
/// expired, or the container engine reports a failure.
pub fn run(app: &AppContext, cmd: ServiceCommand) -> Result<()> {
    match cmd {
        ServiceCommand::Start { name } => {
            let service = load(app, &name)?;
            let output = deploy::start(
                &app.runner,
                &app.registry,
                &app.tokens,
                &service,
                Utc::now(),
            )?;
            report(app, &service, "started", &output)
        }
        ServiceCommand::Stop { name } => {
            let service = load(app, &name)?;
            let output = deploy::stop(
                &app.runner,
                &app.registry,
                &app.tokens,
                &service,
                Utc::now(),
            )?;
            report(app, &service, "stopped", &output)
        }
        ServiceCommand::Pull { name, workers } => {
            let service = load(app, &name)?;
            if workers {
                return pull_workers(app, &service);
            }
            let output = deploy::pull(
                &app.runner,
                &app.registry,
                &app.tokens,
                &service,
                Utc::now(),
            )?;
            report(app, &service, "pulled", &output)
        }
        ServiceCommand::Push { name } => {
            let service = load(app, &name)?;
            let output = deploy::push(&app.runner, &service)?;
            report(app, &service, "pushed", &output)
        }
        ServiceCommand::Show { name } => show(app, &name),
    }
}

fn load(app: &AppContext, name: &str) -> Result<ServiceSpec> {
    let config = config_service::load_config(&app.config_store)?;
    let project = app.registry.active_project()?;
    deploy::load_service(&config, &project, name)
}

fn report(app: &AppContext, service: &ServiceSpec, verb: &str, output: &str) -> Result<()> {
    if app.is_dry_run() {
        app.flush_dry_run();
        return Ok(());
    }
    if app.is_json() {
        return json::print(&serde_json::json!({
            "service": service.name,
            "action": verb,
            "output": output,
        }));
    }
    app.output.passthrough(output);
    app.output.success(&format!("Service '{}' {verb}", service.name));
    Ok(())
}

fn pull_workers(app: &AppContext, service: &ServiceSpec) -> Result<()> {
    let outcomes = deploy::pull_on_workers(
        &app.runner,
        &app.registry,
        &app.tokens,
        service,
        Utc::now(),
    )?;

    if app.is_dry_run() {
        app.flush_dry_run();
        return Ok(());
    }
    if app.is_json() {
        json::print(&outcomes)?;
    } else {
        for outcome in &outcomes {
            if outcome.ok {
                app.output.success(&format!("{}: pulled {}", outcome.host, service.image));
            } else {
                app.output
                    .error(&format!("{}: {}", outcome.host, outcome.output.trim()));
            }
        }
    }

    let failed = outcomes.iter().filter(|o| !o.ok).count();
    if failed > 0 {
        anyhow::bail!("pull failed on {failed} of {} worker(s)", outcomes.len());
    }
    Ok(())
}

fn show(app: &AppContext, name: &str) -> Result<()> {
    let service = load(app, name)?;
    let project = app.registry.active_project()?;
    let run = service.run_command(&project.network).to_string();

    if app.is_json() {
        return json::print(&serde_json::json!({
            "service": service,
            "run": run,
        }));
    }

    app.output.header(&service.name);
    app.output.kv("image", &service.image);
    app.output.kv("run  ", &run);
    Ok(())
}
