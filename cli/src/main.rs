//! sctl - docker swarm control for one master and many workers

use clap::Parser;
use sctl_cli::cli::Cli;
use sctl_cli::output::json;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SCTL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = cli.run() {
        match json_mode.then(|| json::format_error(&e.to_string(), json::error_code(&e))) {
            Some(Ok(doc)) => eprintln!("{doc}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }
}
