//! opsdash CLI - metrics-and-alerts dashboard
//!
//! Entry point for:
//! - Running the HTTP API and dashboard page (`serve`, with `server` feature)
//! - Recording and listing metric readings (`metrics`)
//! - Managing alert rules (`alerts`)
//! - Inspecting configuration (`config`)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::OpsdashConfig;

#[derive(Parser, Debug)]
#[command(
    name = "opsdash",
    author,
    version,
    about = "Record metric readings and alert rules, and serve the dashboard for them"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    /// API endpoint for client commands [default: http://127.0.0.1:3030]
    #[arg(long, env = "OPSDASH_ENDPOINT", global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server and dashboard
    #[cfg(feature = "server")]
    Serve(commands::serve::ServeArgs),
    /// Record, list and delete metric readings
    Metrics(commands::metrics::MetricsArgs),
    /// Create, list and delete alert rules
    Alerts(commands::alerts::AlertsArgs),
    /// Show configuration file location and contents
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve(args) => commands::run_serve(args, &OpsdashConfig::load()?).await?,
        Commands::Metrics(args) => {
            commands::run_metrics(args, &resolve_endpoint(cli.endpoint)?).await?
        }
        Commands::Alerts(args) => {
            commands::run_alerts(args, &resolve_endpoint(cli.endpoint)?).await?
        }
        // Loads the file itself so `config path` survives a broken one
        Commands::Config(args) => config::run_config(args)?,
    }
    Ok(())
}

/// Endpoint priority: flag/env > config.toml > default
fn resolve_endpoint(flag: Option<String>) -> Result<String> {
    match flag {
        Some(endpoint) => Ok(endpoint),
        None => Ok(OpsdashConfig::load()?.endpoint()),
    }
}
