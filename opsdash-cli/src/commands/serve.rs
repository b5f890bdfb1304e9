//! HTTP server command
//!
//! Runs the opsdash API and dashboard, backed by PostgreSQL or, with
//! `--ephemeral`, by an in-process store.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use opsdash_server::db::{create_pool, migrations};
use opsdash_server::http::{run_server, AppState, ServerConfig};

use crate::config::OpsdashConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to [default: 127.0.0.1:3030]
    #[arg(long, short = 'b', env = "OPSDASH_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Keep everything in memory instead of PostgreSQL (lost on exit).
    /// Any database URL is ignored.
    #[arg(long)]
    pub ephemeral: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &OpsdashConfig) -> Result<()> {
    let file = config.server();
    let defaults = ServerConfig::default();

    let server_config = ServerConfig {
        bind_addr: args.bind.or(file.bind).unwrap_or(defaults.bind_addr),
        cors_permissive: args.cors_permissive || file.cors_permissive.unwrap_or(false),
    };

    let state = if args.ephemeral {
        tracing::warn!("Ephemeral mode: readings and rules are kept in memory only");
        AppState::in_memory()
    } else {
        let database_url = args.database_url.or(file.database_url).context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, ~/.opsdash/.env, \
             or [server].database_url in config.toml (or use --ephemeral)",
        )?;

        let pool = create_pool(&database_url)
            .await
            .context("Failed to create database pool")?;
        migrations::run(&pool)
            .await
            .context("Failed to run database migrations")?;
        AppState::postgres(pool)
    };

    tracing::info!("Starting opsdash server on {}", server_config.bind_addr);

    // Blocks until shutdown
    run_server(state, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
