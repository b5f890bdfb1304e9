//! opsdash configuration file and the `config` subcommand
//!
//! Precedence for every setting: flag / environment > config.toml > default.
//! The file is optional; a missing file is an empty config.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// Default API endpoint for the client subcommands
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3030";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpsdashConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientSection>,
}

/// `[server]` - settings for `opsdash serve`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<SocketAddr>,
    pub database_url: Option<String>,
    pub cors_permissive: Option<bool>,
}

/// `[client]` - settings for `opsdash metrics` / `opsdash alerts`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientSection {
    pub endpoint: Option<String>,
}

impl OpsdashConfig {
    /// Load from `config_path()`, or an empty config when the file is absent.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))
    }

    /// `$OPSDASH_CONFIG`, else `~/.opsdash/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("OPSDASH_CONFIG") {
            return PathBuf::from(path);
        }
        Self::home_dir().join("config.toml")
    }

    /// `~/.opsdash`, also where the optional `.env` lives.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".opsdash")
    }

    /// Endpoint from the file, falling back to the default.
    pub fn endpoint(&self) -> String {
        self.client
            .as_ref()
            .and_then(|c| c.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn server(&self) -> ServerSection {
        self.server.clone().unwrap_or_default()
    }
}

/// Load `.env` from the working directory, then `~/.opsdash/.env`.
/// Existing variables are never overwritten.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let _ = dotenvy::from_path(OpsdashConfig::home_dir().join(".env"));
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the loaded config file as TOML
    Show,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", OpsdashConfig::config_path().display());
        }
        ConfigCommands::Show => {
            let config = OpsdashConfig::load()?;
            let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
            if rendered.trim().is_empty() {
                println!("# no settings (using defaults)");
            } else {
                print!("{}", rendered);
            }
        }
    }
    Ok(())
}
