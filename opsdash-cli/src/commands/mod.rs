//! Command implementations for the opsdash CLI

pub mod alerts;
pub mod client;
pub mod metrics;
#[cfg(feature = "server")]
pub mod serve;

pub use alerts::run_alerts;
pub use metrics::run_metrics;
#[cfg(feature = "server")]
pub use serve::run_serve;

use clap::ValueEnum;

/// Output format shared by the client subcommands
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
    /// Quiet mode - IDs only
    Quiet,
}

/// `--json` wins over `--output`
pub fn resolve_output(output: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else {
        output
    }
}
