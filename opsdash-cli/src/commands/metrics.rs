//! `opsdash metrics` - record, list and delete metric readings

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};

use super::client::{ApiClient, Reading};
use super::{resolve_output, OutputFormat};

#[derive(Parser, Debug)]
pub struct MetricsArgs {
    #[command(subcommand)]
    pub command: MetricsCommands,
}

#[derive(Subcommand, Debug)]
pub enum MetricsCommands {
    /// List the 100 most recent readings, newest first
    List(ListArgs),
    /// Record a reading
    Add(AddArgs),
    /// Delete a reading by id
    Delete(DeleteArgs),
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Metric name (e.g. cpu_usage)
    pub name: String,

    /// Reading value
    #[arg(allow_hyphen_values = true)]
    pub value: String,

    /// Reading time (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long, short)]
    pub timestamp: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Reading id
    pub id: String,
}

pub async fn run_metrics(args: MetricsArgs, endpoint: &str) -> Result<()> {
    let client = ApiClient::new(endpoint)?;

    match args.command {
        MetricsCommands::List(list) => {
            let readings = client.list_metrics().await?;
            print_readings(&readings, resolve_output(list.output, list.json))?;
        }
        MetricsCommands::Add(add) => {
            let reading = client
                .create_metric(&add.name, &add.value, add.timestamp.as_deref())
                .await?;
            println!("Recorded #{}: {}", reading.id, describe(&reading));
        }
        MetricsCommands::Delete(delete) => {
            let resp = client.delete_metric(&delete.id).await?;
            println!("{}", resp.message);
        }
    }

    Ok(())
}

fn print_readings(readings: &[Reading], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(readings)?);
        }
        OutputFormat::Quiet => {
            for r in readings {
                println!("{}", r.id);
            }
        }
        OutputFormat::Human => {
            if readings.is_empty() {
                println!("No metrics found");
            }
            for r in readings {
                println!("#{:<6} {}", r.id, describe(r));
            }
        }
    }
    Ok(())
}

/// `name = value @ local time`, the way the dashboard shows a reading.
fn describe(r: &Reading) -> String {
    let value = r
        .value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "NaN".to_string());
    let when = DateTime::parse_from_rfc3339(&r.timestamp)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|_| r.timestamp.clone());
    format!("{} = {} @ {}", r.metric_name, value, when)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_handles_missing_value() {
        let r = Reading {
            id: 1,
            metric_name: "cpu".into(),
            value: None,
            timestamp: "garbage".into(),
        };
        assert_eq!(describe(&r), "cpu = NaN @ garbage");
    }

    #[test]
    fn describe_formats_value() {
        let r = Reading {
            id: 2,
            metric_name: "mem".into(),
            value: Some(0.5),
            timestamp: "2024-01-01T00:00:00Z".into(),
        };
        assert!(describe(&r).starts_with("mem = 0.5 @ "));
    }
}
