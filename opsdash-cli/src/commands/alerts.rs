//! `opsdash alerts` - manage alert rules

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::client::{ApiClient, Rule};
use super::{resolve_output, OutputFormat};

/// Operators the dashboard offers. The server stores whatever it is sent.
const DASHBOARD_OPERATORS: [&str; 4] = [">", "<", ">=", "<="];

#[derive(Parser, Debug)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommands,
}

#[derive(Subcommand, Debug)]
pub enum AlertsCommands {
    /// List all alert rules
    List(ListArgs),
    /// Create an alert rule
    Add(AddArgs),
    /// Delete an alert rule by id
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
    /// Metric name the rule refers to
    pub name: String,

    /// Comparison operator (>, <, >=, <=)
    pub operator: String,

    /// Threshold value
    #[arg(allow_hyphen_values = true)]
    pub threshold: String,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Rule id
    pub id: String,
}

pub async fn run_alerts(args: AlertsArgs, endpoint: &str) -> Result<()> {
    let client = ApiClient::new(endpoint)?;

    match args.command {
        AlertsCommands::List(list) => {
            let rules = client.list_alerts().await?;
            print_rules(&rules, resolve_output(list.output, list.json))?;
        }
        AlertsCommands::Add(add) => {
            if !is_dashboard_operator(&add.operator) {
                tracing::warn!(operator = %add.operator, "operator is not one the dashboard offers");
            }
            let rule = client
                .create_alert(&add.name, &add.operator, &add.threshold)
                .await?;
            println!("Created rule #{}: {}", rule.id, describe(&rule));
        }
        AlertsCommands::Delete(delete) => {
            let resp = client.delete_alert(&delete.id).await?;
            println!("{}", resp.message);
        }
    }

    Ok(())
}

fn print_rules(rules: &[Rule], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rules)?);
        }
        OutputFormat::Quiet => {
            for r in rules {
                println!("{}", r.id);
            }
        }
        OutputFormat::Human => {
            if rules.is_empty() {
                println!("No alerts found");
            }
            for r in rules {
                println!("#{:<6} {}", r.id, describe(r));
            }
        }
    }
    Ok(())
}

fn describe(r: &Rule) -> String {
    let threshold = r
        .threshold
        .map(|t| t.to_string())
        .unwrap_or_else(|| "NaN".to_string());
    format!("{} {} {}", r.metric_name, r.operator, threshold)
}

fn is_dashboard_operator(operator: &str) -> bool {
    DASHBOARD_OPERATORS.contains(&operator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_rule() {
        let r = Rule {
            id: 1,
            metric_name: "cpu".into(),
            operator: ">=".into(),
            threshold: Some(90.0),
        };
        assert_eq!(describe(&r), "cpu >= 90");
    }

    #[test]
    fn dashboard_operators() {
        for op in [">", "<", ">=", "<="] {
            assert!(is_dashboard_operator(op));
        }
        assert!(!is_dashboard_operator("=="));
        assert!(!is_dashboard_operator(" >"));
    }
}
