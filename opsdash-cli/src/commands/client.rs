//! Thin HTTP client for the opsdash JSON API

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

// ============================================================================
// API Response Types (matching server)
// ============================================================================

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: i64,
    pub metric_name: String,
    /// `None` when the server stored a non-number
    pub value: Option<f64>,
    pub timestamp: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: i64,
    pub metric_name: String,
    pub operator: String,
    pub threshold: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct IngestResponse {
    metric: Reading,
}

#[derive(Deserialize, Debug)]
struct CreatedRuleResponse {
    #[serde(rename = "newRule")]
    new_rule: Rule,
}

#[derive(Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize, Debug)]
struct ErrorResponse {
    error: String,
}

// ============================================================================
// Client
// ============================================================================

pub struct ApiClient {
    http: Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    pub async fn list_metrics(&self) -> Result<Vec<Reading>> {
        let response = self
            .http
            .get(self.url("/api/metrics"))
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.endpoint))?;
        handle_response(response).await
    }

    /// `value` and `timestamp` are sent as text; the server coerces them.
    pub async fn create_metric(
        &self,
        name: &str,
        value: &str,
        timestamp: Option<&str>,
    ) -> Result<Reading> {
        let mut body = json!({ "metricName": name, "value": value });
        if let Some(ts) = timestamp {
            body["timestamp"] = json!(ts);
        }

        let response = self
            .http
            .post(self.url("/api/metrics"))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.endpoint))?;
        let created: IngestResponse = handle_response(response).await?;
        Ok(created.metric)
    }

    pub async fn delete_metric(&self, id: &str) -> Result<MessageResponse> {
        self.delete("/api/metrics", id).await
    }

    pub async fn list_alerts(&self) -> Result<Vec<Rule>> {
        let response = self
            .http
            .get(self.url("/api/alerts"))
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.endpoint))?;
        handle_response(response).await
    }

    pub async fn create_alert(&self, name: &str, operator: &str, threshold: &str) -> Result<Rule> {
        let body = json!({ "metricName": name, "operator": operator, "threshold": threshold });
        let response = self
            .http
            .post(self.url("/api/alerts"))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.endpoint))?;
        let created: CreatedRuleResponse = handle_response(response).await?;
        Ok(created.new_rule)
    }

    pub async fn delete_alert(&self, id: &str) -> Result<MessageResponse> {
        self.delete("/api/alerts", id).await
    }

    async fn delete(&self, path: &str, id: &str) -> Result<MessageResponse> {
        let response = self
            .http
            .delete(self.url(path))
            .query(&[("id", id)])
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.endpoint))?;
        handle_response(response).await
    }
}

async fn handle_response<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json::<T>().await.context("Failed to parse response")
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match serde_json::from_str::<ErrorResponse>(&error_text) {
            Ok(error_resp) => Err(anyhow!("{}: {}", status, error_resp.error)),
            Err(_) => Err(anyhow!("{}: {}", status, error_text)),
        }
    }
}
