//! In-process store with the same ordering and error behavior as `PgStore`.
//! Nothing survives a restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::repos::StoreError;
use super::store::{AlertStore, MetricStore};
use crate::models::{AlertRule, MetricReading, NewAlertRule, NewMetricReading};

#[derive(Default)]
pub struct MemoryStore {
    metrics: RwLock<Table<MetricReading>>,
    alerts: RwLock<Table<AlertRule>>,
}

/// Rows keyed by id, with a BIGSERIAL-style counter that never reuses ids.
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetricStore for MemoryStore {
    async fn recent(&self, limit: i64) -> Result<Vec<MetricReading>, StoreError> {
        let table = self.metrics.read().await;
        let mut rows: Vec<MetricReading> = table.rows.values().cloned().collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn insert(&self, reading: NewMetricReading) -> Result<MetricReading, StoreError> {
        let mut table = self.metrics.write().await;
        let row = MetricReading {
            id: table.next_id(),
            metric_name: reading.metric_name,
            value: reading.value,
            timestamp: reading.timestamp.unwrap_or_else(Utc::now),
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<MetricReading, StoreError> {
        self.metrics
            .write()
            .await
            .rows
            .remove(&id)
            .ok_or(StoreError::NotFound {
                resource: "metric reading",
                id,
            })
    }
}

#[async_trait]
impl AlertStore for MemoryStore {
    async fn list(&self) -> Result<Vec<AlertRule>, StoreError> {
        Ok(self.alerts.read().await.rows.values().cloned().collect())
    }

    async fn insert(&self, rule: NewAlertRule) -> Result<AlertRule, StoreError> {
        let mut table = self.alerts.write().await;
        let row = AlertRule {
            id: table.next_id(),
            metric_name: rule.metric_name,
            operator: rule.operator,
            threshold: rule.threshold,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<AlertRule, StoreError> {
        self.alerts
            .write()
            .await
            .rows
            .remove(&id)
            .ok_or(StoreError::NotFound {
                resource: "alert rule",
                id,
            })
    }
}
