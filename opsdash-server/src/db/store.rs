//! Storage traits used by the HTTP handlers
//!
//! `PgStore` is the production backend; `MemoryStore` mirrors its observable
//! behavior for tests and `serve --ephemeral`.

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{AlertRepo, MetricRepo, StoreError};
use crate::models::{AlertRule, MetricReading, NewAlertRule, NewMetricReading};

#[async_trait]
pub trait MetricStore: Send + Sync {
    /// Up to `limit` readings, newest first.
    async fn recent(&self, limit: i64) -> Result<Vec<MetricReading>, StoreError>;

    async fn insert(&self, reading: NewMetricReading) -> Result<MetricReading, StoreError>;

    /// Remove one reading. Unknown ids are `StoreError::NotFound`.
    async fn delete(&self, id: i64) -> Result<MetricReading, StoreError>;
}

#[async_trait]
pub trait AlertStore: Send + Sync {
    async fn list(&self) -> Result<Vec<AlertRule>, StoreError>;

    async fn insert(&self, rule: NewAlertRule) -> Result<AlertRule, StoreError>;

    /// Remove one rule. Unknown ids are `StoreError::NotFound`.
    async fn delete(&self, id: i64) -> Result<AlertRule, StoreError>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricStore for PgStore {
    async fn recent(&self, limit: i64) -> Result<Vec<MetricReading>, StoreError> {
        MetricRepo::new(&self.pool).recent(limit).await
    }

    async fn insert(&self, reading: NewMetricReading) -> Result<MetricReading, StoreError> {
        MetricRepo::new(&self.pool).insert(reading).await
    }

    async fn delete(&self, id: i64) -> Result<MetricReading, StoreError> {
        MetricRepo::new(&self.pool).delete(id).await
    }
}

#[async_trait]
impl AlertStore for PgStore {
    async fn list(&self) -> Result<Vec<AlertRule>, StoreError> {
        AlertRepo::new(&self.pool).list().await
    }

    async fn insert(&self, rule: NewAlertRule) -> Result<AlertRule, StoreError> {
        AlertRepo::new(&self.pool).insert(rule).await
    }

    async fn delete(&self, id: i64) -> Result<AlertRule, StoreError> {
        AlertRepo::new(&self.pool).delete(id).await
    }
}
