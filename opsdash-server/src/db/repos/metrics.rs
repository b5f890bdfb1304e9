//! Metric reading repository
//!
//! - recent: newest first, bounded by the caller
//! - insert: timestamp defaults to NOW() in the database
//! - delete: by primary key, fails with NotFound when nothing matched

use sqlx::PgPool;

use super::StoreError;
use crate::models::{MetricReading, NewMetricReading};

/// Metric reading repository
pub struct MetricRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MetricRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Most recent readings, descending by timestamp then id.
    pub async fn recent(&self, limit: i64) -> Result<Vec<MetricReading>, StoreError> {
        let rows: Vec<MetricReading> = sqlx::query_as(
            r#"
            SELECT id, metric_name, value, recorded_at
            FROM metric_readings
            ORDER BY recorded_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a reading and return the stored row.
    pub async fn insert(&self, reading: NewMetricReading) -> Result<MetricReading, StoreError> {
        let row: MetricReading = sqlx::query_as(
            r#"
            INSERT INTO metric_readings (metric_name, value, recorded_at)
            VALUES ($1, $2, COALESCE($3::timestamptz, NOW()))
            RETURNING id, metric_name, value, recorded_at
            "#,
        )
        .bind(&reading.metric_name)
        .bind(reading.value)
        .bind(reading.timestamp)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Delete a reading by id, returning the removed row.
    pub async fn delete(&self, id: i64) -> Result<MetricReading, StoreError> {
        sqlx::query_as(
            r#"
            DELETE FROM metric_readings
            WHERE id = $1
            RETURNING id, metric_name, value, recorded_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            resource: "metric reading",
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    // Run with: DATABASE_URL=... cargo test -p opsdash-server -- --ignored

    async fn repo_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_then_recent_then_delete() {
        let pool = repo_pool().await;
        let repo = MetricRepo::new(&pool);

        let stored = repo
            .insert(NewMetricReading {
                metric_name: "repo-test".into(),
                value: 1.25,
                timestamp: None,
            })
            .await
            .expect("insert failed");

        let recent = repo.recent(100).await.expect("recent failed");
        assert!(recent.iter().any(|r| r.id == stored.id));

        let removed = repo.delete(stored.id).await.expect("delete failed");
        assert_eq!(removed.id, stored.id);

        let err = repo.delete(stored.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn nan_values_round_trip() {
        let pool = repo_pool().await;
        let repo = MetricRepo::new(&pool);

        let stored = repo
            .insert(NewMetricReading {
                metric_name: "repo-nan".into(),
                value: f64::NAN,
                timestamp: None,
            })
            .await
            .expect("insert failed");
        assert!(stored.value.is_nan());

        repo.delete(stored.id).await.expect("cleanup failed");
    }
}
