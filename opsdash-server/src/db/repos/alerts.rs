//! Alert rule repository

use sqlx::PgPool;

use super::StoreError;
use crate::models::{AlertRule, NewAlertRule};

/// Alert rule repository
pub struct AlertRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AlertRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All rules in creation order.
    pub async fn list(&self) -> Result<Vec<AlertRule>, StoreError> {
        let rows: Vec<AlertRule> = sqlx::query_as(
            "SELECT id, metric_name, operator, threshold FROM alert_rules ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn insert(&self, rule: NewAlertRule) -> Result<AlertRule, StoreError> {
        let row: AlertRule = sqlx::query_as(
            r#"
            INSERT INTO alert_rules (metric_name, operator, threshold)
            VALUES ($1, $2, $3)
            RETURNING id, metric_name, operator, threshold
            "#,
        )
        .bind(&rule.metric_name)
        .bind(&rule.operator)
        .bind(rule.threshold)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> Result<AlertRule, StoreError> {
        sqlx::query_as(
            r#"
            DELETE FROM alert_rules
            WHERE id = $1
            RETURNING id, metric_name, operator, threshold
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            resource: "alert rule",
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_list_delete() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        let repo = AlertRepo::new(&pool);

        let rule = repo
            .insert(NewAlertRule {
                metric_name: "cpu".into(),
                operator: ">".into(),
                threshold: 90.0,
            })
            .await
            .expect("insert failed");

        let rules = repo.list().await.expect("list failed");
        assert!(rules.contains(&rule));

        repo.delete(rule.id).await.expect("delete failed");
        let rules = repo.list().await.expect("list failed");
        assert!(!rules.iter().any(|r| r.id == rule.id));
    }
}
