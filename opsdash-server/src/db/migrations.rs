//! Schema setup for readings and rules

use sqlx::PgPool;

/// Create tables and indexes if they are missing. Safe to run on every start.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running opsdash migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS metric_readings (
            id BIGSERIAL PRIMARY KEY,
            metric_name TEXT NOT NULL,
            value DOUBLE PRECISION NOT NULL,
            recorded_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS alert_rules (
            id BIGSERIAL PRIMARY KEY,
            metric_name TEXT NOT NULL,
            operator TEXT NOT NULL,
            threshold DOUBLE PRECISION NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Recent-readings listing sorts on this
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_metric_readings_recorded ON metric_readings(recorded_at DESC, id DESC)",
    )
    .execute(pool)
    .await?;

    tracing::info!("opsdash migrations complete");
    Ok(())
}
