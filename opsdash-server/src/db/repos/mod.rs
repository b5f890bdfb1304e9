//! Repository implementations for database access
//!
//! Each repository wraps a borrowed pool and issues exactly one statement
//! per call. Deletes use `RETURNING` so a missing row is detected without a
//! separate lookup.

pub mod alerts;
pub mod metrics;

pub use alerts::AlertRepo;
pub use metrics::MetricRepo;

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },
}
