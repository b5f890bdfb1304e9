//! opsdash-server: metric readings and alert rules over HTTP
//!
//! Records metric readings, stores alert rules, and serves the dashboard
//! page that drives both. Every API call is a single store operation.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, AlertStore, MemoryStore, MetricStore, PgStore, StoreError};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use models::{AlertRule, MetricReading, NewAlertRule, NewMetricReading};
