//! Database layer - connection pool, schema, repositories and stores
//!
//! - Connection pool (max 5 connections), shared by reference
//! - One statement per operation, no check-then-act
//! - Handlers talk to the `MetricStore` / `AlertStore` traits, never the pool

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use memory::MemoryStore;
pub use pool::create_pool;
pub use repos::{AlertRepo, MetricRepo, StoreError};
pub use store::{AlertStore, MetricStore, PgStore};
