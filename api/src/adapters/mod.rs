//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;

pub use postgres::{create_schema, seed_demo_data, PostgresOrderRepository};
