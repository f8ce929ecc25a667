//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod orders;
pub mod simple_orders;

pub use orders::{orders_v1, orders_v2, orders_v3, orders_v3_page};
pub use simple_orders::{simple_orders_v1, simple_orders_v2, simple_orders_v3, simple_orders_v4};
