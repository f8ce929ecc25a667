//! Application layer
//!
//! Contains use cases and service orchestration.
//! - `order_query_service`: one method per order retrieval strategy
//! - `mapping`: pure conversions from loaded aggregates to transfer objects

pub mod mapping;
pub mod order_query_service;

pub use mapping::{map_all, OrderDto, SimpleOrderDto};
pub use order_query_service::OrderQueryService;
