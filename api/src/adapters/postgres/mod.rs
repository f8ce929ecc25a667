//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod order_repo;
pub mod seed;


pub use order_repo::PostgresOrderRepository;
pub use seed::{create_schema, seed_demo_data};
