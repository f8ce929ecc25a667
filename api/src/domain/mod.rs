//! Domain layer
//!
//! Contains pure domain logic with no external dependencies.
//! - `entities`: The order aggregate and the entities it references
//! - `query`: Search predicates and fetch shapes for order retrieval
//! - `projections`: Flat shapes read directly by projection queries
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
pub mod projections;
pub mod query;
