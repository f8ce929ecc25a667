//! Test utilities
//!
//! Manual port implementations and test fixtures for unit and endpoint tests.
//!
//! The in-memory repository mirrors the join semantics of the PostgreSQL
//! adapter and counts every call, so tests can assert round-trip costs.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
