//! SeaORM entities
//!
//! Table mappings for the order schema. Domain code never sees these types;
//! adapters convert them into `crate::domain::entities`.

pub mod deliveries;
pub mod items;
pub mod members;
pub mod order_items;
pub mod orders;
