//! Domain entities
//!
//! Pure domain models for the order aggregate and what it references.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod address;
pub mod association;
pub mod delivery;
pub mod item;
pub mod member;
pub mod order;

pub use address::Address;
pub use association::Association;
pub use delivery::{Delivery, DeliveryId, DeliveryStatus};
pub use item::{Item, ItemId};
pub use member::{Member, MemberId};
pub use order::{Order, OrderId, OrderItem, OrderItemId, OrderStatus};
