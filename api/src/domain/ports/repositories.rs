//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//!
//! Every method is exactly one store round trip.

use async_trait::async_trait;

use crate::domain::entities::{
    Delivery, DeliveryId, Item, ItemId, Member, MemberId, Order, OrderId, OrderItem,
};
use crate::domain::projections::OrderSimpleQueryDto;
use crate::domain::query::OrderQuery;
use crate::error::DomainError;

/// Read access to the order aggregate
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find orders matching the query's search predicate, loading the
    /// associations its fetch shape covers. Ordered by order id.
    async fn find_orders(&self, query: &OrderQuery) -> Result<Vec<Order>, DomainError>;

    /// Find a member by ID (lazy to-one resolution)
    async fn find_member(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Find a delivery by ID (lazy to-one resolution)
    async fn find_delivery(&self, id: &DeliveryId) -> Result<Option<Delivery>, DomainError>;

    /// Find the line items of an order (lazy to-many resolution).
    /// The items they reference are left unloaded.
    async fn find_order_items(&self, order_id: &OrderId) -> Result<Vec<OrderItem>, DomainError>;

    /// Find a catalog item by ID (lazy to-one resolution)
    async fn find_item(&self, id: &ItemId) -> Result<Option<Item>, DomainError>;

    /// Flat projection of every order into its listing shape
    async fn find_order_summaries(&self) -> Result<Vec<OrderSimpleQueryDto>, DomainError>;
}
