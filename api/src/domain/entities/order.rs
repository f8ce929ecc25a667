//! Order aggregate
//!
//! An order owns its line items and its delivery and references a member.
//! Every association is explicit: see [`Association`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::association::Association;
use super::delivery::{Delivery, DeliveryId};
use super::item::{Item, ItemId};
use super::member::{Member, MemberId};
use crate::error::NotFetched;

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an order line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderItemId(pub i64);

impl From<i64> for OrderItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Ordered,
    Canceled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Ordered => write!(f, "ORDERED"),
            OrderStatus::Canceled => write!(f, "CANCELED"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ORDERED" | "ORDER" => Ok(OrderStatus::Ordered),
            "CANCELED" | "CANCELLED" | "CANCEL" => Ok(OrderStatus::Canceled),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

/// One line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub item: Association<ItemId, Item>,
    pub order_price: i32,
    pub count: i32,
}

impl OrderItem {
    pub fn item(&self) -> Result<&Item, NotFetched> {
        self.item.get("order_item.item")
    }
}

/// The order aggregate root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub member: Association<MemberId, Member>,
    /// Keyed by the owning order's id while unloaded
    pub order_items: Association<OrderId, Vec<OrderItem>>,
    pub delivery: Association<DeliveryId, Delivery>,
    pub order_date: NaiveDateTime,
    pub status: OrderStatus,
}

impl Order {
    /// An order whose associations have not been fetched
    pub fn unloaded(
        id: OrderId,
        member_id: MemberId,
        delivery_id: DeliveryId,
        order_date: NaiveDateTime,
        status: OrderStatus,
    ) -> Self {
        Self {
            id,
            member: Association::Unloaded(member_id),
            order_items: Association::Unloaded(id),
            delivery: Association::Unloaded(delivery_id),
            order_date,
            status,
        }
    }

    pub fn member(&self) -> Result<&Member, NotFetched> {
        self.member.get("order.member")
    }

    pub fn delivery(&self) -> Result<&Delivery, NotFetched> {
        self.delivery.get("order.delivery")
    }

    pub fn order_items(&self) -> Result<&[OrderItem], NotFetched> {
        self.order_items.get("order.order_items").map(Vec::as_slice)
    }
}
