//! Flat projections
//!
//! Shapes selected column by column straight from the store, with no
//! aggregate materialization in between.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::entities::{Address, OrderId, OrderStatus};

/// One order summarised for listing, read directly by the projection query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSimpleQueryDto {
    pub order_id: OrderId,
    pub name: String,
    pub order_date: NaiveDateTime,
    pub order_status: OrderStatus,
    pub address: Address,
}
