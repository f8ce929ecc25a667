//! Order handlers
//!
//! Versioned endpoints serving orders with their line items. Each version
//! binds one retrieval strategy to one response shape.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::app::{map_all, OrderDto};
use crate::domain::entities::Order;
use crate::domain::query::{OrderSearch, Page, DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_OFFSET};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for paginated order listing
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_offset")]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_offset() -> i64 {
    DEFAULT_PAGE_OFFSET
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

/// GET /api/v1/orders
///
/// Raw aggregates, every association resolved lazily before serialization.
pub async fn orders_v1(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state
        .order_query_service
        .load_orders_lazily(&OrderSearch::default())
        .await?;

    Ok(Json(orders))
}

/// GET /api/v2/orders
///
/// DTOs mapped from lazily resolved aggregates (N+1 round trips).
pub async fn orders_v2(State(state): State<AppState>) -> Result<Json<Vec<OrderDto>>, AppError> {
    let orders = state
        .order_query_service
        .load_orders_lazily(&OrderSearch::default())
        .await?;

    Ok(Json(map_all(&orders)?))
}

/// GET /api/v3/orders
///
/// DTOs mapped from a single JOIN fetch including line items.
pub async fn orders_v3(State(state): State<AppState>) -> Result<Json<Vec<OrderDto>>, AppError> {
    let orders = state
        .order_query_service
        .fetch_orders_with_items(&OrderSearch::default())
        .await?;

    Ok(Json(map_all(&orders)?))
}

/// GET /api/v3.1/orders?offset=0&limit=100
///
/// DTOs mapped from a paginated to-one JOIN fetch; line items resolved per order.
pub async fn orders_v3_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<OrderDto>>, AppError> {
    let page = Page::new(params.offset, params.limit)?;
    let orders = state
        .order_query_service
        .fetch_orders_page(&OrderSearch::default(), page)
        .await?;

    Ok(Json(map_all(&orders)?))
}
