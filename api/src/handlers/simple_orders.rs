//! Simple order handlers
//!
//! Versioned endpoints serving orders without their line items.

use axum::{extract::State, Json};

use crate::app::{map_all, SimpleOrderDto};
use crate::domain::entities::Order;
use crate::domain::projections::OrderSimpleQueryDto;
use crate::domain::query::OrderSearch;
use crate::error::AppError;
use crate::AppState;

/// GET /api/v1/simple-orders
///
/// Raw aggregates with member and delivery resolved; `orderItems` is null.
pub async fn simple_orders_v1(
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state
        .order_query_service
        .load_orders_lazily_to_one(&OrderSearch::default())
        .await?;

    Ok(Json(orders))
}

/// GET /api/v2/simple-orders
///
/// DTOs mapped from lazily resolved aggregates (1 + 2N round trips).
pub async fn simple_orders_v2(
    State(state): State<AppState>,
) -> Result<Json<Vec<SimpleOrderDto>>, AppError> {
    let orders = state
        .order_query_service
        .load_orders_lazily_to_one(&OrderSearch::default())
        .await?;

    Ok(Json(map_all(&orders)?))
}

/// GET /api/v3/simple-orders
///
/// DTOs mapped from a single to-one JOIN fetch.
pub async fn simple_orders_v3(
    State(state): State<AppState>,
) -> Result<Json<Vec<SimpleOrderDto>>, AppError> {
    let orders = state
        .order_query_service
        .fetch_orders_to_one(&OrderSearch::default())
        .await?;

    Ok(Json(map_all(&orders)?))
}

/// GET /api/v4/simple-orders
///
/// Flat projection, no mapping step.
pub async fn simple_orders_v4(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderSimpleQueryDto>>, AppError> {
    let summaries = state.order_query_service.order_summaries().await?;

    Ok(Json(summaries))
}
