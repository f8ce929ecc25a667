//! Order query service
//!
//! One method per retrieval strategy. Association resolution happens here,
//! in plain sight, one repository call per round trip, so the cost of each
//! strategy can be read off the code and the debug log.

use std::sync::Arc;

use crate::domain::entities::{Association, Order};
use crate::domain::ports::OrderRepository;
use crate::domain::projections::OrderSimpleQueryDto;
use crate::domain::query::{OrderQuery, OrderSearch, Page};
use crate::error::{AppError, DomainError};

/// Store round trips spent serving one request
#[derive(Debug, Default)]
struct RoundTrips(usize);

impl RoundTrips {
    fn record(&mut self) {
        self.0 += 1;
    }

    fn report(&self, strategy: &'static str, orders: usize) {
        tracing::debug!(strategy, orders, round_trips = self.0, "Orders loaded");
    }
}

/// Service exposing every order retrieval strategy
pub struct OrderQueryService<R>
where
    R: OrderRepository + ?Sized,
{
    orders: Arc<R>,
}

impl<R> OrderQueryService<R>
where
    R: OrderRepository + ?Sized,
{
    pub fn new(orders: Arc<R>) -> Self {
        Self { orders }
    }

    /// Naive load, then resolve every association one round trip at a time.
    ///
    /// Costs `1 + 3N + (lines)` round trips for N orders.
    pub async fn load_orders_lazily(&self, search: &OrderSearch) -> Result<Vec<Order>, AppError> {
        let mut trips = RoundTrips::default();
        let mut orders = self
            .fetch(&OrderQuery::lazy(search.clone()), &mut trips)
            .await?;

        for order in &mut orders {
            self.resolve_to_one(order, &mut trips).await?;
            self.resolve_lines(order, &mut trips).await?;
        }

        trips.report("lazy_all", orders.len());
        Ok(orders)
    }

    /// Naive load, then resolve member and delivery only. Line items stay unloaded.
    ///
    /// Costs `1 + 2N` round trips.
    pub async fn load_orders_lazily_to_one(
        &self,
        search: &OrderSearch,
    ) -> Result<Vec<Order>, AppError> {
        let mut trips = RoundTrips::default();
        let mut orders = self
            .fetch(&OrderQuery::lazy(search.clone()), &mut trips)
            .await?;

        for order in &mut orders {
            self.resolve_to_one(order, &mut trips).await?;
        }

        trips.report("lazy_to_one", orders.len());
        Ok(orders)
    }

    /// Member and delivery joined in one round trip.
    pub async fn fetch_orders_to_one(&self, search: &OrderSearch) -> Result<Vec<Order>, AppError> {
        let mut trips = RoundTrips::default();
        let orders = self
            .fetch(&OrderQuery::to_one(search.clone()), &mut trips)
            .await?;

        trips.report("to_one", orders.len());
        Ok(orders)
    }

    /// Everything joined in one round trip. Not paginated.
    pub async fn fetch_orders_with_items(
        &self,
        search: &OrderSearch,
    ) -> Result<Vec<Order>, AppError> {
        let mut trips = RoundTrips::default();
        let orders = self
            .fetch(&OrderQuery::full(search.clone()), &mut trips)
            .await?;

        trips.report("full", orders.len());
        Ok(orders)
    }

    /// One page of to-one joined orders, then line items resolved per order.
    ///
    /// Costs `1 + N + (lines)` round trips for a page of N orders.
    pub async fn fetch_orders_page(
        &self,
        search: &OrderSearch,
        page: Page,
    ) -> Result<Vec<Order>, AppError> {
        let mut trips = RoundTrips::default();
        if page.limit == 0 {
            trips.report("to_one_page", 0);
            return Ok(Vec::new());
        }

        let mut orders = self
            .fetch(&OrderQuery::to_one_page(search.clone(), page), &mut trips)
            .await?;

        for order in &mut orders {
            self.resolve_lines(order, &mut trips).await?;
        }

        trips.report("to_one_page", orders.len());
        Ok(orders)
    }

    /// Flat projection straight into the listing shape.
    pub async fn order_summaries(&self) -> Result<Vec<OrderSimpleQueryDto>, AppError> {
        let mut trips = RoundTrips::default();
        trips.record();
        let summaries = self.orders.find_order_summaries().await?;

        trips.report("projection", summaries.len());
        Ok(summaries)
    }

    async fn fetch(
        &self,
        query: &OrderQuery,
        trips: &mut RoundTrips,
    ) -> Result<Vec<Order>, DomainError> {
        trips.record();
        self.orders.find_orders(query).await
    }

    async fn resolve_to_one(
        &self,
        order: &mut Order,
        trips: &mut RoundTrips,
    ) -> Result<(), DomainError> {
        if let Some(member_id) = order.member.pending() {
            trips.record();
            let member = self.orders.find_member(&member_id).await?.ok_or_else(|| {
                DomainError::Internal(format!(
                    "order {} references missing member {}",
                    order.id, member_id
                ))
            })?;
            order.member.resolve(member);
        }

        if let Some(delivery_id) = order.delivery.pending() {
            trips.record();
            let delivery = self
                .orders
                .find_delivery(&delivery_id)
                .await?
                .ok_or_else(|| {
                    DomainError::Internal(format!(
                        "order {} references missing delivery {}",
                        order.id, delivery_id
                    ))
                })?;
            order.delivery.resolve(delivery);
        }

        Ok(())
    }

    async fn resolve_lines(
        &self,
        order: &mut Order,
        trips: &mut RoundTrips,
    ) -> Result<(), DomainError> {
        if let Some(order_id) = order.order_items.pending() {
            trips.record();
            let lines = self.orders.find_order_items(&order_id).await?;
            order.order_items.resolve(lines);
        }

        if let Association::Loaded(lines) = &mut order.order_items {
            for line in lines.iter_mut() {
                if let Some(item_id) = line.item.pending() {
                    trips.record();
                    let item = self.orders.find_item(&item_id).await?.ok_or_else(|| {
                        DomainError::Internal(format!(
                            "order {} references missing item {}",
                            order.id, item_id
                        ))
                    })?;
                    line.item.resolve(item);
                }
            }
        }

        Ok(())
    }
}
