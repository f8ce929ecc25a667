//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::domain::entities::{
    Association, Delivery, DeliveryId, DeliveryStatus, Item, ItemId, Member, MemberId, Order,
    OrderId, OrderItem, OrderItemId, OrderStatus,
};
use crate::domain::ports::OrderRepository;
use crate::domain::projections::OrderSimpleQueryDto;
use crate::domain::query::{FetchShape, OrderQuery, OrderSearch};
use crate::error::DomainError;

use super::fixtures::{test_address, test_order_date};

// ============================================================================
// In-Memory Order Repository
// ============================================================================

#[derive(Debug, Clone)]
struct OrderRow {
    id: OrderId,
    member_id: MemberId,
    delivery_id: DeliveryId,
    status: OrderStatus,
}

#[derive(Debug, Clone)]
struct LineRow {
    id: OrderItemId,
    order_id: OrderId,
    item_id: ItemId,
    order_price: i32,
    count: i32,
}

#[derive(Default)]
struct Tables {
    members: HashMap<MemberId, Member>,
    deliveries: HashMap<DeliveryId, Delivery>,
    items: HashMap<ItemId, Item>,
    orders: Vec<OrderRow>,
    lines: Vec<LineRow>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Inner join on member, as every order query does
    fn matches(&self, row: &OrderRow, search: &OrderSearch) -> bool {
        let Some(member) = self.members.get(&row.member_id) else {
            return false;
        };
        search.order_status.map_or(true, |s| s == row.status)
            && search
                .member_name()
                .map_or(true, |name| member.name.contains(name))
    }

    fn to_one(&self, row: &OrderRow) -> Option<Order> {
        let member = self.members.get(&row.member_id)?;
        let delivery = self.deliveries.get(&row.delivery_id)?;
        let mut order = Order::unloaded(
            row.id,
            row.member_id,
            row.delivery_id,
            test_order_date(),
            row.status,
        );
        order.member.resolve(member.clone());
        order.delivery.resolve(delivery.clone());
        Some(order)
    }

    fn lines_of(&self, order_id: OrderId) -> impl Iterator<Item = &LineRow> {
        self.lines.iter().filter(move |l| l.order_id == order_id)
    }
}

/// Order store backed by hash maps, counting one round trip per call
#[derive(Default)]
pub struct InMemoryOrderRepository {
    tables: RwLock<Tables>,
    round_trips: AtomicUsize,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an order for a new member with the given (item name, price, count) lines
    pub fn with_order(
        self,
        member_name: &str,
        status: OrderStatus,
        lines: &[(&str, i32, i32)],
    ) -> Self {
        {
            let mut tables = self.tables.write().unwrap();
            let order_id = OrderId(tables.next_id());
            let member_id = MemberId(tables.next_id());
            let delivery_id = DeliveryId(tables.next_id());

            tables.members.insert(
                member_id,
                Member {
                    id: member_id,
                    name: member_name.to_string(),
                    address: test_address(member_name),
                },
            );
            tables.deliveries.insert(
                delivery_id,
                Delivery {
                    id: delivery_id,
                    address: test_address(member_name),
                    status: DeliveryStatus::Ready,
                },
            );
            tables.orders.push(OrderRow {
                id: order_id,
                member_id,
                delivery_id,
                status,
            });

            for (name, price, count) in lines {
                let item_id = ItemId(tables.next_id());
                let line_id = OrderItemId(tables.next_id());
                tables.items.insert(
                    item_id,
                    Item {
                        id: item_id,
                        name: name.to_string(),
                        price: *price,
                        stock_quantity: 100,
                    },
                );
                tables.lines.push(LineRow {
                    id: line_id,
                    order_id,
                    item_id,
                    order_price: *price,
                    count: *count,
                });
            }
        }
        self
    }

    /// Add an order whose delivery row does not exist
    pub fn with_order_missing_delivery(self, member_name: &str) -> Self {
        let repo = self.with_order(member_name, OrderStatus::Ordered, &[]);
        {
            let mut tables = repo.tables.write().unwrap();
            if let Some(delivery_id) = tables.orders.last().map(|o| o.delivery_id) {
                tables.deliveries.remove(&delivery_id);
            }
        }
        repo
    }

    /// Add an order whose single line references an item row that does not exist
    pub fn with_order_missing_item(self, member_name: &str) -> Self {
        let repo = self.with_order(member_name, OrderStatus::Ordered, &[("GONE BOOK", 1000, 1)]);
        {
            let mut tables = repo.tables.write().unwrap();
            if let Some(item_id) = tables.lines.last().map(|l| l.item_id) {
                tables.items.remove(&item_id);
            }
        }
        repo
    }

    /// Number of repository calls made so far
    pub fn round_trips(&self) -> usize {
        self.round_trips.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.round_trips.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_orders(&self, query: &OrderQuery) -> Result<Vec<Order>, DomainError> {
        self.record();
        let tables = self.tables.read().unwrap();
        let matching = tables
            .orders
            .iter()
            .filter(|row| tables.matches(row, &query.search));

        let orders: Vec<Order> = match query.shape {
            FetchShape::Lazy => matching
                .map(|row| {
                    Order::unloaded(
                        row.id,
                        row.member_id,
                        row.delivery_id,
                        test_order_date(),
                        row.status,
                    )
                })
                .collect(),
            FetchShape::ToOne => matching.filter_map(|row| tables.to_one(row)).collect(),
            FetchShape::ToOnePage(page) => matching
                .filter_map(|row| tables.to_one(row))
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .collect(),
            FetchShape::Full => matching
                .filter_map(|row| tables.to_one(row))
                .map(|mut order| {
                    let lines = tables
                        .lines_of(order.id)
                        .map(|line| {
                            let item = tables.items.get(&line.item_id).ok_or_else(|| {
                                DomainError::Internal(format!(
                                    "order {} line {:?} references a missing item",
                                    order.id, line.id
                                ))
                            })?;
                            Ok(OrderItem {
                                id: line.id,
                                item: Association::Loaded(item.clone()),
                                order_price: line.order_price,
                                count: line.count,
                            })
                        })
                        .collect::<Result<Vec<_>, DomainError>>()?;
                    order.order_items.resolve(lines);
                    Ok(order)
                })
                .collect::<Result<_, DomainError>>()?,
        };

        Ok(orders)
    }

    async fn find_member(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        self.record();
        let tables = self.tables.read().unwrap();
        Ok(tables.members.get(id).cloned())
    }

    async fn find_delivery(&self, id: &DeliveryId) -> Result<Option<Delivery>, DomainError> {
        self.record();
        let tables = self.tables.read().unwrap();
        Ok(tables.deliveries.get(id).cloned())
    }

    async fn find_order_items(&self, order_id: &OrderId) -> Result<Vec<OrderItem>, DomainError> {
        self.record();
        let tables = self.tables.read().unwrap();
        Ok(tables
            .lines_of(*order_id)
            .map(|line| OrderItem {
                id: line.id,
                item: Association::Unloaded(line.item_id),
                order_price: line.order_price,
                count: line.count,
            })
            .collect())
    }

    async fn find_item(&self, id: &ItemId) -> Result<Option<Item>, DomainError> {
        self.record();
        let tables = self.tables.read().unwrap();
        Ok(tables.items.get(id).cloned())
    }

    async fn find_order_summaries(&self) -> Result<Vec<OrderSimpleQueryDto>, DomainError> {
        self.record();
        let tables = self.tables.read().unwrap();
        Ok(tables
            .orders
            .iter()
            .filter_map(|row| tables.to_one(row))
            .map(|order| OrderSimpleQueryDto {
                order_id: order.id,
                name: order.member().map(|m| m.name.clone()).unwrap_or_default(),
                order_date: order.order_date,
                order_status: order.status,
                address: order
                    .delivery()
                    .map(|d| d.address.clone())
                    .unwrap_or_else(|_| test_address("")),
            })
            .collect())
    }
}

// ============================================================================
// Failing Order Repository
// ============================================================================

/// Repository whose store is never reachable
pub struct FailingOrderRepository;

fn unreachable_store() -> DomainError {
    DomainError::StoreUnavailable("connection refused".to_string())
}

#[async_trait]
impl OrderRepository for FailingOrderRepository {
    async fn find_orders(&self, _query: &OrderQuery) -> Result<Vec<Order>, DomainError> {
        Err(unreachable_store())
    }

    async fn find_member(&self, _id: &MemberId) -> Result<Option<Member>, DomainError> {
        Err(unreachable_store())
    }

    async fn find_delivery(&self, _id: &DeliveryId) -> Result<Option<Delivery>, DomainError> {
        Err(unreachable_store())
    }

    async fn find_order_items(&self, _order_id: &OrderId) -> Result<Vec<OrderItem>, DomainError> {
        Err(unreachable_store())
    }

    async fn find_item(&self, _id: &ItemId) -> Result<Option<Item>, DomainError> {
        Err(unreachable_store())
    }

    async fn find_order_summaries(&self) -> Result<Vec<OrderSimpleQueryDto>, DomainError> {
        Err(unreachable_store())
    }
}
