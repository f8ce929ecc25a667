//! PostgreSQL adapter for OrderRepository
//!
//! Joined fetch shapes select aliased columns into flat row structs and
//! assemble the aggregate from them, so each `find_*` call is a single
//! statement.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use crate::domain::entities::{
    Address, Association, Delivery, DeliveryId, DeliveryStatus, Item, ItemId, Member, MemberId,
    Order, OrderId, OrderItem, OrderItemId, OrderStatus,
};
use crate::domain::ports::OrderRepository;
use crate::domain::projections::OrderSimpleQueryDto;
use crate::domain::query::{FetchShape, OrderQuery, OrderSearch, Page};
use crate::entity::{deliveries, items, members, order_items, orders};
use crate::error::DomainError;

/// PostgreSQL implementation of OrderRepository
pub struct PostgresOrderRepository {
    db: DatabaseConnection,
}

impl PostgresOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_lazy(&self, search: &OrderSearch) -> Result<Vec<Order>, DomainError> {
        // The member join only serves the name filter; no member columns are read.
        let results = orders::Entity::find()
            .join(JoinType::InnerJoin, orders::Relation::Member.def())
            .filter(search_condition(search))
            .order_by_asc(orders::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_to_one(
        &self,
        search: &OrderSearch,
        page: Option<Page>,
    ) -> Result<Vec<Order>, DomainError> {
        let mut select = select_to_one(search);
        if let Some(page) = page {
            select = select.offset(page.offset).limit(page.limit);
        }

        let rows = select
            .into_model::<OrderToOneRow>()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_full(&self, search: &OrderSearch) -> Result<Vec<Order>, DomainError> {
        let rows = select_to_one(search)
            .column_as(order_items::Column::Id, "order_item_id")
            .column_as(order_items::Column::OrderPrice, "order_price")
            .column_as(order_items::Column::Count, "count")
            .column_as(items::Column::Id, "item_id")
            .column_as(items::Column::Name, "item_name")
            .column_as(items::Column::Price, "item_price")
            .column_as(items::Column::StockQuantity, "item_stock_quantity")
            .join(JoinType::LeftJoin, orders::Relation::OrderItems.def())
            .join(JoinType::LeftJoin, order_items::Relation::Item.def())
            .order_by_asc(order_items::Column::Id)
            .into_model::<OrderFullRow>()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

        collapse_full_rows(rows)
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn find_orders(&self, query: &OrderQuery) -> Result<Vec<Order>, DomainError> {
        tracing::debug!(shape = query.shape.name(), "Querying orders");
        match query.shape {
            FetchShape::Lazy => self.find_lazy(&query.search).await,
            FetchShape::ToOne => self.find_to_one(&query.search, None).await,
            FetchShape::ToOnePage(page) => self.find_to_one(&query.search, Some(page)).await,
            FetchShape::Full => self.find_full(&query.search).await,
        }
    }

    async fn find_member(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        let result = members::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_delivery(&self, id: &DeliveryId) -> Result<Option<Delivery>, DomainError> {
        let result = deliveries::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_order_items(&self, order_id: &OrderId) -> Result<Vec<OrderItem>, DomainError> {
        let results = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order_id.0))
            .order_by_asc(order_items::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_item(&self, id: &ItemId) -> Result<Option<Item>, DomainError> {
        let result = items::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_order_summaries(&self) -> Result<Vec<OrderSimpleQueryDto>, DomainError> {
        let rows = orders::Entity::find()
            .select_only()
            .column_as(orders::Column::Id, "order_id")
            .column_as(members::Column::Name, "name")
            .column_as(orders::Column::OrderDate, "order_date")
            .column_as(orders::Column::Status, "order_status")
            .column_as(deliveries::Column::City, "city")
            .column_as(deliveries::Column::Street, "street")
            .column_as(deliveries::Column::Zipcode, "zipcode")
            .join(JoinType::InnerJoin, orders::Relation::Member.def())
            .join(JoinType::InnerJoin, orders::Relation::Delivery.def())
            .order_by_asc(orders::Column::Id)
            .into_model::<OrderSummaryRow>()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

/// WHERE clause for a search predicate. Assumes `members` is joined.
fn search_condition(search: &OrderSearch) -> Condition {
    let mut condition = Condition::all();
    if let Some(status) = search.order_status {
        condition = condition.add(orders::Column::Status.eq(status.to_string()));
    }
    if let Some(name) = search.member_name() {
        condition = condition.add(members::Column::Name.contains(name));
    }
    condition
}

/// Orders joined with member and delivery, one row per order
fn select_to_one(search: &OrderSearch) -> Select<orders::Entity> {
    orders::Entity::find()
        .select_only()
        .column_as(orders::Column::Id, "order_id")
        .column_as(orders::Column::OrderDate, "order_date")
        .column_as(orders::Column::Status, "order_status")
        .column_as(members::Column::Id, "member_id")
        .column_as(members::Column::Name, "member_name")
        .column_as(members::Column::City, "member_city")
        .column_as(members::Column::Street, "member_street")
        .column_as(members::Column::Zipcode, "member_zipcode")
        .column_as(deliveries::Column::Id, "delivery_id")
        .column_as(deliveries::Column::City, "delivery_city")
        .column_as(deliveries::Column::Street, "delivery_street")
        .column_as(deliveries::Column::Zipcode, "delivery_zipcode")
        .column_as(deliveries::Column::Status, "delivery_status")
        .join(JoinType::InnerJoin, orders::Relation::Member.def())
        .join(JoinType::InnerJoin, orders::Relation::Delivery.def())
        .filter(search_condition(search))
        .order_by_asc(orders::Column::Id)
}

/// Row of the to-one JOIN fetch
#[derive(Debug, Clone, FromQueryResult)]
pub(crate) struct OrderToOneRow {
    pub order_id: i64,
    pub order_date: NaiveDateTime,
    pub order_status: String,
    pub member_id: i64,
    pub member_name: String,
    pub member_city: String,
    pub member_street: String,
    pub member_zipcode: String,
    pub delivery_id: i64,
    pub delivery_city: String,
    pub delivery_street: String,
    pub delivery_zipcode: String,
    pub delivery_status: String,
}

/// Row of the full JOIN fetch: the to-one columns repeated once per line item.
/// Line columns are null for orders without items.
#[derive(Debug, Clone, FromQueryResult)]
pub(crate) struct OrderFullRow {
    pub order_id: i64,
    pub order_date: NaiveDateTime,
    pub order_status: String,
    pub member_id: i64,
    pub member_name: String,
    pub member_city: String,
    pub member_street: String,
    pub member_zipcode: String,
    pub delivery_id: i64,
    pub delivery_city: String,
    pub delivery_street: String,
    pub delivery_zipcode: String,
    pub delivery_status: String,
    pub order_item_id: Option<i64>,
    pub order_price: Option<i32>,
    pub count: Option<i32>,
    pub item_id: Option<i64>,
    pub item_name: Option<String>,
    pub item_price: Option<i32>,
    pub item_stock_quantity: Option<i32>,
}

impl OrderFullRow {
    /// Separate the order columns from the line columns. A line whose item
    /// did not join is a dangling reference.
    fn split(self) -> Result<(OrderToOneRow, Option<OrderItem>), DomainError> {
        let line = match (
            self.order_item_id,
            self.order_price,
            self.count,
            self.item_id,
            self.item_name,
        ) {
            (None, ..) => None,
            (Some(id), Some(order_price), Some(count), Some(item_id), Some(item_name)) => {
                Some(OrderItem {
                    id: OrderItemId(id),
                    item: Association::Loaded(Item {
                        id: ItemId(item_id),
                        name: item_name,
                        price: self.item_price.unwrap_or_default(),
                        stock_quantity: self.item_stock_quantity.unwrap_or_default(),
                    }),
                    order_price,
                    count,
                })
            }
            (Some(id), ..) => {
                return Err(DomainError::Internal(format!(
                    "order {} line {} references a missing item",
                    self.order_id, id
                )))
            }
        };

        let head = OrderToOneRow {
            order_id: self.order_id,
            order_date: self.order_date,
            order_status: self.order_status,
            member_id: self.member_id,
            member_name: self.member_name,
            member_city: self.member_city,
            member_street: self.member_street,
            member_zipcode: self.member_zipcode,
            delivery_id: self.delivery_id,
            delivery_city: self.delivery_city,
            delivery_street: self.delivery_street,
            delivery_zipcode: self.delivery_zipcode,
            delivery_status: self.delivery_status,
        };

        Ok((head, line))
    }
}

/// Collapse the per-line rows of a full JOIN fetch back into one aggregate
/// per order. Rows must be sorted by order id.
pub(crate) fn collapse_full_rows(rows: Vec<OrderFullRow>) -> Result<Vec<Order>, DomainError> {
    let mut grouped: Vec<(Order, Vec<OrderItem>)> = Vec::new();

    for row in rows {
        let (head, line) = row.split()?;
        let same_order = grouped
            .last()
            .is_some_and(|(order, _)| order.id.0 == head.order_id);
        if !same_order {
            grouped.push((head.into(), Vec::new()));
        }
        if let (Some(line), Some((_, lines))) = (line, grouped.last_mut()) {
            lines.push(line);
        }
    }

    Ok(grouped
        .into_iter()
        .map(|(mut order, lines)| {
            order.order_items.resolve(lines);
            order
        })
        .collect())
}

/// Row of the flat projection
#[derive(Debug, Clone, FromQueryResult)]
struct OrderSummaryRow {
    order_id: i64,
    name: String,
    order_date: NaiveDateTime,
    order_status: String,
    city: String,
    street: String,
    zipcode: String,
}

impl From<OrderSummaryRow> for OrderSimpleQueryDto {
    fn from(row: OrderSummaryRow) -> Self {
        OrderSimpleQueryDto {
            order_id: OrderId(row.order_id),
            name: row.name,
            order_date: row.order_date,
            order_status: parse_order_status(&row.order_status),
            address: Address {
                city: row.city,
                street: row.street,
                zipcode: row.zipcode,
            },
        }
    }
}

fn parse_order_status(status: &str) -> OrderStatus {
    status.parse().unwrap_or(OrderStatus::Ordered)
}

fn parse_delivery_status(status: &str) -> DeliveryStatus {
    status.parse().unwrap_or(DeliveryStatus::Ready)
}

/// Convert a to-one joined row into an order with member and delivery loaded
impl From<OrderToOneRow> for Order {
    fn from(row: OrderToOneRow) -> Self {
        let id = OrderId(row.order_id);
        Order {
            id,
            member: Association::Loaded(Member {
                id: MemberId(row.member_id),
                name: row.member_name,
                address: Address {
                    city: row.member_city,
                    street: row.member_street,
                    zipcode: row.member_zipcode,
                },
            }),
            order_items: Association::Unloaded(id),
            delivery: Association::Loaded(Delivery {
                id: DeliveryId(row.delivery_id),
                address: Address {
                    city: row.delivery_city,
                    street: row.delivery_street,
                    zipcode: row.delivery_zipcode,
                },
                status: parse_delivery_status(&row.delivery_status),
            }),
            order_date: row.order_date,
            status: parse_order_status(&row.order_status),
        }
    }
}

/// Convert SeaORM model to an order with every association unloaded
impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Order::unloaded(
            OrderId(model.id),
            MemberId(model.member_id),
            DeliveryId(model.delivery_id),
            model.order_date,
            parse_order_status(&model.status),
        )
    }
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        OrderItem {
            id: OrderItemId(model.id),
            item: Association::Unloaded(ItemId(model.item_id)),
            order_price: model.order_price,
            count: model.count,
        }
    }
}

impl From<members::Model> for Member {
    fn from(model: members::Model) -> Self {
        Member {
            id: MemberId(model.id),
            name: model.name,
            address: Address {
                city: model.city,
                street: model.street,
                zipcode: model.zipcode,
            },
        }
    }
}

impl From<deliveries::Model> for Delivery {
    fn from(model: deliveries::Model) -> Self {
        Delivery {
            id: DeliveryId(model.id),
            address: Address {
                city: model.city,
                street: model.street,
                zipcode: model.zipcode,
            },
            status: parse_delivery_status(&model.status),
        }
    }
}

impl From<items::Model> for Item {
    fn from(model: items::Model) -> Self {
        Item {
            id: ItemId(model.id),
            name: model.name,
            price: model.price,
            stock_quantity: model.stock_quantity,
        }
    }
}
