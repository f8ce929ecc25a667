//! Transfer objects
//!
//! Response shapes built from already-loaded aggregates. Construction is a
//! pure in-memory copy: an unloaded association is reported as
//! [`NotFetched`], never fetched behind the caller's back.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::entities::{Address, Order, OrderId, OrderItem, OrderStatus};
use crate::error::NotFetched;

/// An order with its line items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: OrderId,
    /// Member name
    pub name: String,
    pub order_date: NaiveDateTime,
    pub order_status: OrderStatus,
    /// Delivery address
    pub address: Address,
    pub order_items: Vec<OrderItemDto>,
}

/// One order line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub item_name: String,
    pub order_price: i32,
    pub count: i32,
}

/// An order without its line items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleOrderDto {
    pub order_id: OrderId,
    pub name: String,
    pub order_date: NaiveDateTime,
    pub order_status: OrderStatus,
    pub address: Address,
}

/// Requires member, delivery, line items and every line's item to be loaded.
impl TryFrom<&Order> for OrderDto {
    type Error = NotFetched;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        let order_items = order
            .order_items()?
            .iter()
            .map(OrderItemDto::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OrderDto {
            order_id: order.id,
            name: order.member()?.name.clone(),
            order_date: order.order_date,
            order_status: order.status,
            address: order.delivery()?.address.clone(),
            order_items,
        })
    }
}

impl TryFrom<&OrderItem> for OrderItemDto {
    type Error = NotFetched;

    fn try_from(line: &OrderItem) -> Result<Self, Self::Error> {
        Ok(OrderItemDto {
            item_name: line.item()?.name.clone(),
            order_price: line.order_price,
            count: line.count,
        })
    }
}

/// Requires member and delivery to be loaded; line items are ignored.
impl TryFrom<&Order> for SimpleOrderDto {
    type Error = NotFetched;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        Ok(SimpleOrderDto {
            order_id: order.id,
            name: order.member()?.name.clone(),
            order_date: order.order_date,
            order_status: order.status,
            address: order.delivery()?.address.clone(),
        })
    }
}

/// Map every order, failing on the first unloaded association.
pub fn map_all<'a, T>(orders: &'a [Order]) -> Result<Vec<T>, NotFetched>
where
    T: TryFrom<&'a Order, Error = NotFetched>,
{
    orders.iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Association;
    use crate::test_utils::{loaded_order, test_order_date};

    #[test]
    fn order_dto_copies_every_field() {
        let order = loaded_order(1, "Alice", &[("JPA1 BOOK", 10000, 1), ("JPA2 BOOK", 20000, 2)]);

        let dto = OrderDto::try_from(&order).unwrap();

        assert_eq!(dto.order_id, order.id);
        assert_eq!(dto.name, "Alice");
        assert_eq!(dto.order_date, test_order_date());
        assert_eq!(dto.order_status, OrderStatus::Ordered);
        assert_eq!(dto.address, order.delivery().unwrap().address);
        assert_eq!(dto.order_items.len(), order.order_items().unwrap().len());
        assert_eq!(
            dto.order_items[1],
            OrderItemDto {
                item_name: "JPA2 BOOK".to_string(),
                order_price: 20000,
                count: 2,
            }
        );
    }

    #[test]
    fn order_dto_requires_line_items() {
        let mut order = loaded_order(1, "Alice", &[("JPA1 BOOK", 10000, 1)]);
        order.order_items = Association::Unloaded(order.id);

        assert_eq!(
            OrderDto::try_from(&order),
            Err(NotFetched("order.order_items"))
        );
    }

    #[test]
    fn order_dto_requires_each_item() {
        let mut order = loaded_order(1, "Alice", &[("JPA1 BOOK", 10000, 1)]);
        if let Association::Loaded(lines) = &mut order.order_items {
            let item_id = lines[0].item().unwrap().id;
            lines[0].item = Association::Unloaded(item_id);
        }

        assert_eq!(
            OrderDto::try_from(&order),
            Err(NotFetched("order_item.item"))
        );
    }

    #[test]
    fn simple_dto_ignores_line_items() {
        let mut order = loaded_order(7, "Bob", &[("SPRING1 BOOK", 20000, 3)]);
        order.order_items = Association::Unloaded(order.id);

        let dto = SimpleOrderDto::try_from(&order).unwrap();

        assert_eq!(dto.order_id, order.id);
        assert_eq!(dto.name, "Bob");
    }

    #[test]
    fn simple_dto_requires_member() {
        let mut order = loaded_order(7, "Bob", &[]);
        order.member = Association::Unloaded(order.member().unwrap().id);

        assert_eq!(
            SimpleOrderDto::try_from(&order),
            Err(NotFetched("order.member"))
        );
    }

    #[test]
    fn order_dto_serializes_in_camel_case() {
        let order = loaded_order(3, "Carol", &[("JPA1 BOOK", 10000, 1)]);
        let json = serde_json::to_value(OrderDto::try_from(&order).unwrap()).unwrap();

        assert_eq!(json["orderId"], 3);
        assert_eq!(json["name"], "Carol");
        assert_eq!(json["orderStatus"], "ORDERED");
        assert!(json["address"]["city"].is_string());
        assert_eq!(json["orderItems"][0]["itemName"], "JPA1 BOOK");
        assert_eq!(json["orderItems"][0]["orderPrice"], 10000);
        assert_eq!(json["orderItems"][0]["count"], 1);
    }

    #[test]
    fn map_all_stops_at_first_unloaded_order() {
        let good = loaded_order(1, "Alice", &[]);
        let mut bad = loaded_order(2, "Bob", &[]);
        bad.delivery = Association::Unloaded(bad.delivery().unwrap().id);

        let result: Result<Vec<SimpleOrderDto>, _> = map_all(&[good, bad]);
        assert_eq!(result, Err(NotFetched("order.delivery")));
    }
}
