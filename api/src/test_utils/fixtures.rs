//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::entities::{
    Address, Association, Delivery, DeliveryId, DeliveryStatus, Item, ItemId, Member, MemberId,
    Order, OrderId, OrderItem, OrderItemId, OrderStatus,
};

use super::mocks::InMemoryOrderRepository;

/// Fixed order timestamp used by every fixture
pub fn test_order_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

/// Address derived from a member name, so different members get different addresses
pub fn test_address(member_name: &str) -> Address {
    Address::new(
        format!("{} City", member_name),
        format!("{} Street", member_name),
        format!("{:05}", member_name.len() * 1111),
    )
}

/// Create a fully loaded order with the given (item name, price, count) lines
pub fn loaded_order(id: i64, member_name: &str, lines: &[(&str, i32, i32)]) -> Order {
    let mut order = Order::unloaded(
        OrderId(id),
        MemberId(id * 10),
        DeliveryId(id * 10),
        test_order_date(),
        OrderStatus::Ordered,
    );
    order.member.resolve(Member {
        id: MemberId(id * 10),
        name: member_name.to_string(),
        address: test_address(member_name),
    });
    order.delivery.resolve(Delivery {
        id: DeliveryId(id * 10),
        address: test_address(member_name),
        status: DeliveryStatus::Ready,
    });
    order.order_items.resolve(
        lines
            .iter()
            .enumerate()
            .map(|(i, (name, price, count))| {
                let line_id = id * 100 + i as i64;
                OrderItem {
                    id: OrderItemId(line_id),
                    item: Association::Loaded(Item {
                        id: ItemId(line_id),
                        name: name.to_string(),
                        price: *price,
                        stock_quantity: 100,
                    }),
                    order_price: *price,
                    count: *count,
                }
            })
            .collect(),
    );
    order
}

/// Two orders, one for Alice and one for Bob, with two lines each
pub fn alice_and_bob() -> InMemoryOrderRepository {
    InMemoryOrderRepository::new()
        .with_order(
            "Alice",
            OrderStatus::Ordered,
            &[("JPA1 BOOK", 10000, 1), ("JPA2 BOOK", 20000, 2)],
        )
        .with_order(
            "Bob",
            OrderStatus::Ordered,
            &[("SPRING1 BOOK", 20000, 3), ("SPRING2 BOOK", 40000, 4)],
        )
}
