//! Demo data bootstrap
//!
//! Creates the order schema when it is missing and inserts two sample orders
//! so the read endpoints have something to show on a fresh database.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Schema,
    Set, TransactionTrait,
};

use crate::domain::entities::{Address, DeliveryStatus, OrderStatus};
use crate::entity::{deliveries, items, members, order_items, orders};
use crate::error::DomainError;

/// A sample order: member name, address and (item name, price, stock, count) lines
struct DemoOrder {
    member: &'static str,
    address: (&'static str, &'static str, &'static str),
    lines: [(&'static str, i32, i32, i32); 2],
}

const DEMO_ORDERS: [DemoOrder; 2] = [
    DemoOrder {
        member: "userA",
        address: ("Seoul", "1", "1111"),
        lines: [("JPA1 BOOK", 10000, 100, 1), ("JPA2 BOOK", 20000, 100, 2)],
    },
    DemoOrder {
        member: "userB",
        address: ("Jinju", "2", "2222"),
        lines: [("SPRING1 BOOK", 20000, 200, 3), ("SPRING2 BOOK", 40000, 300, 4)],
    },
];

/// Create every order table that does not exist yet, parents first.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DomainError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let statements = [
        schema
            .create_table_from_entity(members::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(deliveries::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(items::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(orders::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(order_items::Entity)
            .if_not_exists()
            .to_owned(),
    ];

    for statement in &statements {
        db.execute(backend.build(statement))
            .await
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;
    }

    Ok(())
}

/// Insert the demo orders unless the store already holds orders.
///
/// Everything is written in one transaction, so a failed seed leaves no rows
/// behind and the next start-up tries again. Returns whether anything was
/// inserted.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<bool, DomainError> {
    let txn = db
        .begin()
        .await
        .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

    let existing = orders::Entity::find()
        .count(&txn)
        .await
        .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;
    if existing > 0 {
        tracing::info!(orders = existing, "Store already holds orders, skipping demo data");
        return Ok(false);
    }

    for demo in &DEMO_ORDERS {
        let order_id = insert_demo_order(&txn, demo).await?;
        tracing::debug!(member = demo.member, order_id, "Inserted demo order");
    }

    txn.commit()
        .await
        .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

    Ok(true)
}

async fn insert_demo_order<C>(db: &C, demo: &DemoOrder) -> Result<i64, DomainError>
where
    C: ConnectionTrait,
{
    let (city, street, zipcode) = demo.address;
    let address = Address::new(city, street, zipcode);

    let member = members::ActiveModel {
        name: Set(demo.member.to_string()),
        city: Set(address.city.clone()),
        street: Set(address.street.clone()),
        zipcode: Set(address.zipcode.clone()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

    let delivery = deliveries::ActiveModel {
        city: Set(address.city.clone()),
        street: Set(address.street.clone()),
        zipcode: Set(address.zipcode.clone()),
        status: Set(DeliveryStatus::Ready.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

    let order = orders::ActiveModel {
        member_id: Set(member.id),
        delivery_id: Set(delivery.id),
        order_date: Set(Utc::now().naive_utc()),
        status: Set(OrderStatus::Ordered.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

    for (name, price, stock, count) in demo.lines {
        // Stock is stored as it stood after the order was placed.
        let item = items::ActiveModel {
            name: Set(name.to_string()),
            price: Set(price),
            stock_quantity: Set(stock - count),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;

        order_items::ActiveModel {
            order_id: Set(order.id),
            item_id: Set(item.id),
            order_price: Set(price),
            count: Set(count),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| DomainError::StoreUnavailable(e.to_string()))?;
    }

    Ok(order.id)
}
