//! Rule enforcement through the `Shop` surface.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shopwise_core::{OrderId, ProductId, UserId};
use shopwise_integration_tests::{seed_today, seeded_shop};
use shopwise_store::{Constraint, Dataset, EntityKind, FixedClock, NewUser, Shop, StoreError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn empty_shop() -> Shop<FixedClock> {
    Shop::load_schema(FixedClock::new(seed_today()))
}

#[test]
fn ids_strictly_increase() {
    let mut shop = empty_shop();
    let a = shop.insert_user("A", "a@example.com").unwrap();
    // Rejected rows do not consume an id
    assert!(shop.insert_user("Dup", "a@example.com").is_err());
    let b = shop.insert_user("B", "b@example.com").unwrap();
    assert!(b > a);
    assert_eq!(i32::from(b), 2);
}

#[test]
fn negative_price_rejected() {
    let mut shop = seeded_shop().unwrap();
    let err = shop
        .insert_product("Refund", Decimal::new(-1, 2))
        .unwrap_err();
    assert_eq!(err.rule(), Some(Constraint::ProductsPriceCheck));
    assert_eq!(shop.store().len(EntityKind::Products), 6);
}

#[test]
fn zero_price_accepted() {
    let mut shop = empty_shop();
    let id = shop.insert_product("Sticker", Decimal::ZERO).unwrap();
    assert_eq!(i32::from(id), 1);
}

#[test]
fn non_positive_quantity_rejected() {
    let mut shop = seeded_shop().unwrap();
    for quantity in [0, -3] {
        let err = shop
            .insert_order_detail(OrderId::new(1), ProductId::new(2), Some(quantity))
            .unwrap_err();
        assert_eq!(err.rule(), Some(Constraint::OrderDetailsQuantityCheck));
    }
    assert_eq!(shop.store().len(EntityKind::OrderDetails), 10);
}

#[test]
fn unknown_status_rejected() {
    let mut shop = seeded_shop().unwrap();
    let err = shop
        .insert_order(UserId::new(1), date(2024, 3, 1), date(2024, 3, 5), "Returned")
        .unwrap_err();
    assert_eq!(err.rule(), Some(Constraint::OrdersStatusCheck));
    assert_eq!(shop.store().len(EntityKind::Orders), 6);
}

#[test]
fn foreign_keys_enforced() {
    let mut shop = seeded_shop().unwrap();

    let err = shop
        .insert_order(UserId::new(99), date(2024, 3, 1), date(2024, 3, 5), "Pending")
        .unwrap_err();
    assert_eq!(err.rule(), Some(Constraint::OrdersUserIdFkey));

    let err = shop
        .insert_order_detail(OrderId::new(99), ProductId::new(1), None)
        .unwrap_err();
    assert_eq!(err.rule(), Some(Constraint::OrderDetailsOrderIdFkey));

    let err = shop
        .insert_order_detail(OrderId::new(1), ProductId::new(99), None)
        .unwrap_err();
    assert_eq!(err.rule(), Some(Constraint::OrderDetailsProductIdFkey));
}

#[test]
fn duplicate_email_rejected() {
    let mut shop = seeded_shop().unwrap();
    let err = shop
        .insert_user("Another Alice", "alice@example.com")
        .unwrap_err();
    assert_eq!(err.rule(), Some(Constraint::UsersEmailKey));
    assert_eq!(shop.store().len(EntityKind::Users), 5);
}

#[test]
fn delete_restricted_while_referenced() {
    let mut shop = seeded_shop().unwrap();
    let err = shop.delete(EntityKind::Products, 1).unwrap_err();
    assert_eq!(err.rule(), Some(Constraint::OrderDetailsProductIdFkey));

    let err = shop.delete(EntityKind::Orders, 42).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn dataset_load_is_all_or_nothing() {
    let mut shop = seeded_shop().unwrap();
    let before = shop.fetch_top_active_users(None);

    let dataset = Dataset {
        users: vec![
            NewUser::new("Zed", "zed@example.com"),
            NewUser::new("Bob Again", "bob@example.com"),
        ],
        ..Dataset::default()
    };
    let err = shop.load_dataset(&dataset).unwrap_err();
    assert_eq!(err.rule(), Some(Constraint::UsersEmailKey));
    assert_eq!(shop.store().len(EntityKind::Users), 5);
    assert_eq!(shop.fetch_top_active_users(None), before);
}

#[test]
fn malformed_dataset_is_reported() {
    let err = Dataset::from_yaml("users: [{ name: X }]").unwrap_err();
    assert!(matches!(err, StoreError::Dataset(_)));
}
