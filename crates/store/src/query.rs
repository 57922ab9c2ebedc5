//! Derived views over the store: joins, grouping, counts, and sums.
//!
//! This is a fixed vocabulary of views, not a query language. Joins are
//! inner joins resolved through the store's id lookups; a row whose
//! reference does not resolve is dropped from the view. Output order is
//! deterministic: group keys come out in ascending id order and row views
//! follow the id order of their driving table.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use shopwise_core::{OrderId, OrderStatus, ProductId, UserId};

use crate::store::Store;

/// Literal shown once the expected delivery date is not in the future.
pub const DELIVERED_TEXT: &str = "Delivered";

// =============================================================================
// Row Views
// =============================================================================

/// One line item joined to its order, customer, and product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub order_id: OrderId,
    pub customer_name: String,
    pub product_name: String,
    pub order_date: NaiveDate,
    pub expected_delivery_date: NaiveDate,
}

/// Inner join `order_details ⋈ orders ⋈ users` and `order_details ⋈ products`,
/// in line item id order.
#[must_use]
pub fn order_lines(store: &Store) -> Vec<OrderLine> {
    store
        .order_details()
        .filter_map(|detail| {
            let order = store.order(detail.order_id).ok()?;
            let user = store.user(order.user_id).ok()?;
            let product = store.product(detail.product_id).ok()?;
            Some(OrderLine {
                order_id: order.id,
                customer_name: user.name.clone(),
                product_name: product.name.clone(),
                order_date: order.order_date,
                expected_delivery_date: order.expected_delivery_date,
            })
        })
        .collect()
}

/// Human-readable delivery estimate.
///
/// `"within N days"` while the expected date is strictly after `today`,
/// otherwise `"Delivered"`. Only the dates are compared; the order's status
/// column plays no part, so a cancelled order past its date still reads
/// `"Delivered"`.
#[must_use]
pub fn delivery_status_text(expected_delivery_date: NaiveDate, today: NaiveDate) -> String {
    if expected_delivery_date > today {
        let days = (expected_delivery_date - today).num_days();
        format!("within {days} days")
    } else {
        DELIVERED_TEXT.to_string()
    }
}

/// An order that has not reached `Delivered`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndeliveredOrder {
    pub order_id: OrderId,
    pub customer_name: String,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
    pub expected_delivery_date: NaiveDate,
}

/// Orders with `status <> 'Delivered'` joined to their user, in order id order.
#[must_use]
pub fn undelivered_orders(store: &Store) -> Vec<UndeliveredOrder> {
    store
        .orders()
        .filter(|order| order.status != OrderStatus::Delivered)
        .filter_map(|order| {
            let user = store.user(order.user_id).ok()?;
            Some(UndeliveredOrder {
                order_id: order.id,
                customer_name: user.name.clone(),
                status: order.status,
                order_date: order.order_date,
                expected_delivery_date: order.expected_delivery_date,
            })
        })
        .collect()
}

/// An order in the recent-orders listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentOrder {
    pub order_id: OrderId,
    pub customer_name: String,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
}

/// Orders by `order_date DESC`, first `limit` rows.
///
/// The sort is stable over id-ordered input, so orders placed on the same
/// day keep ascending order id.
#[must_use]
pub fn recent_orders(store: &Store, limit: usize) -> Vec<RecentOrder> {
    let mut rows: Vec<RecentOrder> = store
        .orders()
        .filter_map(|order| {
            let user = store.user(order.user_id).ok()?;
            Some(RecentOrder {
                order_id: order.id,
                customer_name: user.name.clone(),
                order_date: order.order_date,
                status: order.status,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.order_date.cmp(&a.order_date));
    rows.truncate(limit);
    rows
}

/// A user with no orders at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InactiveUser {
    pub user_id: UserId,
    pub name: String,
}

/// Anti-join `users ▷ orders`, in user id order.
#[must_use]
pub fn inactive_users(store: &Store) -> Vec<InactiveUser> {
    let active = user_order_counts(store);
    store
        .users()
        .filter(|user| !active.iter().any(|count| count.user_id == user.id))
        .map(|user| InactiveUser {
            user_id: user.id,
            name: user.name.clone(),
        })
        .collect()
}

// =============================================================================
// Aggregates
// =============================================================================

/// `COUNT(*)` of orders for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserOrderCount {
    pub user_id: UserId,
    pub total_orders: i64,
}

/// `SELECT user_id, COUNT(*) FROM orders GROUP BY user_id`.
///
/// Users without orders have no group and do not appear.
#[must_use]
pub fn user_order_counts(store: &Store) -> Vec<UserOrderCount> {
    let mut groups: BTreeMap<UserId, i64> = BTreeMap::new();
    for order in store.orders() {
        *groups.entry(order.user_id).or_default() += 1;
    }
    groups
        .into_iter()
        .map(|(user_id, total_orders)| UserOrderCount {
            user_id,
            total_orders,
        })
        .collect()
}

/// `SUM(quantity)` of line items for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductSales {
    pub product_id: ProductId,
    pub total_quantity: i64,
}

/// `SELECT product_id, SUM(quantity) FROM order_details GROUP BY product_id`.
#[must_use]
pub fn product_sales(store: &Store) -> Vec<ProductSales> {
    let mut groups: BTreeMap<ProductId, i64> = BTreeMap::new();
    for detail in store.order_details() {
        *groups.entry(detail.product_id).or_default() += i64::from(detail.quantity.get());
    }
    groups
        .into_iter()
        .map(|(product_id, total_quantity)| ProductSales {
            product_id,
            total_quantity,
        })
        .collect()
}

/// Value of one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderTotal {
    pub order_id: OrderId,
    pub customer_name: String,
    pub total_amount: Decimal,
}

/// `SUM(price * quantity)` per order over `order_details ⋈ products`, joined
/// to the owning user's name.
///
/// Orders without line items have no group and do not appear. Sums saturate
/// at `Decimal::MAX` rather than overflow.
#[must_use]
pub fn order_totals(store: &Store) -> Vec<OrderTotal> {
    let mut groups: BTreeMap<OrderId, Decimal> = BTreeMap::new();
    for detail in store.order_details() {
        let Ok(product) = store.product(detail.product_id) else {
            continue;
        };
        let line = product
            .price
            .amount()
            .saturating_mul(Decimal::from(detail.quantity.get()));
        let total = groups.entry(detail.order_id).or_default();
        *total = total.saturating_add(line);
    }
    groups
        .into_iter()
        .filter_map(|(order_id, total_amount)| {
            let order = store.order(order_id).ok()?;
            let user = store.user(order.user_id).ok()?;
            Some(OrderTotal {
                order_id,
                customer_name: user.name.clone(),
                total_amount,
            })
        })
        .collect()
}
