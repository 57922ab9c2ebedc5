//! Named reports.
//!
//! [`Reports`] borrows a store and a clock and exposes one method per
//! report. Each is a pure function of the store's contents and its
//! parameters: calling a report twice without an intervening write yields
//! identical rows.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use shopwise_core::{OrderId, ProductId, UserId};

use crate::clock::Clock;
use crate::query::{self, InactiveUser, RecentOrder, UndeliveredOrder};
use crate::ranking::{Cutoff, Direction, rank_by};
use crate::store::Store;

/// Row limit used when a caller does not supply one.
pub const DEFAULT_LIMIT: usize = 5;

// =============================================================================
// Report Rows
// =============================================================================

/// A line in the user order list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserOrderLine {
    pub customer_name: String,
    pub product_name: String,
    pub order_date: NaiveDate,
    pub expected_delivery_date_text: String,
}

/// A user in the most-active ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopUser {
    pub user_id: UserId,
    pub name: String,
    pub total_orders: i64,
}

/// A product in the best-seller ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopProduct {
    pub product_id: ProductId,
    pub name: String,
    pub total_quantity: i64,
}

/// Which extreme a price row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OrderType {
    Cheapest,
    #[serde(rename = "Most Expensive")]
    MostExpensive,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cheapest => f.write_str("Cheapest"),
            Self::MostExpensive => f.write_str("Most Expensive"),
        }
    }
}

/// An order at one end of the price range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceExtreme {
    pub order_id: OrderId,
    pub customer_name: String,
    pub total_amount: Decimal,
    pub order_type: OrderType,
}

// =============================================================================
// Reports
// =============================================================================

/// Read-only report façade over a store snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Reports<'a, C> {
    store: &'a Store,
    clock: &'a C,
}

impl<'a, C: Clock> Reports<'a, C> {
    #[must_use]
    pub const fn new(store: &'a Store, clock: &'a C) -> Self {
        Self { store, clock }
    }

    /// Every line item with its customer, product, and delivery estimate.
    ///
    /// The estimate is computed against the clock's date once, so every row
    /// of one call uses the same "today".
    #[must_use]
    pub fn user_order_list(&self) -> Vec<UserOrderLine> {
        let today = self.clock.today();
        query::order_lines(self.store)
            .into_iter()
            .map(|line| UserOrderLine {
                expected_delivery_date_text: query::delivery_status_text(
                    line.expected_delivery_date,
                    today,
                ),
                customer_name: line.customer_name,
                product_name: line.product_name,
                order_date: line.order_date,
            })
            .collect()
    }

    /// Orders whose status is anything but `Delivered`.
    #[must_use]
    pub fn undelivered_orders(&self) -> Vec<UndeliveredOrder> {
        query::undelivered_orders(self.store)
    }

    /// The `limit` most recently placed orders.
    #[must_use]
    pub fn recent_orders(&self, limit: usize) -> Vec<RecentOrder> {
        query::recent_orders(self.store, limit)
    }

    /// Users ranked by order count, highest first, cut at `limit` rows.
    ///
    /// Only users with at least one order are ranked. Ties at the cut are
    /// broken by ascending user id.
    #[must_use]
    pub fn top_active_users(&self, limit: usize) -> Vec<TopUser> {
        let ranked = rank_by(
            query::user_order_counts(self.store),
            Direction::Descending,
            |count| count.total_orders,
        );
        Cutoff::RowLimit(limit)
            .apply(ranked)
            .into_iter()
            .filter_map(|ranked| {
                let user = self.store.user(ranked.item.user_id).ok()?;
                Some(TopUser {
                    user_id: user.id,
                    name: user.name.clone(),
                    total_orders: ranked.item.total_orders,
                })
            })
            .collect()
    }

    /// Users who have never placed an order.
    #[must_use]
    pub fn inactive_users(&self) -> Vec<InactiveUser> {
        query::inactive_users(self.store)
    }

    /// Products ranked by units sold, highest first, cut at `limit` rows.
    ///
    /// Ties at the cut are broken by ascending product id.
    #[must_use]
    pub fn top_products(&self, limit: usize) -> Vec<TopProduct> {
        let ranked = rank_by(
            query::product_sales(self.store),
            Direction::Descending,
            |sales| sales.total_quantity,
        );
        Cutoff::RowLimit(limit)
            .apply(ranked)
            .into_iter()
            .filter_map(|ranked| {
                let product = self.store.product(ranked.item.product_id).ok()?;
                Some(TopProduct {
                    product_id: product.id,
                    name: product.name.clone(),
                    total_quantity: ranked.item.total_quantity,
                })
            })
            .collect()
    }

    /// The cheapest and the most expensive orders by line item total.
    ///
    /// Every order tied at rank 1 is returned for each end, cheapest rows
    /// first. Nothing is deduplicated: with a single order, that order
    /// appears once as `Cheapest` and once as `Most Expensive`.
    #[must_use]
    pub fn price_extremes(&self) -> Vec<PriceExtreme> {
        let totals = query::order_totals(self.store);

        let mut rows = Vec::new();
        for (direction, order_type) in [
            (Direction::Ascending, OrderType::Cheapest),
            (Direction::Descending, OrderType::MostExpensive),
        ] {
            let ranked = rank_by(totals.iter().cloned(), direction, |total| total.total_amount);
            rows.extend(Cutoff::RankOne.apply(ranked).into_iter().map(|ranked| PriceExtreme {
                order_id: ranked.item.order_id,
                customer_name: ranked.item.customer_name,
                total_amount: ranked.item.total_amount,
                order_type,
            }));
        }
        rows
    }
}
