//! Report output.

use std::path::Path;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde_json::Value;

use shopwise_store::{Clock, FixedClock, Shop, SystemClock};

use super::read_dataset;

/// Reports the CLI can print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportName {
    /// Every order line with delivery text
    OrderLines,
    /// Orders not yet delivered
    UndeliveredOrders,
    /// Newest orders first (honours --limit)
    RecentOrders,
    /// Users with the most orders (honours --limit)
    TopUsers,
    /// Users who never ordered
    InactiveUsers,
    /// Best-selling products by quantity (honours --limit)
    TopProducts,
    /// Cheapest and most expensive orders
    PriceExtremes,
}

/// Compute a report as a JSON value.
///
/// # Errors
///
/// Returns `serde_json::Error` if the rows cannot be serialized.
pub fn render<C: Clock>(
    shop: &Shop<C>,
    name: ReportName,
    limit: Option<usize>,
) -> Result<Value, serde_json::Error> {
    match name {
        ReportName::OrderLines => serde_json::to_value(shop.fetch_user_order_list()),
        ReportName::UndeliveredOrders => serde_json::to_value(shop.fetch_undelivered_orders()),
        ReportName::RecentOrders => serde_json::to_value(shop.fetch_recent_orders(limit)),
        ReportName::TopUsers => serde_json::to_value(shop.fetch_top_active_users(limit)),
        ReportName::InactiveUsers => serde_json::to_value(shop.fetch_inactive_users()),
        ReportName::TopProducts => serde_json::to_value(shop.fetch_top_products(limit)),
        ReportName::PriceExtremes => serde_json::to_value(shop.fetch_price_extremes()),
    }
}

/// Load the dataset, run one report, and print it.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the rows cannot be
/// serialized.
pub fn run(
    name: ReportName,
    data: Option<&Path>,
    limit: Option<usize>,
    today: Option<NaiveDate>,
) -> Result<(), Box<dyn std::error::Error>> {
    let today = today.unwrap_or_else(|| SystemClock.today());
    let mut shop = Shop::load_schema(FixedClock::new(today));
    shop.load_dataset(&read_dataset(data)?)?;

    tracing::debug!(report = ?name, %today, ?limit, "Running report");
    let output = serde_json::to_string_pretty(&render(&shop, name, limit)?)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}
