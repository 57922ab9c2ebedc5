//! Report handlers.
//!
//! Each handler computes its report under one read guard.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use shopwise_store::{
    InactiveUser, PriceExtreme, RecentOrder, TopProduct, TopUser, UndeliveredOrder, UserOrderLine,
};

use crate::state::AppState;

/// Build the reports router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/reports/order-lines", get(order_lines))
        .route("/api/reports/undelivered-orders", get(undelivered_orders))
        .route("/api/reports/recent-orders", get(recent_orders))
        .route("/api/reports/top-users", get(top_users))
        .route("/api/reports/inactive-users", get(inactive_users))
        .route("/api/reports/top-products", get(top_products))
        .route("/api/reports/price-extremes", get(price_extremes))
}

/// Row cap for top-N reports.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[instrument(skip(state))]
pub async fn order_lines(State(state): State<AppState>) -> Json<Vec<UserOrderLine>> {
    Json(state.read().await.fetch_user_order_list())
}

#[instrument(skip(state))]
pub async fn undelivered_orders(State(state): State<AppState>) -> Json<Vec<UndeliveredOrder>> {
    Json(state.read().await.fetch_undelivered_orders())
}

/// Most recent orders, newest first.
#[instrument(skip(state))]
pub async fn recent_orders(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<RecentOrder>> {
    Json(state.read().await.fetch_recent_orders(query.limit))
}

/// Users with the most orders.
#[instrument(skip(state))]
pub async fn top_users(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<TopUser>> {
    Json(state.read().await.fetch_top_active_users(query.limit))
}

#[instrument(skip(state))]
pub async fn inactive_users(State(state): State<AppState>) -> Json<Vec<InactiveUser>> {
    Json(state.read().await.fetch_inactive_users())
}

/// Products by units sold.
#[instrument(skip(state))]
pub async fn top_products(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<TopProduct>> {
    Json(state.read().await.fetch_top_products(query.limit))
}

/// The cheapest and most expensive orders.
#[instrument(skip(state))]
pub async fn price_extremes(State(state): State<AppState>) -> Json<Vec<PriceExtreme>> {
    Json(state.read().await.fetch_price_extremes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use shopwise_store::OrderType;

    use super::*;
    use crate::tests::sample_state;

    #[tokio::test]
    async fn test_top_users_default_limit() {
        let state = sample_state().await;
        let Json(rows) = top_users(State(state), Query(LimitQuery::default())).await;
        let ids: Vec<i32> = rows.iter().map(|row| row.user_id.into()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(rows[0].total_orders, 2);
    }

    #[tokio::test]
    async fn test_recent_orders_limit() {
        let state = sample_state().await;
        let Json(rows) = recent_orders(State(state), Query(LimitQuery { limit: Some(2) })).await;
        let ids: Vec<i32> = rows.iter().map(|row| row.order_id.into()).collect();
        assert_eq!(ids, vec![6, 5]);
    }

    #[tokio::test]
    async fn test_inactive_users() {
        let state = sample_state().await;
        let Json(rows) = inactive_users(State(state)).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Eve Taylor");
    }

    #[tokio::test]
    async fn test_price_extremes() {
        let state = sample_state().await;
        let Json(rows) = price_extremes(State(state)).await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].order_type, OrderType::Cheapest);
        assert_eq!(rows[0].total_amount, Decimal::new(7500, 2));
        assert_eq!(rows[1].order_type, OrderType::MostExpensive);
        assert_eq!(rows[1].customer_name, "Alice Johnson");
    }

    #[tokio::test]
    async fn test_undelivered_uses_pinned_date() {
        let state = sample_state().await;
        let Json(rows) = undelivered_orders(State(state.clone())).await;
        assert_eq!(rows.len(), 4);

        let Json(lines) = order_lines(State(state)).await;
        assert!(
            lines
                .iter()
                .any(|line| line.expected_delivery_date_text == "Delivered")
        );
    }
}
