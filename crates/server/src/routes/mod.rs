//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Health check
//!
//! # Tables (kind: users, products, orders, order-details)
//! GET    /api/{kind}                      - List rows in id order
//! POST   /api/{kind}                      - Insert a row, 201 {"id": n}
//! GET    /api/{kind}/{id}                 - One row
//! DELETE /api/{kind}/{id}                 - Delete a row, 409 while referenced
//!
//! # Reports
//! GET    /api/reports/order-lines
//! GET    /api/reports/undelivered-orders
//! GET    /api/reports/recent-orders?limit=5
//! GET    /api/reports/top-users?limit=5
//! GET    /api/reports/inactive-users
//! GET    /api/reports/top-products?limit=5
//! GET    /api/reports/price-extremes
//! ```

pub mod reports;
pub mod rows;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new().merge(reports::router()).merge(rows::router())
}
