//! Stored row types.
//!
//! These are the validated records the store owns. They can only be created
//! by the schema layer, so every field already satisfies its constraints.
//! Serialized field names follow the persisted column names.

use chrono::NaiveDate;
use serde::Serialize;

use shopwise_core::{
    Email, OrderDetailId, OrderId, OrderStatus, Price, ProductId, Quantity, UserId,
};

/// A customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    #[serde(rename = "user_id")]
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    #[serde(rename = "product_id")]
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

/// An order placed by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    #[serde(rename = "order_id")]
    pub id: OrderId,
    pub user_id: UserId,
    pub order_date: NaiveDate,
    pub expected_delivery_date: NaiveDate,
    pub status: OrderStatus,
}

/// A line item: one product and quantity within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDetail {
    #[serde(rename = "order_detail_id")]
    pub id: OrderDetailId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// A row from any of the four tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Row {
    User(User),
    Product(Product),
    Order(Order),
    OrderDetail(OrderDetail),
}

impl From<User> for Row {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

impl From<Product> for Row {
    fn from(product: Product) -> Self {
        Self::Product(product)
    }
}

impl From<Order> for Row {
    fn from(order: Order) -> Self {
        Self::Order(order)
    }
}

impl From<OrderDetail> for Row {
    fn from(detail: OrderDetail) -> Self {
        Self::OrderDetail(detail)
    }
}
