//! Schema and constraint layer.
//!
//! Defines the four tables, the named integrity rules that guard them, and
//! the candidate rows accepted on insert. Candidates carry raw input (plain
//! strings, decimals, integers); [`check_user`] and friends turn a candidate
//! into a stored record or reject it with the first rule it breaks. A
//! candidate is never partially accepted.
//!
//! # Rules
//!
//! ```text
//! users          users_name_not_null, users_email_not_null,
//!                users_email_check, users_email_key
//! products       products_name_not_null, products_price_check
//! orders         orders_status_check, orders_user_id_fkey
//! order_details  order_details_quantity_check,
//!                order_details_order_id_fkey, order_details_product_id_fkey
//! ```
//!
//! Foreign keys are `ON DELETE RESTRICT`: the same rule names are reported
//! when deleting a row that still has dependents.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopwise_core::{
    Email, EmailError, OrderDetailId, OrderId, OrderStatus, Price, ProductId, Quantity, UserId,
};

use crate::error::StoreError;
use crate::models::{Order, OrderDetail, Product, User};
use crate::store::Store;

/// DDL for the persisted layout, with constraint names matching [`Constraint`].
pub const DDL: &str = include_str!("../migrations/0001_create_schema.sql");

// =============================================================================
// Tables
// =============================================================================

/// One of the four tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Users,
    Products,
    Orders,
    OrderDetails,
}

impl EntityKind {
    /// All tables in dependency order (referenced tables first).
    pub const ALL: [Self; 4] = [Self::Users, Self::Products, Self::Orders, Self::OrderDetails];

    /// Table name in the persisted layout.
    #[must_use]
    pub const fn table_name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::OrderDetails => "order_details",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Accepts table names, with `-` allowed in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.table_name() == normalized)
            .ok_or_else(|| format!("unknown table: {s}"))
    }
}

// =============================================================================
// Constraints
// =============================================================================

/// Family a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    NotNull,
    Unique,
    ForeignKey,
    Check,
}

/// A named integrity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Constraint {
    UsersNameNotNull,
    UsersEmailNotNull,
    UsersEmailCheck,
    UsersEmailKey,
    ProductsNameNotNull,
    ProductsPriceCheck,
    OrdersUserIdFkey,
    OrdersStatusCheck,
    OrderDetailsOrderIdFkey,
    OrderDetailsProductIdFkey,
    OrderDetailsQuantityCheck,
}

impl Constraint {
    pub const ALL: [Self; 11] = [
        Self::UsersNameNotNull,
        Self::UsersEmailNotNull,
        Self::UsersEmailCheck,
        Self::UsersEmailKey,
        Self::ProductsNameNotNull,
        Self::ProductsPriceCheck,
        Self::OrdersUserIdFkey,
        Self::OrdersStatusCheck,
        Self::OrderDetailsOrderIdFkey,
        Self::OrderDetailsProductIdFkey,
        Self::OrderDetailsQuantityCheck,
    ];

    /// Rule name as it appears in the DDL.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UsersNameNotNull => "users_name_not_null",
            Self::UsersEmailNotNull => "users_email_not_null",
            Self::UsersEmailCheck => "users_email_check",
            Self::UsersEmailKey => "users_email_key",
            Self::ProductsNameNotNull => "products_name_not_null",
            Self::ProductsPriceCheck => "products_price_check",
            Self::OrdersUserIdFkey => "orders_user_id_fkey",
            Self::OrdersStatusCheck => "orders_status_check",
            Self::OrderDetailsOrderIdFkey => "order_details_order_id_fkey",
            Self::OrderDetailsProductIdFkey => "order_details_product_id_fkey",
            Self::OrderDetailsQuantityCheck => "order_details_quantity_check",
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ConstraintKind {
        match self {
            Self::UsersNameNotNull | Self::UsersEmailNotNull | Self::ProductsNameNotNull => {
                ConstraintKind::NotNull
            }
            Self::UsersEmailKey => ConstraintKind::Unique,
            Self::OrdersUserIdFkey
            | Self::OrderDetailsOrderIdFkey
            | Self::OrderDetailsProductIdFkey => ConstraintKind::ForeignKey,
            Self::UsersEmailCheck
            | Self::ProductsPriceCheck
            | Self::OrdersStatusCheck
            | Self::OrderDetailsQuantityCheck => ConstraintKind::Check,
        }
    }

    /// Table the rule is declared on.
    #[must_use]
    pub const fn table(&self) -> EntityKind {
        match self {
            Self::UsersNameNotNull
            | Self::UsersEmailNotNull
            | Self::UsersEmailCheck
            | Self::UsersEmailKey => EntityKind::Users,
            Self::ProductsNameNotNull | Self::ProductsPriceCheck => EntityKind::Products,
            Self::OrdersUserIdFkey | Self::OrdersStatusCheck => EntityKind::Orders,
            Self::OrderDetailsOrderIdFkey
            | Self::OrderDetailsProductIdFkey
            | Self::OrderDetailsQuantityCheck => EntityKind::OrderDetails,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Constraint> for &'static str {
    fn from(rule: Constraint) -> Self {
        rule.name()
    }
}

// =============================================================================
// Candidate Rows
// =============================================================================

/// Candidate `users` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Candidate `products` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
}

impl NewProduct {
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Candidate `orders` row. `status` is free text until validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewOrder {
    pub user_id: UserId,
    pub order_date: NaiveDate,
    pub expected_delivery_date: NaiveDate,
    pub status: String,
}

impl NewOrder {
    #[must_use]
    pub fn new(
        user_id: UserId,
        order_date: NaiveDate,
        expected_delivery_date: NaiveDate,
        status: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            order_date,
            expected_delivery_date,
            status: status.into(),
        }
    }
}

/// Candidate `order_details` row. `quantity` defaults to 1 when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewOrderDetail {
    pub order_id: OrderId,
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

impl NewOrderDetail {
    #[must_use]
    pub const fn new(order_id: OrderId, product_id: ProductId, quantity: i32) -> Self {
        Self {
            order_id,
            product_id,
            quantity,
        }
    }

    /// A line item with the column default quantity.
    #[must_use]
    pub const fn single(order_id: OrderId, product_id: ProductId) -> Self {
        Self::new(order_id, product_id, Quantity::ONE.get())
    }
}

const fn default_quantity() -> i32 {
    Quantity::ONE.get()
}

/// A candidate row for any table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewRow {
    User(NewUser),
    Product(NewProduct),
    Order(NewOrder),
    OrderDetail(NewOrderDetail),
}

impl NewRow {
    /// Table the candidate targets.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::Users,
            Self::Product(_) => EntityKind::Products,
            Self::Order(_) => EntityKind::Orders,
            Self::OrderDetail(_) => EntityKind::OrderDetails,
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

fn required(value: &str, rule: Constraint, column: &str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::violation(rule, format!("{column} is required")));
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn check_user(
    store: &Store,
    candidate: &NewUser,
    id: UserId,
) -> Result<User, StoreError> {
    let name = required(&candidate.name, Constraint::UsersNameNotNull, "name")?;
    let email = Email::parse(&candidate.email).map_err(|e| match e {
        EmailError::Empty => {
            StoreError::violation(Constraint::UsersEmailNotNull, "email is required")
        }
        other => StoreError::violation(Constraint::UsersEmailCheck, other),
    })?;

    if store.users().any(|user| user.email == email) {
        return Err(StoreError::violation(
            Constraint::UsersEmailKey,
            format!("email {email} already exists"),
        ));
    }

    Ok(User { id, name, email })
}

pub(crate) fn check_product(candidate: &NewProduct, id: ProductId) -> Result<Product, StoreError> {
    let name = required(&candidate.name, Constraint::ProductsNameNotNull, "name")?;
    let price = Price::new(candidate.price)
        .map_err(|e| StoreError::violation(Constraint::ProductsPriceCheck, e))?;

    Ok(Product { id, name, price })
}

pub(crate) fn check_order(
    store: &Store,
    candidate: &NewOrder,
    id: OrderId,
) -> Result<Order, StoreError> {
    let status: OrderStatus = candidate
        .status
        .parse()
        .map_err(|e| StoreError::violation(Constraint::OrdersStatusCheck, e))?;

    if store.user(candidate.user_id).is_err() {
        return Err(StoreError::violation(
            Constraint::OrdersUserIdFkey,
            format!("user {} does not exist", candidate.user_id),
        ));
    }

    Ok(Order {
        id,
        user_id: candidate.user_id,
        order_date: candidate.order_date,
        expected_delivery_date: candidate.expected_delivery_date,
        status,
    })
}

pub(crate) fn check_order_detail(
    store: &Store,
    candidate: &NewOrderDetail,
    id: OrderDetailId,
) -> Result<OrderDetail, StoreError> {
    let quantity = Quantity::new(candidate.quantity)
        .map_err(|e| StoreError::violation(Constraint::OrderDetailsQuantityCheck, e))?;

    if store.order(candidate.order_id).is_err() {
        return Err(StoreError::violation(
            Constraint::OrderDetailsOrderIdFkey,
            format!("order {} does not exist", candidate.order_id),
        ));
    }
    if store.product(candidate.product_id).is_err() {
        return Err(StoreError::violation(
            Constraint::OrderDetailsProductIdFkey,
            format!("product {} does not exist", candidate.product_id),
        ));
    }

    Ok(OrderDetail {
        id,
        order_id: candidate.order_id,
        product_id: candidate.product_id,
        quantity,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ddl_declares_every_rule() {
        for rule in Constraint::ALL {
            assert!(DDL.contains(rule.name()), "DDL is missing {rule}");
        }
        for kind in EntityKind::ALL {
            assert!(DDL.contains(&format!("CREATE TABLE {kind} (")));
        }
    }

    #[test]
    fn test_rule_names_are_prefixed_by_table() {
        for rule in Constraint::ALL {
            assert!(rule.name().starts_with(rule.table().table_name()));
        }
    }

    #[test]
    fn test_constraint_kinds() {
        assert_eq!(Constraint::UsersEmailKey.kind(), ConstraintKind::Unique);
        assert_eq!(Constraint::OrdersUserIdFkey.kind(), ConstraintKind::ForeignKey);
        assert_eq!(Constraint::ProductsPriceCheck.kind(), ConstraintKind::Check);
        assert_eq!(Constraint::UsersNameNotNull.kind(), ConstraintKind::NotNull);
    }

    #[test]
    fn test_entity_kind_from_str() {
        assert_eq!("users".parse::<EntityKind>().unwrap(), EntityKind::Users);
        assert_eq!("order-details".parse::<EntityKind>().unwrap(), EntityKind::OrderDetails);
        assert_eq!("order_details".parse::<EntityKind>().unwrap(), EntityKind::OrderDetails);
        assert!("customers".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_order_detail_quantity_defaults_to_one() {
        let candidate: NewOrderDetail =
            serde_json::from_str(r#"{"order_id": 1, "product_id": 2}"#).unwrap();
        assert_eq!(candidate, NewOrderDetail::single(OrderId::new(1), ProductId::new(2)));
    }

    #[test]
    fn test_candidates_reject_unknown_fields() {
        let result =
            serde_json::from_str::<NewUser>(r#"{"name": "A", "email": "a@b.c", "age": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_product_rounds_price() {
        let candidate = NewProduct::new(" Mouse ", Decimal::new(19_999, 3));
        let product = check_product(&candidate, ProductId::new(1)).unwrap();
        assert_eq!(product.name, "Mouse");
        assert_eq!(product.price.to_string(), "20.00");
    }

    #[test]
    fn test_check_product_rejects_blank_name_before_price() {
        let candidate = NewProduct::new("  ", Decimal::new(-1, 0));
        let err = check_product(&candidate, ProductId::new(1)).unwrap_err();
        assert_eq!(err.rule(), Some(Constraint::ProductsNameNotNull));
    }
}
