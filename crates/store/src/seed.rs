//! Datasets: bulk loading of candidate rows.
//!
//! A [`Dataset`] is four lists of candidate rows, read from YAML. Loading
//! inserts users, products, orders, then order details, each in list order.
//! References name the ids a fresh store will assign, so the first user in
//! the file is user 1.
//!
//! ```yaml
//! users:
//!   - { name: Alice Johnson, email: alice@example.com }
//! products:
//!   - { name: Laptop, price: "1200.00" }
//! orders:
//!   - { user_id: 1, order_date: 2024-01-10, expected_delivery_date: 2024-01-15, status: Delivered }
//! order_details:
//!   - { order_id: 1, product_id: 1, quantity: 1 }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::schema::{NewOrder, NewOrderDetail, NewProduct, NewUser};
use crate::store::Store;

/// The built-in seed dataset.
pub const SAMPLE_YAML: &str = include_str!("../data/sample.yaml");

/// Candidate rows for all four tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<NewUser>,
    #[serde(default)]
    pub products: Vec<NewProduct>,
    #[serde(default)]
    pub orders: Vec<NewOrder>,
    #[serde(default)]
    pub order_details: Vec<NewOrderDetail>,
}

impl Dataset {
    /// Parse a dataset from YAML.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Dataset` if the YAML is malformed or a field has
    /// the wrong shape. Constraint checks happen at load time, not here.
    pub fn from_yaml(yaml: &str) -> Result<Self, StoreError> {
        serde_yaml::from_str(yaml).map_err(|e| StoreError::Dataset(e.to_string()))
    }

    /// The built-in seed: 5 users, 6 products, 6 orders, 10 line items.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Dataset` if the embedded file fails to parse.
    pub fn sample() -> Result<Self, StoreError> {
        Self::from_yaml(SAMPLE_YAML)
    }
}

/// Row counts inserted by a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub users: usize,
    pub products: usize,
    pub orders: usize,
    pub order_details: usize,
}

impl Store {
    /// Insert every row of `dataset`.
    ///
    /// Rows are staged on a copy of the store and swapped in only if all of
    /// them are accepted.
    ///
    /// # Errors
    ///
    /// Returns the first `StoreError::ConstraintViolation`; the store is left
    /// exactly as it was.
    pub fn load(&mut self, dataset: &Dataset) -> Result<LoadSummary, StoreError> {
        let mut staged = self.clone();
        let summary = staged.load_rows(dataset).inspect_err(|e| {
            warn!(error = %e, "Dataset rejected, store unchanged");
        })?;
        *self = staged;

        info!(
            users = summary.users,
            products = summary.products,
            orders = summary.orders,
            order_details = summary.order_details,
            "Dataset loaded"
        );
        Ok(summary)
    }

    fn load_rows(&mut self, dataset: &Dataset) -> Result<LoadSummary, StoreError> {
        for user in &dataset.users {
            self.insert_user(user)?;
        }
        for product in &dataset.products {
            self.insert_product(product)?;
        }
        for order in &dataset.orders {
            self.insert_order(order)?;
        }
        for detail in &dataset.order_details {
            self.insert_order_detail(detail)?;
        }

        Ok(LoadSummary {
            users: dataset.users.len(),
            products: dataset.products.len(),
            orders: dataset.orders.len(),
            order_details: dataset.order_details.len(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopwise_core::UserId;

    use super::*;
    use crate::schema::{Constraint, EntityKind};

    #[test]
    fn test_sample_parses() {
        let dataset = Dataset::sample().unwrap();
        assert_eq!(dataset.users.len(), 5);
        assert_eq!(dataset.products.len(), 6);
        assert_eq!(dataset.orders.len(), 6);
        assert_eq!(dataset.order_details.len(), 10);
        assert_eq!(dataset.order_details.get(3).unwrap().quantity, 1);
    }

    #[test]
    fn test_sample_loads() {
        let mut store = Store::load_schema();
        let summary = store.load(&Dataset::sample().unwrap()).unwrap();
        assert_eq!(
            summary,
            LoadSummary {
                users: 5,
                products: 6,
                orders: 6,
                order_details: 10
            }
        );
        assert_eq!(store.len(EntityKind::OrderDetails), 10);
    }

    #[test]
    fn test_failed_load_leaves_store_unchanged() {
        let mut store = Store::load_schema();
        store.load(&Dataset::sample().unwrap()).unwrap();

        // Second load of the same users collides on email.
        let err = store.load(&Dataset::sample().unwrap()).unwrap_err();
        assert_eq!(err.rule(), Some(Constraint::UsersEmailKey));
        assert_eq!(store.len(EntityKind::Users), 5);
        assert_eq!(store.len(EntityKind::Orders), 6);
    }

    #[test]
    fn test_partial_dataset_sections_default_empty() {
        let dataset =
            Dataset::from_yaml("users:\n  - { name: Zed, email: zed@example.com }\n").unwrap();
        assert_eq!(dataset.users.len(), 1);
        assert!(dataset.orders.is_empty());

        let mut store = Store::load_schema();
        store.load(&dataset).unwrap();
        assert_eq!(store.user(UserId::new(1)).unwrap().name, "Zed");
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            Dataset::from_yaml("users: [ { name: 1 "),
            Err(StoreError::Dataset(_))
        ));
        assert!(matches!(
            Dataset::from_yaml("customers: []"),
            Err(StoreError::Dataset(_))
        ));
    }
}
