//! In-memory data store.
//!
//! The [`Store`] exclusively owns every row. Each table assigns identities
//! from its own counter starting at 1; a counter only advances when a row is
//! actually committed, and ids are never handed out again, even after a
//! delete.

use std::collections::BTreeMap;

use tracing::debug;

use shopwise_core::{OrderDetailId, OrderId, ProductId, UserId};

use crate::error::StoreError;
use crate::models::{Order, OrderDetail, Product, Row, User};
use crate::schema::{
    self, Constraint, EntityKind, NewOrder, NewOrderDetail, NewProduct, NewRow, NewUser,
};

// =============================================================================
// Table
// =============================================================================

/// Rows of one table keyed by id, plus the next id to assign.
#[derive(Debug, Clone)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    /// Id the next committed row will receive.
    const fn peek_id(&self) -> i32 {
        self.next_id
    }

    fn commit(&mut self, id: i32, row: T) {
        self.rows.insert(id, row);
        self.next_id = id + 1;
    }

    fn get(&self, id: i32) -> Option<&T> {
        self.rows.get(&id)
    }

    fn remove(&mut self, id: i32) -> Option<T> {
        self.rows.remove(&id)
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

// =============================================================================
// Store
// =============================================================================

/// The four tables and their integrity rules.
///
/// Reads iterate in ascending id order, which is also insertion order.
#[derive(Debug, Clone, Default)]
pub struct Store {
    users: Table<User>,
    products: Table<Product>,
    orders: Table<Order>,
    order_details: Table<OrderDetail>,
}

impl Store {
    /// Create the four empty tables.
    #[must_use]
    pub fn load_schema() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Inserts
    // -------------------------------------------------------------------------

    /// Insert a user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the name is blank, the
    /// email is blank, malformed, or already taken.
    pub fn insert_user(&mut self, candidate: &NewUser) -> Result<UserId, StoreError> {
        let id = UserId::new(self.users.peek_id());
        let user = schema::check_user(self, candidate, id).inspect_err(log_rejection)?;
        debug!(user_id = %id, email = %user.email, "Inserted user");
        self.users.commit(id.as_i32(), user);
        Ok(id)
    }

    /// Insert a product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the name is blank or the
    /// price is negative.
    pub fn insert_product(&mut self, candidate: &NewProduct) -> Result<ProductId, StoreError> {
        let id = ProductId::new(self.products.peek_id());
        let product = schema::check_product(candidate, id).inspect_err(log_rejection)?;
        debug!(product_id = %id, price = %product.price, "Inserted product");
        self.products.commit(id.as_i32(), product);
        Ok(id)
    }

    /// Insert an order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the status is unknown or
    /// the user does not exist.
    pub fn insert_order(&mut self, candidate: &NewOrder) -> Result<OrderId, StoreError> {
        let id = OrderId::new(self.orders.peek_id());
        let order = schema::check_order(self, candidate, id).inspect_err(log_rejection)?;
        debug!(order_id = %id, user_id = %order.user_id, status = %order.status, "Inserted order");
        self.orders.commit(id.as_i32(), order);
        Ok(id)
    }

    /// Insert a line item.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the quantity is not
    /// positive or the order or product does not exist.
    pub fn insert_order_detail(
        &mut self,
        candidate: &NewOrderDetail,
    ) -> Result<OrderDetailId, StoreError> {
        let id = OrderDetailId::new(self.order_details.peek_id());
        let detail = schema::check_order_detail(self, candidate, id).inspect_err(log_rejection)?;
        debug!(
            order_detail_id = %id,
            order_id = %detail.order_id,
            product_id = %detail.product_id,
            quantity = %detail.quantity,
            "Inserted order detail"
        );
        self.order_details.commit(id.as_i32(), detail);
        Ok(id)
    }

    /// Insert a candidate into whichever table it targets, returning the raw id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` from the table-specific insert.
    pub fn insert(&mut self, candidate: &NewRow) -> Result<i32, StoreError> {
        match candidate {
            NewRow::User(row) => self.insert_user(row).map(i32::from),
            NewRow::Product(row) => self.insert_product(row).map(i32::from),
            NewRow::Order(row) => self.insert_order(row).map(i32::from),
            NewRow::OrderDetail(row) => self.insert_order_detail(row).map(i32::from),
        }
    }

    // -------------------------------------------------------------------------
    // Deletes
    // -------------------------------------------------------------------------

    /// Delete a row. Foreign keys restrict: a row with dependents stays.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the row does not exist, or
    /// `StoreError::ConstraintViolation` naming the foreign key that still
    /// references it.
    pub fn delete(&mut self, kind: EntityKind, id: i32) -> Result<(), StoreError> {
        let not_found = StoreError::NotFound { kind, id };
        match kind {
            EntityKind::Users => {
                self.users.get(id).ok_or(not_found)?;
                if self.orders.iter().any(|o| o.user_id.as_i32() == id) {
                    return Err(restricted(Constraint::OrdersUserIdFkey, kind, id));
                }
                self.users.remove(id);
            }
            EntityKind::Products => {
                self.products.get(id).ok_or(not_found)?;
                if self.order_details.iter().any(|d| d.product_id.as_i32() == id) {
                    return Err(restricted(Constraint::OrderDetailsProductIdFkey, kind, id));
                }
                self.products.remove(id);
            }
            EntityKind::Orders => {
                self.orders.get(id).ok_or(not_found)?;
                if self.order_details.iter().any(|d| d.order_id.as_i32() == id) {
                    return Err(restricted(Constraint::OrderDetailsOrderIdFkey, kind, id));
                }
                self.orders.remove(id);
            }
            EntityKind::OrderDetails => {
                self.order_details.remove(id).ok_or(not_found)?;
            }
        }
        debug!(table = %kind, id, "Deleted row");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn order_details(&self) -> impl Iterator<Item = &OrderDetail> {
        self.order_details.iter()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no user has this id.
    pub fn user(&self, id: UserId) -> Result<&User, StoreError> {
        self.users.get(id.as_i32()).ok_or(StoreError::NotFound {
            kind: EntityKind::Users,
            id: id.as_i32(),
        })
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no product has this id.
    pub fn product(&self, id: ProductId) -> Result<&Product, StoreError> {
        self.products.get(id.as_i32()).ok_or(StoreError::NotFound {
            kind: EntityKind::Products,
            id: id.as_i32(),
        })
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no order has this id.
    pub fn order(&self, id: OrderId) -> Result<&Order, StoreError> {
        self.orders.get(id.as_i32()).ok_or(StoreError::NotFound {
            kind: EntityKind::Orders,
            id: id.as_i32(),
        })
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no line item has this id.
    pub fn order_detail(&self, id: OrderDetailId) -> Result<&OrderDetail, StoreError> {
        self.order_details.get(id.as_i32()).ok_or(StoreError::NotFound {
            kind: EntityKind::OrderDetails,
            id: id.as_i32(),
        })
    }

    /// All rows of one table in id order.
    #[must_use]
    pub fn get_all(&self, kind: EntityKind) -> Vec<Row> {
        match kind {
            EntityKind::Users => self.users().cloned().map(Row::from).collect(),
            EntityKind::Products => self.products().cloned().map(Row::from).collect(),
            EntityKind::Orders => self.orders().cloned().map(Row::from).collect(),
            EntityKind::OrderDetails => self.order_details().cloned().map(Row::from).collect(),
        }
    }

    /// One row by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the table has no row with this id.
    pub fn get_by_id(&self, kind: EntityKind, id: i32) -> Result<Row, StoreError> {
        let row = match kind {
            EntityKind::Users => self.users.get(id).cloned().map(Row::from),
            EntityKind::Products => self.products.get(id).cloned().map(Row::from),
            EntityKind::Orders => self.orders.get(id).cloned().map(Row::from),
            EntityKind::OrderDetails => self.order_details.get(id).cloned().map(Row::from),
        };
        row.ok_or(StoreError::NotFound { kind, id })
    }

    /// Number of live rows in a table.
    #[must_use]
    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Users => self.users.len(),
            EntityKind::Products => self.products.len(),
            EntityKind::Orders => self.orders.len(),
            EntityKind::OrderDetails => self.order_details.len(),
        }
    }

    /// True when all four tables are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        EntityKind::ALL.into_iter().all(|kind| self.len(kind) == 0)
    }
}

fn restricted(rule: Constraint, kind: EntityKind, id: i32) -> StoreError {
    StoreError::violation(rule, format!("{kind} row {id} is still referenced"))
}

fn log_rejection(err: &StoreError) {
    debug!(error = %err, "Rejected row");
}
