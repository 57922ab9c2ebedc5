//! The operation surface: schema load, inserts, deletes, and fetches.
//!
//! [`Shop`] owns a [`Store`] and the [`Clock`] its reports read "today"
//! from. Insert operations take raw column values and return the new id or
//! the violated rule; fetch operations return report rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use shopwise_core::{OrderDetailId, OrderId, ProductId, UserId};

use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::query::{InactiveUser, RecentOrder, UndeliveredOrder};
use crate::reports::{DEFAULT_LIMIT, PriceExtreme, Reports, TopProduct, TopUser, UserOrderLine};
use crate::schema::{EntityKind, NewOrder, NewOrderDetail, NewProduct, NewRow, NewUser};
use crate::seed::{Dataset, LoadSummary};
use crate::store::Store;

/// A store plus the clock its reports use.
#[derive(Debug, Clone)]
pub struct Shop<C = SystemClock> {
    store: Store,
    clock: C,
}

impl Default for Shop<SystemClock> {
    fn default() -> Self {
        Self::load_schema(SystemClock)
    }
}

impl<C: Clock> Shop<C> {
    /// Start with four empty tables.
    #[must_use]
    pub fn load_schema(clock: C) -> Self {
        Self {
            store: Store::load_schema(),
            clock,
        }
    }

    /// Wrap an existing store.
    #[must_use]
    pub const fn with_store(store: Store, clock: C) -> Self {
        Self { store, clock }
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Report façade over the current contents.
    #[must_use]
    pub const fn reports(&self) -> Reports<'_, C> {
        Reports::new(&self.store, &self.clock)
    }

    /// Load a dataset into the store, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns the first `StoreError` hit; the store is left unchanged.
    pub fn load_dataset(&mut self, dataset: &Dataset) -> Result<LoadSummary, StoreError> {
        self.store.load(dataset)
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the row is rejected.
    pub fn insert_user(&mut self, name: &str, email: &str) -> Result<UserId, StoreError> {
        self.store.insert_user(&NewUser::new(name, email))
    }

    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the row is rejected.
    pub fn insert_product(&mut self, name: &str, price: Decimal) -> Result<ProductId, StoreError> {
        self.store.insert_product(&NewProduct::new(name, price))
    }

    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the row is rejected,
    /// including when `status` is not one of the four order statuses.
    pub fn insert_order(
        &mut self,
        user_id: UserId,
        order_date: NaiveDate,
        expected_delivery_date: NaiveDate,
        status: &str,
    ) -> Result<OrderId, StoreError> {
        self.store.insert_order(&NewOrder::new(
            user_id,
            order_date,
            expected_delivery_date,
            status,
        ))
    }

    /// `quantity` defaults to 1.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the row is rejected.
    pub fn insert_order_detail(
        &mut self,
        order_id: OrderId,
        product_id: ProductId,
        quantity: Option<i32>,
    ) -> Result<OrderDetailId, StoreError> {
        let candidate = quantity.map_or_else(
            || NewOrderDetail::single(order_id, product_id),
            |quantity| NewOrderDetail::new(order_id, product_id, quantity),
        );
        self.store.insert_order_detail(&candidate)
    }

    /// # Errors
    ///
    /// Returns `StoreError::ConstraintViolation` if the row is rejected.
    pub fn insert(&mut self, candidate: &NewRow) -> Result<i32, StoreError> {
        self.store.insert(candidate)
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or a foreign-key
    /// `StoreError::ConstraintViolation`.
    pub fn delete(&mut self, kind: EntityKind, id: i32) -> Result<(), StoreError> {
        self.store.delete(kind, id)
    }

    // -------------------------------------------------------------------------
    // Fetches
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn fetch_user_order_list(&self) -> Vec<UserOrderLine> {
        self.reports().user_order_list()
    }

    #[must_use]
    pub fn fetch_undelivered_orders(&self) -> Vec<UndeliveredOrder> {
        self.reports().undelivered_orders()
    }

    /// `limit` defaults to 5.
    #[must_use]
    pub fn fetch_recent_orders(&self, limit: Option<usize>) -> Vec<RecentOrder> {
        self.reports().recent_orders(limit.unwrap_or(DEFAULT_LIMIT))
    }

    /// `limit` defaults to 5.
    #[must_use]
    pub fn fetch_top_active_users(&self, limit: Option<usize>) -> Vec<TopUser> {
        self.reports().top_active_users(limit.unwrap_or(DEFAULT_LIMIT))
    }

    #[must_use]
    pub fn fetch_inactive_users(&self) -> Vec<InactiveUser> {
        self.reports().inactive_users()
    }

    /// `limit` defaults to 5.
    #[must_use]
    pub fn fetch_top_products(&self, limit: Option<usize>) -> Vec<TopProduct> {
        self.reports().top_products(limit.unwrap_or(DEFAULT_LIMIT))
    }

    #[must_use]
    pub fn fetch_price_extremes(&self) -> Vec<PriceExtreme> {
        self.reports().price_extremes()
    }
}
