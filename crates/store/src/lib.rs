//! Shopwise Store - In-process relational store and report engine.
//!
//! # Architecture
//!
//! ```text
//! shop      Shop: inserts, deletes, fetch_* operations
//!  └ reports   Reports: the named reports over a store snapshot
//!     ├ ranking   competition ranking and cutoffs
//!     └ query     joins, grouping, counts, sums
//!        └ store     Store: the four tables, identity assignment
//!           └ schema    tables, named constraints, candidate rows
//! ```
//!
//! The current date is never read implicitly: reports that need it take a
//! [`Clock`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use shopwise_store::{Dataset, FixedClock, Shop};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();
//! let mut shop = Shop::load_schema(FixedClock::new(today));
//! shop.load_dataset(&Dataset::sample().unwrap()).unwrap();
//!
//! let inactive = shop.fetch_inactive_users();
//! assert_eq!(inactive.len(), 1);
//! assert_eq!(inactive[0].name, "Eve Taylor");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod clock;
pub mod error;
pub mod models;
pub mod query;
pub mod ranking;
pub mod reports;
pub mod schema;
pub mod seed;
pub mod shop;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::StoreError;
pub use models::{Order, OrderDetail, Product, Row, User};
pub use query::{InactiveUser, RecentOrder, UndeliveredOrder};
pub use reports::{
    DEFAULT_LIMIT, OrderType, PriceExtreme, Reports, TopProduct, TopUser, UserOrderLine,
};
pub use schema::{
    Constraint, ConstraintKind, EntityKind, NewOrder, NewOrderDetail, NewProduct, NewRow, NewUser,
};
pub use seed::{Dataset, LoadSummary};
pub use shop::Shop;
pub use store::Store;
