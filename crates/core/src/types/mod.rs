//! Core types for Shopwise.
//!
//! This module provides type-safe wrappers for the schema's column domains.

pub mod email;
pub mod id;
pub mod price;
pub mod quantity;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use quantity::{Quantity, QuantityError};
pub use status::{OrderStatus, StatusError};
