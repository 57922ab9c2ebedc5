//! Shopwise Core - Shared domain types.
//!
//! This crate provides the validated value types used across all Shopwise
//! components:
//! - `store` - In-process relational store and report engine
//! - `server` - JSON HTTP API over the store
//! - `cli` - Command-line tools for datasets and reports
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage, no HTTP. Every
//! type here rejects invalid values at construction, so a value that exists
//! is a value the schema accepts.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for identities, emails, prices, quantities,
//!   and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
