//! Dataset validation.
//!
//! Loads a dataset into a fresh store; any rule violation aborts with the
//! rule name and nothing is kept.

use std::path::Path;

use tracing::info;

use shopwise_store::{LoadSummary, Store};

use super::read_dataset;

/// Load a dataset into an empty store and log the per-table row counts.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a row is rejected.
pub fn run(path: Option<&Path>) -> Result<LoadSummary, Box<dyn std::error::Error>> {
    let dataset = read_dataset(path)?;
    let mut store = Store::load_schema();
    let summary = store.load(&dataset)?;

    info!(
        users = summary.users,
        products = summary.products,
        orders = summary.orders,
        order_details = summary.order_details,
        "Dataset is valid"
    );
    Ok(summary)
}
