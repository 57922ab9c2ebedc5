//! Subcommand implementations.

pub mod check;
pub mod report;
pub mod schema;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use shopwise_store::{Dataset, StoreError};

/// Errors reading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read the dataset at `path`, or the built-in seed when `None`.
///
/// # Errors
///
/// Returns `DatasetError` if the file cannot be read or parsed.
pub fn read_dataset(path: Option<&Path>) -> Result<Dataset, DatasetError> {
    let Some(path) = path else {
        info!("Using built-in seed dataset");
        return Ok(Dataset::sample()?);
    };

    info!(path = %path.display(), "Loading dataset from file");
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Dataset::from_yaml(&content)?)
}
