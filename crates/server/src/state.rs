//! Application state shared across handlers.
//!
//! The [`Shop`] sits behind a `tokio::sync::RwLock`. Report handlers hold a
//! read guard for the whole computation, so each response reflects a single
//! point-in-time snapshot; writes take the exclusive guard.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use shopwise_store::{Clock, Dataset, FixedClock, Shop, StoreError, SystemClock};

use crate::config::{DatasetSource, ServerConfig};

/// Errors building the initial state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Clock used by report handlers: the system date, or a pinned one.
#[derive(Debug, Clone, Copy)]
pub enum ReportClock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl ReportClock {
    #[must_use]
    pub fn new(today: Option<NaiveDate>) -> Self {
        today.map_or(Self::System(SystemClock), |date| Self::Fixed(FixedClock::new(date)))
    }
}

impl Clock for ReportClock {
    fn today(&self) -> NaiveDate {
        match self {
            Self::System(clock) => clock.today(),
            Self::Fixed(clock) => clock.today(),
        }
    }
}

/// The shop type served by the API.
pub type ApiShop = Shop<ReportClock>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    shop: RwLock<ApiShop>,
}

impl AppState {
    /// Build state from configuration, loading the configured dataset.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if the dataset file cannot be read or its rows
    /// are rejected.
    pub async fn new(config: ServerConfig) -> Result<Self, StateError> {
        let mut shop = Shop::load_schema(ReportClock::new(config.today));

        let dataset = match &config.dataset {
            DatasetSource::Empty => None,
            DatasetSource::Sample => Some(Dataset::sample()?),
            DatasetSource::File(path) => {
                tracing::info!(path = %path.display(), "Loading dataset from file");
                let content = tokio::fs::read_to_string(path).await?;
                Some(Dataset::from_yaml(&content)?)
            }
        };
        if let Some(dataset) = dataset {
            shop.load_dataset(&dataset)?;
        }

        Ok(Self::from_shop(config, shop))
    }

    /// Wrap an already-populated shop.
    #[must_use]
    pub fn from_shop(config: ServerConfig, shop: ApiShop) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shop: RwLock::new(shop),
            }),
        }
    }

    /// Get the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Shared snapshot of the shop.
    pub async fn read(&self) -> RwLockReadGuard<'_, ApiShop> {
        self.inner.shop.read().await
    }

    /// Exclusive access to the shop.
    pub async fn write(&self) -> RwLockWriteGuard<'_, ApiShop> {
        self.inner.shop.write().await
    }
}
