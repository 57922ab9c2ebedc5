//! Integration tests for Shopwise.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopwise-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `seed_reports` - Report results over the built-in seed dataset
//! - `constraints` - Rule enforcement across the store surface
//! - `server_api` - HTTP API against an in-process server
//!
//! The helpers below are shared by every test binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use chrono::NaiveDate;
use shopwise_server::{AppState, DatasetSource, ServerConfig};
use shopwise_store::{Dataset, FixedClock, Shop, StoreError};

/// Date the seed reports are pinned to.
#[must_use]
pub fn seed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 12).unwrap_or_default()
}

/// A shop loaded with the built-in seed dataset.
///
/// # Errors
///
/// Returns `StoreError` if the seed dataset is rejected.
pub fn seeded_shop() -> Result<Shop<FixedClock>, StoreError> {
    let mut shop = Shop::load_schema(FixedClock::new(seed_today()));
    shop.load_dataset(&Dataset::sample()?)?;
    Ok(shop)
}

/// A running server bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start a seeded server on `127.0.0.1:0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be built or the port cannot be
    /// bound.
    pub async fn start() -> Result<Self, Box<dyn std::error::Error>> {
        let config = ServerConfig {
            host: [127, 0, 0, 1].into(),
            port: 0,
            dataset: DatasetSource::Sample,
            today: Some(seed_today()),
            log_json: false,
        };
        let state = AppState::new(config).await?;
        let listener = tokio::net::TcpListener::bind(state.config().socket_addr()).await?;
        let addr = listener.local_addr()?;

        let app = shopwise_server::router(state);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Test server failed: {e}");
            }
        });

        Ok(Self {
            addr,
            client: reqwest::Client::new(),
        })
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}
