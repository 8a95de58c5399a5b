//! REST client for order book depth snapshots

use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{MarketDataError, Result};
use crate::parser::{parse_snapshot, DepthSnapshot};

/// Client for the `/depth` endpoint
pub struct DepthClient {
    client: reqwest::Client,
    rest_endpoint: String,
}

impl DepthClient {
    /// Create a client for `rest_endpoint` (e.g. "https://api.binance.com/api/v3")
    pub fn new(rest_endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarketDataError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rest_endpoint: rest_endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.rest_endpoint, config.request_timeout())
    }

    /// Fetch one order book snapshot
    pub async fn fetch_snapshot(&self, symbol: &str, limit: u32) -> Result<DepthSnapshot> {
        let url = format!("{}/depth", self.rest_endpoint);

        info!(symbol = %symbol, limit, url = %url, "Fetching order book snapshot");

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol.to_string()), ("limit", limit.to_string())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        debug!(bytes = body.len(), "Snapshot body received");

        let snapshot = parse_snapshot(&body)?;

        info!(
            symbol = %symbol,
            last_update_id = ?snapshot.last_update_id,
            bids = snapshot.bids.len(),
            asks = snapshot.asks.len(),
            "Order book snapshot received"
        );

        Ok(snapshot)
    }
}
