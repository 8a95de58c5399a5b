//! Configuration module for the depth aggregator
//!
//! Command-line options come first; endpoint and timeout settings fall back
//! to environment variables (optionally from a `.env` file), then defaults.

use clap::{Parser, ValueEnum};
use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{MarketDataError, Result};

pub const DEFAULT_SYMBOL: &str = "SOLUSDT";
pub const DEFAULT_LIMIT: u32 = 1000;
pub const DEFAULT_GROUP_SIZE: &str = "1";
pub const DEFAULT_REST_ENDPOINT: &str = "https://api.binance.com/api/v3";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Fetch and aggregate Binance order book data by decimal bucket size.
#[derive(Debug, Clone, Parser)]
#[command(name = "depth-aggregator", version)]
pub struct Cli {
    /// Trading pair symbol on Binance
    #[arg(long, default_value = DEFAULT_SYMBOL)]
    pub symbol: String,

    /// Number of order book levels to fetch
    #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// Decimal bucket size for prices, e.g. '0.1', '1', '2.5'
    #[arg(long, default_value = DEFAULT_GROUP_SIZE, allow_hyphen_values = true)]
    pub group_size: String,

    /// Sort key for the single-table layout
    #[arg(long, value_enum, default_value_t = SortBy::Quantity)]
    pub sort_by: SortBy,

    /// Sort direction
    #[arg(long, value_enum, default_value_t = SortDir::Desc)]
    pub sort_dir: SortDir,

    /// One table per side, or price and quantity orderings side by side
    #[arg(long, value_enum, default_value_t = Layout::Dual)]
    pub layout: Layout,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// REST API base URL (overrides REST_ENDPOINT)
    #[arg(long)]
    pub rest_endpoint: Option<String>,

    /// Log fetch progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortBy {
    Price,
    Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn is_ascending(self) -> bool {
        self == SortDir::Asc
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    Single,
    Dual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Price => f.write_str("price"),
            SortBy::Quantity => f.write_str("quantity"),
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDir::Asc => f.write_str("asc"),
            SortDir::Desc => f.write_str("desc"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Upper-cased trading symbol (e.g. "SOLUSDT")
    pub symbol: String,

    /// Depth levels requested per side
    pub limit: u32,

    /// Group size exactly as given by the user
    pub group_size: String,

    pub sort_by: SortBy,
    pub sort_dir: SortDir,
    pub layout: Layout,
    pub format: OutputFormat,

    /// REST API endpoint for snapshots
    pub rest_endpoint: String,

    /// HTTP request timeout
    pub request_timeout_ms: u64,
}

impl Config {
    /// Resolve configuration from parsed arguments and the environment
    pub fn from_cli(cli: Cli) -> Result<Self> {
        dotenvy::dotenv().ok();

        let rest_endpoint = match cli.rest_endpoint {
            Some(endpoint) => endpoint,
            None => env::var("REST_ENDPOINT").unwrap_or_else(|_| DEFAULT_REST_ENDPOINT.to_string()),
        };

        let request_timeout_ms = match env::var("REQUEST_TIMEOUT_MS") {
            Ok(raw) => raw.trim().parse().map_err(|e| {
                MarketDataError::ConfigError(format!("REQUEST_TIMEOUT_MS={:?}: {}", raw, e))
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        let symbol = cli.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(MarketDataError::ConfigError("symbol must not be empty".to_string()));
        }

        Ok(Self {
            symbol,
            limit: cli.limit,
            group_size: cli.group_size,
            sort_by: cli.sort_by,
            sort_dir: cli.sort_dir,
            layout: cli.layout,
            format: cli.format,
            rest_endpoint: rest_endpoint.trim_end_matches('/').to_string(),
            request_timeout_ms,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            limit: DEFAULT_LIMIT,
            group_size: DEFAULT_GROUP_SIZE.to_string(),
            sort_by: SortBy::Quantity,
            sort_dir: SortDir::Desc,
            layout: Layout::Dual,
            format: OutputFormat::Table,
            rest_endpoint: DEFAULT_REST_ENDPOINT.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}
