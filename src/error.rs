//! Error types for the depth aggregator

use rust_decimal::Decimal;
use thiserror::Error;

use crate::grouping::Side;

/// Depth aggregator errors
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Invalid group size {input:?}: {reason}")]
    InvalidGroupSize { input: String, reason: String },

    #[error("Error fetching data from Binance: {0}")]
    FetchError(String),

    #[error("Malformed {side} level at index {index}: {reason}")]
    MalformedLevel {
        side: Side,
        index: usize,
        reason: String,
    },

    #[error("Bucket overflow: price {price} cannot be grouped by {bucket_size}")]
    BucketOverflow { price: Decimal, bucket_size: Decimal },

    #[error("Quantity overflow: bucket {price} cannot hold more than {sum}")]
    QuantityOverflow { price: Decimal, sum: Decimal },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MarketDataError {
    fn from(err: serde_json::Error) -> Self {
        MarketDataError::FetchError(format!("undecodable response body: {}", err))
    }
}

impl From<reqwest::Error> for MarketDataError {
    fn from(err: reqwest::Error) -> Self {
        MarketDataError::FetchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MarketDataError>;
