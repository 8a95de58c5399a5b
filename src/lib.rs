//! Depth Aggregator Library
//!
//! Fetches a Binance order book snapshot, groups its price levels into
//! fixed-width buckets and renders the buckets ordered by price and by
//! quantity.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod grouping;
pub mod parser;
pub mod presenter;

pub use config::{Cli, Config};
pub use error::{MarketDataError, Result};
pub use fetcher::DepthClient;
pub use grouping::{
    aggregate, bucket_key, sort_by_price, sort_by_quantity, Bucket, GroupSpec, GroupedBook,
    OrderedView, PriceBuckets, Side,
};
pub use parser::{parse_snapshot, DepthSnapshot, PriceLevel};
