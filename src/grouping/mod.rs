//! Grouping module
//!
//! Aggregates snapshot price levels into fixed-width price buckets and
//! derives sorted views over them.

mod bucket;
mod sort;
mod spec;

pub use bucket::{aggregate, bucket_key, PriceBuckets};
pub use sort::{sort_by_price, sort_by_quantity, OrderedView};
pub use spec::GroupSpec;

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::error::Result;
use crate::parser::DepthSnapshot;

/// Side of the order book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Bid, Side::Ask];

    /// Section title used in rendered output
    pub fn title(self) -> &'static str {
        match self {
            Side::Bid => "Bids",
            Side::Ask => "Asks",
        }
    }

    /// Best price first: highest bid, lowest ask
    pub fn best_first_ascending(self) -> bool {
        match self {
            Side::Bid => false,
            Side::Ask => true,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => f.write_str("bid"),
            Side::Ask => f.write_str("ask"),
        }
    }
}

/// One aggregated bucket: lower price bound and summed quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Both sides of a snapshot grouped with the same bucket size
#[derive(Debug, Clone)]
pub struct GroupedBook {
    spec: GroupSpec,
    bids: PriceBuckets,
    asks: PriceBuckets,
}

impl GroupedBook {
    /// Aggregate a snapshot, each side independently
    pub fn from_snapshot(snapshot: &DepthSnapshot, spec: &GroupSpec) -> Result<Self> {
        let bids = aggregate(snapshot.levels(Side::Bid), spec)?;
        let asks = aggregate(snapshot.levels(Side::Ask), spec)?;

        debug!(
            group_size = %spec.bucket_size(),
            bid_levels = snapshot.bids.len(),
            bid_buckets = bids.len(),
            ask_levels = snapshot.asks.len(),
            ask_buckets = asks.len(),
            "Snapshot grouped"
        );

        Ok(Self {
            spec: spec.clone(),
            bids,
            asks,
        })
    }

    pub fn spec(&self) -> &GroupSpec {
        &self.spec
    }

    pub fn side(&self, side: Side) -> &PriceBuckets {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }
}
