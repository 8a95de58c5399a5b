//! Price bucket aggregation
//!
//! Uses BTreeMap keyed by bucket lower bound, so price order comes for free.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::{Bucket, GroupSpec};
use crate::error::{MarketDataError, Result};
use crate::parser::PriceLevel;

/// Lower bound of the bucket containing `price`: floor(price / size) * size
pub fn bucket_key(price: Decimal, bucket_size: Decimal) -> Result<Decimal> {
    let overflow = || MarketDataError::BucketOverflow { price, bucket_size };

    let index = price.checked_div(bucket_size).ok_or_else(overflow)?.floor();
    let key = index.checked_mul(bucket_size).ok_or_else(overflow)?;

    Ok(key.normalize())
}

/// Summed quantity per bucket for one side of the book
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceBuckets {
    buckets: BTreeMap<Decimal, Decimal>,
}

impl PriceBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one level's quantity to its bucket
    pub fn add(&mut self, level: &PriceLevel, spec: &GroupSpec) -> Result<()> {
        let key = bucket_key(level.price, spec.bucket_size())?;
        let sum = self.buckets.entry(key).or_insert(Decimal::ZERO);
        *sum = sum
            .checked_add(level.quantity)
            .ok_or(MarketDataError::QuantityOverflow { price: key, sum: *sum })?;
        Ok(())
    }

    /// Add a batch of levels
    pub fn extend(&mut self, levels: &[PriceLevel], spec: &GroupSpec) -> Result<()> {
        for level in levels {
            self.add(level, spec)?;
        }
        Ok(())
    }

    /// Summed quantity of the bucket starting at `key`
    pub fn get(&self, key: Decimal) -> Option<Decimal> {
        self.buckets.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum over all buckets; fails rather than wrapping past `Decimal::MAX`
    pub fn total_quantity(&self) -> Result<Decimal> {
        self.buckets.iter().try_fold(Decimal::ZERO, |total, (price, quantity)| {
            total
                .checked_add(*quantity)
                .ok_or(MarketDataError::QuantityOverflow { price: *price, sum: total })
        })
    }

    /// Buckets in ascending price order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Bucket> + '_ {
        self.buckets.iter().map(|(price, quantity)| Bucket {
            price: *price,
            quantity: *quantity,
        })
    }
}

/// Aggregate levels into a fresh bucket map
pub fn aggregate(levels: &[PriceLevel], spec: &GroupSpec) -> Result<PriceBuckets> {
    let mut buckets = PriceBuckets::new();
    buckets.extend(levels, spec)?;
    Ok(buckets)
}
