//! Sorted views over price buckets
//!
//! Views are fresh vectors; the bucket map itself is never reordered.

use super::{Bucket, PriceBuckets};

/// Buckets in presentation order
pub type OrderedView = Vec<Bucket>;

/// Order buckets by price
pub fn sort_by_price(buckets: &PriceBuckets, ascending: bool) -> OrderedView {
    if ascending {
        buckets.iter().collect()
    } else {
        buckets.iter().rev().collect()
    }
}

/// Order buckets by summed quantity; equal quantities keep ascending price order
pub fn sort_by_quantity(buckets: &PriceBuckets, ascending: bool) -> OrderedView {
    let mut view: OrderedView = buckets.iter().collect();
    view.sort_by(|a, b| {
        let by_quantity = if ascending {
            a.quantity.cmp(&b.quantity)
        } else {
            b.quantity.cmp(&a.quantity)
        };
        by_quantity.then_with(|| a.price.cmp(&b.price))
    });
    view
}
