//! Parser module for Binance REST depth snapshots
//!
//! Decodes the `/depth` response body into typed price levels. Decoding
//! happens in two steps: serde checks the overall shape, then each level is
//! converted individually so a bad entry can be reported with its side and
//! position.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

use crate::error::{MarketDataError, Result};
use crate::grouping::Side;

/// Price level (price, quantity pair)
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

impl PriceLevel {
    pub fn new(price: Decimal, quantity: Decimal) -> Self {
        Self { price, quantity }
    }
}

/// Order book snapshot from REST API
#[derive(Debug, Clone, Default)]
pub struct DepthSnapshot {
    /// Last update ID, when the venue reports one
    pub last_update_id: Option<u64>,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

impl DepthSnapshot {
    /// Levels of one side
    pub fn levels(&self, side: Side) -> &[PriceLevel] {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }
}

/// Wire shape of the snapshot body
#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(rename = "lastUpdateId", default)]
    last_update_id: Option<u64>,

    #[serde(default)]
    bids: Vec<Vec<Value>>,

    #[serde(default)]
    asks: Vec<Vec<Value>>,
}

/// Parse a raw `/depth` response body
pub fn parse_snapshot(raw: &str) -> Result<DepthSnapshot> {
    let raw: RawSnapshot = serde_json::from_str(raw)?;

    Ok(DepthSnapshot {
        last_update_id: raw.last_update_id,
        bids: convert_levels(Side::Bid, raw.bids)?,
        asks: convert_levels(Side::Ask, raw.asks)?,
    })
}

fn convert_levels(side: Side, raw: Vec<Vec<Value>>) -> Result<Vec<PriceLevel>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let malformed = |reason: String| MarketDataError::MalformedLevel {
                side,
                index,
                reason,
            };

            // Entries past quantity (e.g. order counts) are ignored
            if entry.len() < 2 {
                return Err(malformed(format!(
                    "expected [price, quantity, ...], got {} field(s)",
                    entry.len()
                )));
            }

            let price = decimal_field(&entry[0]).map_err(|e| malformed(format!("price: {}", e)))?;
            let quantity =
                decimal_field(&entry[1]).map_err(|e| malformed(format!("quantity: {}", e)))?;

            Ok(PriceLevel { price, quantity })
        })
        .collect()
}

/// Binance sends decimals as strings; bare JSON numbers are tolerated
fn decimal_field(value: &Value) -> std::result::Result<Decimal, String> {
    match value {
        Value::String(s) => Decimal::from_str(s).map_err(|e| format!("{:?} ({})", s, e)),
        Value::Number(n) => {
            let s = n.to_string();
            Decimal::from_str(&s)
                .or_else(|_| Decimal::from_scientific(&s))
                .map_err(|e| format!("{} ({})", s, e))
        }
        other => Err(format!("unexpected value {}", other)),
    }
}
