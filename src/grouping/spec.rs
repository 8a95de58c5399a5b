//! Group size parsing
//!
//! The display precision comes from how the user wrote the group size, not
//! from its numeric value: "2.50" groups by 2.5 and prints one decimal.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::error::{MarketDataError, Result};

/// Largest scale `Decimal` can hold without rounding
const MAX_FRACTIONAL_DIGITS: u32 = 28;

/// Bucket size plus the number of fractional digits to print prices with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    raw: String,
    bucket_size: Decimal,
    precision: u32,
}

impl GroupSpec {
    /// Parse a user-supplied group size such as "0.1", "1" or "2.50"
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: String| MarketDataError::InvalidGroupSize {
            input: input.to_string(),
            reason,
        };

        let input = input.trim();
        let precision = surface_precision(input);
        if precision > MAX_FRACTIONAL_DIGITS && !input.contains(|c| c == 'e' || c == 'E') {
            return Err(invalid(format!(
                "more than {} fractional digits",
                MAX_FRACTIONAL_DIGITS
            )));
        }

        let bucket_size = Decimal::from_str(input)
            .or_else(|_| Decimal::from_scientific(input))
            .map_err(|e| invalid(e.to_string()))?;

        if bucket_size <= Decimal::ZERO {
            return Err(invalid("must be greater than zero".to_string()));
        }

        Ok(Self {
            raw: input.to_string(),
            bucket_size: bucket_size.normalize(),
            precision,
        })
    }

    pub fn bucket_size(&self) -> Decimal {
        self.bucket_size
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// The group size exactly as the user wrote it
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for GroupSpec {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for GroupSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Fractional digits left after stripping trailing zeros, then the point
fn surface_precision(input: &str) -> u32 {
    let stripped = input.trim_end_matches('0').trim_end_matches('.');
    match stripped.split_once('.') {
        Some((_, fraction)) => fraction.len() as u32,
        None => 0,
    }
}
