//! Money is stored as integer cents and rendered as a decimal amount on the wire.
//!
//! Prices arrive as decimals with at most two fractional digits; anything finer
//! is rejected rather than rounded away.

use serde::Serializer;
use thiserror::Error;

/// Largest accepted price, and largest accepted single-sale total, in cents.
pub const MAX_CENTS: i64 = 1_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price must be a finite amount")]
    NotFinite,
    #[error("price exceeds maximum of {}", MAX_CENTS / 100)]
    TooLarge,
    #[error("price must have at most two decimal places")]
    SubCent,
}

/// Convert a decimal amount (e.g. `2.50`) to exact cents.
pub fn cents_from_decimal(amount: f64) -> Result<i64, PriceError> {
    if !amount.is_finite() {
        return Err(PriceError::NotFinite);
    }
    let scaled = amount * 100.0;
    let cents = scaled.round();
    if cents.abs() > MAX_CENTS as f64 {
        return Err(PriceError::TooLarge);
    }
    // Absorb binary noise such as 0.29 * 100 = 28.999999999999996.
    let tolerance = 1e-6 + cents.abs() * 1e-13;
    if (scaled - cents).abs() > tolerance {
        return Err(PriceError::SubCent);
    }
    Ok(cents as i64)
}

/// Sums and products of cents are widened to `i128`, so rendering never overflows.
pub fn cents_to_decimal(cents: impl Into<i128>) -> f64 {
    cents.into() as f64 / 100.0
}

/// `serialize_with` helper: writes a cents field as a decimal number.
pub fn serialize_cents<C, S>(cents: &C, serializer: S) -> Result<S::Ok, S::Error>
where
    C: Copy + Into<i128>,
    S: Serializer,
{
    serializer.serialize_f64(cents_to_decimal(*cents))
}
