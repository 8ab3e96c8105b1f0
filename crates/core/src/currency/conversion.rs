//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for settlement:
//! - Always round to a whole minor unit
//! - Midpoints round away from zero (2.5 -> 3)
//! - Round the converted expense total once, then round each share of it

use divvy_shared::types::MinorUnits;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Converts a minor-unit amount using the given exchange rate.
///
/// Returns `None` if the result does not fit in an `i64`.
#[must_use]
pub fn convert_to_minor(amount: MinorUnits, rate: Decimal) -> Option<MinorUnits> {
    scale_to_minor(amount, rate)
}

/// Computes one participant's share of an already-converted amount.
///
/// Returns `None` if the result does not fit in an `i64`.
#[must_use]
pub fn apportion(amount: MinorUnits, share_ratio: Decimal) -> Option<MinorUnits> {
    scale_to_minor(amount, share_ratio)
}

fn scale_to_minor(amount: MinorUnits, factor: Decimal) -> Option<MinorUnits> {
    Decimal::from(amount.get())
        .checked_mul(factor)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .map(MinorUnits::new)
}
