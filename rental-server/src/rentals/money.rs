//! Price calculation using rust_decimal for precision
//!
//! All arithmetic is done in `Decimal` internally and converted to `f64`
//! only at the storage/serialization edge, so the advertised half-up
//! 2-decimal rounding is exact regardless of binary float representation.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

const MS_PER_HOUR: i64 = 3_600_000;

/// Round a monetary amount to 2 decimal places, half-up.
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Price of a rental: elapsed time against an hourly rate.
///
/// Negative elapsed time (clock skew between devices) clamps to zero, so
/// the result is never negative for a non-negative rate.
pub fn rental_price(elapsed_ms: i64, price_per_hour: f64) -> f64 {
    let elapsed = Decimal::from(elapsed_ms.max(0));
    let rate = Decimal::from_f64(price_per_hour).unwrap_or_default();
    let amount = elapsed / Decimal::from(MS_PER_HOUR) * rate;
    amount
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}
