//! Shared numeric helpers for indicator calculations.

use rust_decimal::Decimal;

/// Hours in one shift.
pub const SHIFT_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Minutes in one shift; the denominator of the defect-time and rework
/// indicators.
pub const SHIFT_MINUTES: Decimal = Decimal::from_parts(480, 0, 0, false, 0);

/// Rounds to two decimal places, half-up (away from zero at the midpoint).
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to one decimal place, half-up. The production indicator is the
/// only figure reported at this precision.
pub fn round_one_dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
