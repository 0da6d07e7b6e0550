//! Productivity indicator calculations.
//!
//! All indicators are percentages of one 8-hour shift:
//!
//! * **production** — share of the shift the mold run represents per
//!   operator, derived from the mold's unit time.
//! * **defect time** — minutes lost to defective pieces over 480.
//! * **rework** — minutes spent reworking over 480.
//! * **real worked production** — production minus both loss indicators.
//!
//! Everything here is pure; reference data is passed in explicitly.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::{SHIFT_HOURS, SHIFT_MINUTES, round_half_up, round_one_dp};
use crate::models::ReferenceData;

/// Derived figures for one mold run, shared by every record of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionComputation {
    /// Quantity divided by operator count, unrounded.
    pub molds_per_operator: Decimal,
    /// `molds_per_operator × unit_time`, in hours, unrounded.
    pub time_used_hours: Decimal,
    /// `time_used / 8h × 100`, rounded to 1 decimal.
    pub indicator_pct: Decimal,
}

/// Weight and time cost of a defect entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefectCost {
    pub weight_kg: Decimal,
    pub time_minutes: Decimal,
}

/// Hours of shift time one mold unit consumes: `8 × people_per_mold /
/// molds_per_shift`.
///
/// Returns `None` when the mold is unknown or its `molds_per_shift` is
/// zero; submissions cannot proceed without a resolvable unit time.
pub fn mold_unit_time(reference: &ReferenceData, mold_code: &str) -> Option<Decimal> {
    let spec = reference.mold_spec(mold_code)?;
    if spec.molds_per_shift.is_zero() {
        warn!(mold = %spec.code, "mold has zero molds/shift; unit time undefined");
        return None;
    }
    Some(SHIFT_HOURS * spec.people_per_mold / spec.molds_per_shift)
}

/// Splits a run of `quantity_total` molds across `operator_count` operators
/// and expresses the per-operator share as a percentage of the shift.
pub fn production_indicator(
    quantity_total: u32,
    operator_count: usize,
    unit_time_hours: Decimal,
) -> ProductionComputation {
    if operator_count == 0 {
        warn!("production indicator requested with zero operators");
        return ProductionComputation {
            molds_per_operator: Decimal::ZERO,
            time_used_hours: Decimal::ZERO,
            indicator_pct: Decimal::ZERO,
        };
    }

    let molds_per_operator = Decimal::from(quantity_total) / Decimal::from(operator_count as u64);
    let time_used_hours = molds_per_operator * unit_time_hours;
    let indicator_pct = round_one_dp(time_used_hours / SHIFT_HOURS * Decimal::ONE_HUNDRED);

    ProductionComputation {
        molds_per_operator,
        time_used_hours,
        indicator_pct,
    }
}

/// Weight and time lost to `quantity` defective pieces of (piece, part).
///
/// An unknown (piece, part) pair is a zero-cost miss, not an error; the
/// miss is logged so the factor sheet can be completed later.
pub fn defect_cost(
    reference: &ReferenceData,
    piece_code: &str,
    mold_part: &str,
    quantity: u32,
) -> DefectCost {
    match reference.defect_factor(piece_code, mold_part) {
        Some(factor) => {
            let qty = Decimal::from(quantity);
            DefectCost {
                weight_kg: round_half_up(factor.weight_per_unit_kg * qty),
                time_minutes: round_half_up(factor.time_per_unit_minutes * qty),
            }
        }
        None => {
            if quantity > 0 {
                warn!(piece = piece_code, part = mold_part, "no defect factor for piece/part");
            }
            DefectCost::default()
        }
    }
}

/// Defect minutes as a percentage of the shift, 2 decimals.
pub fn defect_time_indicator(defect_time_minutes: Decimal) -> Decimal {
    round_half_up(defect_time_minutes / SHIFT_MINUTES * Decimal::ONE_HUNDRED)
}

/// Rework minutes as a percentage of the shift, 2 decimals.
pub fn rework_indicator(rework_minutes: u32) -> Decimal {
    round_half_up(Decimal::from(rework_minutes) / SHIFT_MINUTES * Decimal::ONE_HUNDRED)
}

/// Real worked production: the production indicator minus the defect-time
/// and rework indicators, 2 decimals.
///
/// Earlier report sheets subtracted only the defect-time term; the
/// three-term form is canonical and used everywhere here.
pub fn real_worked_pct(
    production_pct: Decimal,
    defect_time_pct: Decimal,
    rework_pct: Decimal,
) -> Decimal {
    round_half_up(production_pct - defect_time_pct - rework_pct)
}
