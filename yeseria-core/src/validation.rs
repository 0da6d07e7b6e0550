//! Submission validation.
//!
//! A sequential rule chain: the first failing rule halts the submission
//! and surfaces a user-facing reason naming the offending field or
//! operator slot (1-based). Nothing is persisted on failure.
//!
//! The chain is pure — existing log state enters as a pre-built set of
//! (operator, day) keys so the validator never touches storage.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::{mold_unit_time, production_indicator};
use crate::models::ReferenceData;
use crate::normalize::{is_blank, normalize_key};
use crate::submission::{MAX_OPERATOR_SLOTS, Submission};

/// Ceiling for per-operator rework minutes: one full shift.
pub const MAX_REWORK_MINUTES: u32 = 480;

/// A submission rejected before reaching storage. `Display` is the
/// message shown to the operator at the terminal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the form has {count} operator slots; at most {MAX_OPERATOR_SLOTS} are allowed")]
    TooManySlots { count: usize },

    #[error("the date {date} is in the future")]
    DateInFuture { date: NaiveDate },

    #[error("a mold must be selected")]
    MoldNotSelected,

    #[error("enter at least one operator code")]
    NoOperators,

    #[error("operator code {code} appears in more than one slot")]
    DuplicateOperator { code: String },

    #[error("quantity {quantity} exceeds the mold's capacity of {capacity} per shift")]
    QuantityExceedsCapacity { quantity: u32, capacity: Decimal },

    #[error("no unit time can be derived for mold '{mold_code}'")]
    UnitTimeUnavailable { mold_code: String },

    #[error("production indicator {indicator_pct}% exceeds 100% per operator")]
    IndicatorExceedsShift { indicator_pct: Decimal },

    #[error("operator {code} already has a record for {day}")]
    OperatorAlreadyLogged { code: String, day: NaiveDate },

    #[error("operator slot {slot}: rework time exceeds 8 hours")]
    ReworkExceedsShift { slot: usize },

    #[error("operator slot {slot}: data entered without an operator code")]
    DataWithoutOperator { slot: usize },

    #[error("operator slot {slot}: defect part and quantity must be entered together")]
    IncompleteDefect { slot: usize },

    #[error("operator slot {slot}: rework mold, line and time must be entered together")]
    IncompleteRework { slot: usize },

    #[error("total quantity produced must be greater than zero")]
    ZeroQuantity,

    #[error("defective pieces ({defects}) exceed the quantity produced ({quantity})")]
    DefectsExceedQuantity { defects: u32, quantity: u32 },
}

/// Builds the duplicate-check key for one (operator code, day) pair.
/// Callers populate the `existing` set passed to [`validate_submission`]
/// with this same function so matching stays consistent.
pub fn existing_key(operator_code: &str, day: NaiveDate) -> (String, NaiveDate) {
    (normalize_key(operator_code), day)
}

/// Runs the full rule chain against one submission.
///
/// `existing` holds the (operator, day) keys already present in the log
/// (see [`existing_key`]); `today` anchors the future-date rule.
pub fn validate_submission(
    submission: &Submission,
    reference: &ReferenceData,
    existing: &HashSet<(String, NaiveDate)>,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if submission.slots.len() > MAX_OPERATOR_SLOTS {
        return Err(ValidationError::TooManySlots {
            count: submission.slots.len(),
        });
    }

    // 1. Date not in the future.
    if submission.date > today {
        return Err(ValidationError::DateInFuture {
            date: submission.date,
        });
    }

    // 2. Mold selected.
    if is_blank(&submission.mold_code) {
        return Err(ValidationError::MoldNotSelected);
    }

    // 3. At least one operator.
    let codes = submission.operator_codes();
    if codes.is_empty() {
        return Err(ValidationError::NoOperators);
    }

    // 4. No duplicate operator codes within the submission.
    let mut seen = HashSet::new();
    for code in &codes {
        if !seen.insert(normalize_key(code)) {
            return Err(ValidationError::DuplicateOperator {
                code: (*code).to_string(),
            });
        }
    }

    // 5. Quantity within the mold's per-shift capacity.
    if let Some(spec) = reference.mold_spec(&submission.mold_code) {
        if Decimal::from(submission.quantity_total) > spec.molds_per_shift {
            return Err(ValidationError::QuantityExceedsCapacity {
                quantity: submission.quantity_total,
                capacity: spec.molds_per_shift,
            });
        }
    }

    // 6. Unit time resolvable (known mold, non-zero molds/shift).
    let unit_time = mold_unit_time(reference, &submission.mold_code).ok_or_else(|| {
        ValidationError::UnitTimeUnavailable {
            mold_code: submission.mold_code.trim().to_string(),
        }
    })?;

    // 7. Production indicator capped at one shift.
    let production = production_indicator(submission.quantity_total, codes.len(), unit_time);
    if production.indicator_pct > Decimal::ONE_HUNDRED {
        return Err(ValidationError::IndicatorExceedsShift {
            indicator_pct: production.indicator_pct,
        });
    }

    // 8. One record per operator per day.
    for code in &codes {
        if existing.contains(&existing_key(code, submission.date)) {
            return Err(ValidationError::OperatorAlreadyLogged {
                code: (*code).to_string(),
                day: submission.date,
            });
        }
    }

    // 9-12. Per-slot rules, scanned in slot order.
    for (index, slot) in submission.slots.iter().enumerate() {
        let slot_number = index + 1;

        // 9. Rework bounded by one shift.
        if slot.rework_minutes > MAX_REWORK_MINUTES {
            return Err(ValidationError::ReworkExceedsShift { slot: slot_number });
        }

        if !slot.has_code() && !slot.has_data() {
            continue; // fully empty slot, silently dropped
        }

        // 10. Data requires a code; a bare code is a valid no-defect row.
        if !slot.has_code() {
            return Err(ValidationError::DataWithoutOperator { slot: slot_number });
        }

        // 11. Defect part and quantity are both-or-neither.
        let part_set = !is_blank(&slot.defect_part);
        let quantity_set = slot.defect_quantity > 0;
        if part_set != quantity_set {
            return Err(ValidationError::IncompleteDefect { slot: slot_number });
        }

        // 12. Any rework field implies all three.
        let mold_set = !is_blank(&slot.rework_mold);
        let line_set = !is_blank(&slot.rework_line);
        let time_set = slot.rework_minutes > 0;
        if mold_set && (!line_set || !time_set) {
            return Err(ValidationError::IncompleteRework { slot: slot_number });
        }
        if (line_set || time_set) && !mold_set {
            return Err(ValidationError::IncompleteRework { slot: slot_number });
        }
    }

    // 13. Non-zero total quantity.
    if submission.quantity_total == 0 {
        return Err(ValidationError::ZeroQuantity);
    }

    // 14. Defects bounded by production.
    let defects: u32 = submission
        .slots
        .iter()
        .map(|slot| slot.defect_quantity)
        .sum();
    if defects > submission.quantity_total {
        return Err(ValidationError::DefectsExceedQuantity {
            defects,
            quantity: submission.quantity_total,
        });
    }

    Ok(())
}
