//! Form submission types and record building.
//!
//! A [`Submission`] is the validated payload of one form save: the run
//! header (date, mold, total quantity) plus up to five operator slots.
//! [`build_records`] turns it into the `FINAL` rows to persist — one per
//! slot with a code; empty slots are dropped.

use chrono::{NaiveDate, NaiveDateTime};

use crate::calculations::{
    defect_cost, defect_time_indicator, mold_unit_time, production_indicator, rework_indicator,
};
use crate::calculations::common::round_half_up;
use crate::models::{ProductionRecord, ReferenceData};
use crate::normalize::is_blank;
use crate::validation::ValidationError;

/// Maximum operator slots on the form.
pub const MAX_OPERATOR_SLOTS: usize = 5;

/// Fallback operator name when a code is missing from the directory.
pub const UNKNOWN_OPERATOR: &str = "NO ENCONTRADO";

/// One operator block of the form. Empty strings mean "not entered";
/// zero quantities mean the same for the numeric fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperatorSlot {
    pub code: String,
    /// Piece the defect report refers to; in practice the mold being run.
    pub defect_piece: String,
    pub defect_part: String,
    pub defect_quantity: u32,
    pub rework_mold: String,
    pub rework_line: String,
    pub rework_minutes: u32,
}

impl OperatorSlot {
    pub fn has_code(&self) -> bool {
        !is_blank(&self.code)
    }

    /// Any defect or rework field carries data. A slot with a code and no
    /// data is a valid no-defect row; data without a code is not.
    pub fn has_data(&self) -> bool {
        !is_blank(&self.defect_part)
            || self.defect_quantity > 0
            || !is_blank(&self.rework_mold)
            || !is_blank(&self.rework_line)
            || self.rework_minutes > 0
    }

    /// The defect report is complete: part and quantity both present.
    pub fn defect_complete(&self) -> bool {
        !is_blank(&self.defect_part) && self.defect_quantity > 0
    }
}

/// One form save: header plus operator slots (at most
/// [`MAX_OPERATOR_SLOTS`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub date: NaiveDate,
    pub mold_code: String,
    pub quantity_total: u32,
    pub slots: Vec<OperatorSlot>,
}

impl Submission {
    /// Trimmed codes of the slots that name an operator, in slot order.
    pub fn operator_codes(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|slot| slot.has_code())
            .map(|slot| slot.code.trim())
            .collect()
    }
}

/// Builds the `FINAL` rows for a validated submission.
///
/// `recorded_at` is the batch timestamp every produced record shares.
/// Returns [`ValidationError::UnitTimeUnavailable`] if the mold's unit
/// time cannot be resolved — validation has already checked this, so the
/// error only fires when reference data changed between the two calls.
pub fn build_records(
    submission: &Submission,
    reference: &ReferenceData,
    recorded_at: NaiveDateTime,
) -> Result<Vec<ProductionRecord>, ValidationError> {
    let unit_time = mold_unit_time(reference, &submission.mold_code).ok_or_else(|| {
        ValidationError::UnitTimeUnavailable {
            mold_code: submission.mold_code.trim().to_string(),
        }
    })?;

    let operator_count = submission.operator_codes().len();
    let production =
        production_indicator(submission.quantity_total, operator_count, unit_time);
    let time_used_minutes = round_half_up(production.time_used_hours * rust_decimal::Decimal::from(60));
    let molds_per_operator = round_half_up(production.molds_per_operator);

    let mut records = Vec::with_capacity(operator_count);
    for slot in submission.slots.iter().filter(|slot| slot.has_code()) {
        let code = slot.code.trim().to_string();
        let operator_name = reference
            .operator(&code)
            .map(|op| op.name.clone())
            .unwrap_or_else(|| UNKNOWN_OPERATOR.to_string());

        // Incomplete defect entries never reach this point, but a complete
        // check keeps the stored piece/part pair all-or-nothing.
        let (defect_piece, defect_part, defect_quantity) = if slot.defect_complete() {
            (
                Some(slot.defect_piece.trim().to_string()),
                Some(slot.defect_part.trim().to_string()),
                slot.defect_quantity,
            )
        } else {
            (None, None, 0)
        };

        let cost = match (&defect_piece, &defect_part) {
            (Some(piece), Some(part)) => defect_cost(reference, piece, part, defect_quantity),
            _ => Default::default(),
        };

        records.push(ProductionRecord {
            recorded_at,
            mold_code: submission.mold_code.trim().to_string(),
            molds_per_operator,
            operator_code: code,
            operator_name,
            time_used_minutes,
            production_indicator_pct: production.indicator_pct,
            defect_piece,
            defect_part,
            defect_quantity,
            defect_weight_kg: cost.weight_kg,
            defect_time_minutes: cost.time_minutes,
            defect_time_indicator_pct: defect_time_indicator(cost.time_minutes),
            rework_mold: blank_to_none(&slot.rework_mold),
            rework_line: blank_to_none(&slot.rework_line),
            rework_time_minutes: slot.rework_minutes,
            rework_indicator_pct: rework_indicator(slot.rework_minutes),
        });
    }

    Ok(records)
}

fn blank_to_none(value: &str) -> Option<String> {
    if is_blank(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::{DefectFactor, MoldSpec, Operator};

    use super::*;

    fn reference() -> ReferenceData {
        ReferenceData::new(
            vec![MoldSpec {
                code: "M1".to_string(),
                molds_per_shift: dec!(10),
                people_per_mold: dec!(2),
            }],
            vec![DefectFactor {
                piece_code: "M1".to_string(),
                mold_part: "BASE".to_string(),
                time_per_unit_minutes: dec!(2),
                weight_per_unit_kg: dec!(0.3),
                line: Some("L1".to_string()),
            }],
            vec![Operator {
                code: "101".to_string(),
                name: "ANA RUIZ".to_string(),
            }],
        )
    }

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 14)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap()
    }

    fn base_submission() -> Submission {
        Submission {
            date: NaiveDate::from_ymd_opt(2026, 8, 14).unwrap(),
            mold_code: "M1".to_string(),
            quantity_total: 10,
            slots: vec![
                OperatorSlot {
                    code: "101".to_string(),
                    defect_piece: "M1".to_string(),
                    defect_part: "BASE".to_string(),
                    defect_quantity: 5,
                    rework_mold: "M1".to_string(),
                    rework_line: "L1".to_string(),
                    rework_minutes: 90,
                },
                OperatorSlot {
                    code: "999".to_string(),
                    ..Default::default()
                },
                OperatorSlot::default(),
            ],
        }
    }

    #[test]
    fn builds_one_record_per_coded_slot() {
        let records = build_records(&base_submission(), &reference(), stamp()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].operator_code, "101");
        assert_eq!(records[1].operator_code, "999");
    }

    #[test]
    fn shared_run_figures_match_indicator_math() {
        let records = build_records(&base_submission(), &reference(), stamp()).unwrap();

        // 10 molds / 2 operators × 1.6h = 8h = 480 min, 100.0%
        for record in &records {
            assert_eq!(record.molds_per_operator, dec!(5.00));
            assert_eq!(record.time_used_minutes, dec!(480.00));
            assert_eq!(record.production_indicator_pct, dec!(100.0));
            assert_eq!(record.recorded_at, stamp());
        }
    }

    #[test]
    fn defect_slot_carries_cost_and_indicator() {
        let records = build_records(&base_submission(), &reference(), stamp()).unwrap();

        let with_defect = &records[0];
        assert_eq!(with_defect.defect_piece.as_deref(), Some("M1"));
        assert_eq!(with_defect.defect_part.as_deref(), Some("BASE"));
        assert_eq!(with_defect.defect_quantity, 5);
        assert_eq!(with_defect.defect_time_minutes, dec!(10.00));
        assert_eq!(with_defect.defect_weight_kg, dec!(1.50));
        assert_eq!(with_defect.defect_time_indicator_pct, dec!(2.08));
        assert_eq!(with_defect.rework_time_minutes, 90);
        assert_eq!(with_defect.rework_indicator_pct, dec!(18.75));
    }

    #[test]
    fn plain_slot_is_a_no_defect_row() {
        let records = build_records(&base_submission(), &reference(), stamp()).unwrap();

        let plain = &records[1];
        assert_eq!(plain.defect_piece, None);
        assert_eq!(plain.defect_quantity, 0);
        assert_eq!(plain.defect_time_indicator_pct, dec!(0.00));
        assert_eq!(plain.rework_mold, None);
        assert_eq!(plain.operator_name, UNKNOWN_OPERATOR);
    }

    #[test]
    fn known_operator_resolves_to_directory_name() {
        let records = build_records(&base_submission(), &reference(), stamp()).unwrap();

        assert_eq!(records[0].operator_name, "ANA RUIZ");
    }

    #[test]
    fn unresolvable_unit_time_is_an_error() {
        let mut submission = base_submission();
        submission.mold_code = "GHOST".to_string();

        let result = build_records(&submission, &reference(), stamp());

        assert_eq!(
            result,
            Err(ValidationError::UnitTimeUnavailable {
                mold_code: "GHOST".to_string()
            })
        );
    }
}
