use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One persisted row of the `FINAL` production log.
///
/// A single form submission produces one record per operator slot that
/// carried a code; all records of the batch share the same `recorded_at`
/// timestamp (the submitted date combined with the wall-clock save time),
/// which is what delete-by-date keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub recorded_at: NaiveDateTime,
    pub mold_code: String,
    /// Quantity produced divided by the number of operators on the run.
    pub molds_per_operator: Decimal,
    pub operator_code: String,
    pub operator_name: String,
    /// Shift time consumed by this operator's share of the run, in minutes.
    pub time_used_minutes: Decimal,
    /// Percentage of the 8-hour shift the run represents, 1 decimal.
    pub production_indicator_pct: Decimal,

    // Defect report (all-or-nothing; empty when the slot logged no defect).
    pub defect_piece: Option<String>,
    pub defect_part: Option<String>,
    pub defect_quantity: u32,
    pub defect_weight_kg: Decimal,
    pub defect_time_minutes: Decimal,
    pub defect_time_indicator_pct: Decimal,

    // Rework report.
    pub rework_mold: Option<String>,
    pub rework_line: Option<String>,
    pub rework_time_minutes: u32,
    pub rework_indicator_pct: Decimal,
}

impl ProductionRecord {
    /// The business day this record belongs to. The duplicate-submission
    /// rule is keyed on (operator_code, day).
    pub fn day(&self) -> chrono::NaiveDate {
        self.recorded_at.date()
    }

    /// Short human-readable key shown by the list/delete views.
    pub fn summary_key(&self) -> String {
        format!(
            "{} | {} | {}",
            self.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            self.mold_code,
            self.operator_code
        )
    }
}
