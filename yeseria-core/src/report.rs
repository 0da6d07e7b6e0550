//! Log filtering and the "real worked production" report.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::{SHIFT_HOURS, round_half_up};
use crate::calculations::real_worked_pct;
use crate::models::ProductionRecord;
use crate::normalize::normalize_key;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("the start date {from} is after the end date {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}

/// Filter for the report view. All criteria are optional and combined
/// with AND; the date range is inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub operator_code: Option<String>,
}

impl ReportFilter {
    fn matches(&self, record: &ProductionRecord) -> bool {
        let day = record.day();
        if self.from.is_some_and(|from| day < from) {
            return false;
        }
        if self.to.is_some_and(|to| day > to) {
            return false;
        }
        if let Some(code) = &self.operator_code {
            if normalize_key(&record.operator_code) != normalize_key(code) {
                return false;
            }
        }
        true
    }
}

/// One report line: a log record plus its derived real-worked figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub record: ProductionRecord,
    pub real_worked_pct: Decimal,
}

/// Aggregates over a filtered record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub record_count: usize,
    pub distinct_days: usize,
    /// Plain mean of the per-record real-worked percentages, 2 decimals.
    pub average_real_worked_pct: Decimal,
    /// Real hours worked over possible hours: `Σ(pct/100 × 8h) /
    /// (distinct_days × 8h) × 100`, 2 decimals.
    pub capacity_weighted_pct: Decimal,
}

/// Applies the filter and derives the per-record real-worked percentage,
/// newest-first.
pub fn build_report(
    records: &[ProductionRecord],
    filter: &ReportFilter,
) -> Result<Vec<ReportRow>, ReportError> {
    if let (Some(from), Some(to)) = (filter.from, filter.to) {
        if from > to {
            return Err(ReportError::InvertedRange { from, to });
        }
    }

    let mut rows: Vec<ReportRow> = records
        .iter()
        .filter(|record| filter.matches(record))
        .map(|record| ReportRow {
            real_worked_pct: real_worked_pct(
                record.production_indicator_pct,
                record.defect_time_indicator_pct,
                record.rework_indicator_pct,
            ),
            record: record.clone(),
        })
        .collect();

    rows.sort_by(|a, b| b.record.recorded_at.cmp(&a.record.recorded_at));
    Ok(rows)
}

/// Summary over a report; `None` when the report is empty.
pub fn summarize(rows: &[ReportRow]) -> Option<ReportSummary> {
    if rows.is_empty() {
        return None;
    }

    let count = Decimal::from(rows.len() as u64);
    let total: Decimal = rows.iter().map(|row| row.real_worked_pct).sum();

    let days: HashSet<NaiveDate> = rows.iter().map(|row| row.record.day()).collect();
    let distinct_days = days.len();

    let real_hours: Decimal = rows
        .iter()
        .map(|row| row.real_worked_pct / Decimal::ONE_HUNDRED * SHIFT_HOURS)
        .sum();
    let possible_hours = Decimal::from(distinct_days as u64) * SHIFT_HOURS;

    Some(ReportSummary {
        record_count: rows.len(),
        distinct_days,
        average_real_worked_pct: round_half_up(total / count),
        capacity_weighted_pct: round_half_up(real_hours / possible_hours * Decimal::ONE_HUNDRED),
    })
}
