//! Plain-text rendering for the list, delete and report views.

use rust_decimal::Decimal;

use yeseria_core::models::ProductionRecord;
use yeseria_core::report::{ReportRow, ReportSummary};

fn pct(value: Decimal) -> String {
    format!("{value}%")
}

fn dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// One line per record: timestamp, mold, operator, the three indicators.
pub fn log_table(records: &[ProductionRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<19}  {:<10}  {:<8}  {:<20}  {:>10}  {:>8}  {:>8}\n",
        "Fecha", "Molde", "Código", "Nombre", "Producción", "Defectos", "Retrab."
    ));
    for record in records {
        out.push_str(&format!(
            "{:<19}  {:<10}  {:<8}  {:<20}  {:>10}  {:>8}  {:>8}\n",
            record.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            record.mold_code,
            record.operator_code,
            record.operator_name,
            pct(record.production_indicator_pct),
            pct(record.defect_time_indicator_pct),
            pct(record.rework_indicator_pct),
        ));
    }
    out
}

/// Detail block for a freshly saved batch, one record per section.
pub fn batch_details(records: &[ProductionRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!("{}\n", record.summary_key()));
        out.push_str(&format!(
            "  {} ({}), {} moldes/persona, {} min usados, producción {}\n",
            record.operator_name,
            record.operator_code,
            record.molds_per_operator,
            record.time_used_minutes,
            pct(record.production_indicator_pct),
        ));
        if let (Some(piece), Some(part)) = (&record.defect_piece, &record.defect_part) {
            out.push_str(&format!(
                "  defectos: {} × {}/{} = {} kg, {} min, {}\n",
                record.defect_quantity,
                piece,
                part,
                record.defect_weight_kg,
                record.defect_time_minutes,
                pct(record.defect_time_indicator_pct),
            ));
        }
        if record.rework_mold.is_some() {
            out.push_str(&format!(
                "  retrabajo: {} / {}, {} min, {}\n",
                dash(&record.rework_mold),
                dash(&record.rework_line),
                record.rework_time_minutes,
                pct(record.rework_indicator_pct),
            ));
        }
    }
    out
}

/// Report rows with the derived real-worked column.
pub fn report_table(rows: &[ReportRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<19}  {:<10}  {:<8}  {:>10}  {:>12}\n",
        "Fecha", "Molde", "Código", "Producción", "Real Trab."
    ));
    for row in rows {
        out.push_str(&format!(
            "{:<19}  {:<10}  {:<8}  {:>10}  {:>12}\n",
            row.record.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            row.record.mold_code,
            row.record.operator_code,
            pct(row.record.production_indicator_pct),
            pct(row.real_worked_pct),
        ));
    }
    out
}

pub fn summary_block(summary: &ReportSummary) -> String {
    format!(
        "registros: {}\ndías distintos: {}\npromedio real trabajado: {}\ncapacidad aprovechada: {}\n",
        summary.record_count,
        summary.distinct_days,
        pct(summary.average_real_worked_pct),
        pct(summary.capacity_weighted_pct),
    )
}
