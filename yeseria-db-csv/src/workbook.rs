use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use yeseria_core::models::ProductionRecord;
use yeseria_core::normalize::normalize_key;
use yeseria_core::{ProductionStore, StoreError};

pub const FINAL_SHEET: &str = "FINAL";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// On-disk row of `FINAL.csv`. Headers match the log as operators know it
/// from the spreadsheet; percentages carry a trailing `%` so the file
/// stays readable when opened directly.
#[derive(Debug, Serialize, Deserialize)]
struct FinalRow {
    #[serde(rename = "Fecha")]
    recorded_at: String,
    #[serde(rename = "Molde")]
    mold_code: String,
    #[serde(rename = "Moldes/Persona")]
    molds_per_operator: Decimal,
    #[serde(rename = "Código")]
    operator_code: String,
    #[serde(rename = "Nombre")]
    operator_name: String,
    #[serde(rename = "Tiempo Usado (min)")]
    time_used_minutes: Decimal,
    #[serde(rename = "Indicador de Producción")]
    production_indicator: String,
    #[serde(rename = "Pieza")]
    defect_piece: String,
    #[serde(rename = "Parte")]
    defect_part: String,
    #[serde(rename = "Cantidad")]
    defect_quantity: u32,
    #[serde(rename = "Cantidad KG")]
    defect_weight_kg: Decimal,
    #[serde(rename = "Tiempo en Minutos")]
    defect_time_minutes: Decimal,
    #[serde(rename = "Indicador de Tiempo")]
    defect_time_indicator: String,
    #[serde(rename = "Molde Retrabajo")]
    rework_mold: String,
    #[serde(rename = "Linea Retrabajo")]
    rework_line: String,
    #[serde(rename = "Tiempo Retrabajo (minutos)")]
    rework_time_minutes: u32,
    #[serde(rename = "Indicador Retrabajo")]
    rework_indicator: String,
}

impl From<&ProductionRecord> for FinalRow {
    fn from(record: &ProductionRecord) -> Self {
        Self {
            recorded_at: record.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            mold_code: record.mold_code.clone(),
            molds_per_operator: record.molds_per_operator,
            operator_code: record.operator_code.clone(),
            operator_name: record.operator_name.clone(),
            time_used_minutes: record.time_used_minutes,
            production_indicator: format_pct(record.production_indicator_pct),
            defect_piece: record.defect_piece.clone().unwrap_or_default(),
            defect_part: record.defect_part.clone().unwrap_or_default(),
            defect_quantity: record.defect_quantity,
            defect_weight_kg: record.defect_weight_kg,
            defect_time_minutes: record.defect_time_minutes,
            defect_time_indicator: format_pct(record.defect_time_indicator_pct),
            rework_mold: record.rework_mold.clone().unwrap_or_default(),
            rework_line: record.rework_line.clone().unwrap_or_default(),
            rework_time_minutes: record.rework_time_minutes,
            rework_indicator: format_pct(record.rework_indicator_pct),
        }
    }
}

impl TryFrom<FinalRow> for ProductionRecord {
    type Error = StoreError;

    fn try_from(row: FinalRow) -> Result<Self, Self::Error> {
        Ok(ProductionRecord {
            recorded_at: parse_timestamp(&row.recorded_at)?,
            mold_code: row.mold_code,
            molds_per_operator: row.molds_per_operator,
            operator_code: row.operator_code,
            operator_name: row.operator_name,
            time_used_minutes: row.time_used_minutes,
            production_indicator_pct: parse_pct(&row.production_indicator)?,
            defect_piece: non_empty(row.defect_piece),
            defect_part: non_empty(row.defect_part),
            defect_quantity: row.defect_quantity,
            defect_weight_kg: row.defect_weight_kg,
            defect_time_minutes: row.defect_time_minutes,
            defect_time_indicator_pct: parse_pct(&row.defect_time_indicator)?,
            rework_mold: non_empty(row.rework_mold),
            rework_line: non_empty(row.rework_line),
            rework_time_minutes: row.rework_time_minutes,
            rework_indicator_pct: parse_pct(&row.rework_indicator)?,
        })
    }
}

fn format_pct(value: Decimal) -> String {
    format!("{value}%")
}

/// Tolerates both `"100.0%"` and a bare `"100.0"`, so sheets touched by
/// hand or by older exports still load.
fn parse_pct(s: &str) -> Result<Decimal, StoreError> {
    let trimmed = s.trim().trim_end_matches('%').trim();
    trimmed
        .parse::<Decimal>()
        .map_err(|e| StoreError::Parse(format!("bad percentage '{s}': {e}")))
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, StoreError> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| StoreError::Parse(format!("bad timestamp '{s}': {e}")))
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

/// [`ProductionStore`] backed by `FINAL.csv` in a workbook directory.
pub struct CsvWorkbookStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles on the sheet file.
    lock: Mutex<()>,
}

impl CsvWorkbookStore {
    /// Opens a store over `dir`, creating the directory if needed. The
    /// sheet file itself is created lazily on first append.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)
            .map_err(|e| StoreError::Io(format!("cannot create workbook '{}': {e}", dir.display())))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            lock: Mutex::new(()),
        })
    }

    fn sheet_path(&self) -> PathBuf {
        self.dir.join(format!("{FINAL_SHEET}.csv"))
    }

    fn read_all(&self) -> Result<Vec<ProductionRecord>, StoreError> {
        let path = self.sheet_path();
        let file = match std::fs::File::open(&path) {
            Ok(file) => file,
            // Never-written log reads as empty.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(format!("cannot open '{}': {e}", path.display()))),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let mut records = Vec::new();
        for result in reader.deserialize() {
            let row: FinalRow = result.map_err(|e| StoreError::Parse(e.to_string()))?;
            records.push(row.try_into()?);
        }
        Ok(records)
    }

    fn write_all(&self, records: &[ProductionRecord]) -> Result<(), StoreError> {
        let path = self.sheet_path();
        let file = std::fs::File::create(&path)
            .map_err(|e| StoreError::Io(format!("cannot write '{}': {e}", path.display())))?;

        let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(file);
        for record in records {
            writer
                .serialize(FinalRow::from(record))
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        writer.flush().map_err(|e| StoreError::Io(e.to_string()))
    }
}

#[async_trait]
impl ProductionStore for CsvWorkbookStore {
    async fn append(&self, records: Vec<ProductionRecord>) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        let mut all = self.read_all()?;
        let added = records.len();
        all.extend(records);
        self.write_all(&all)?;
        info!(added, total = all.len(), "production log updated");
        Ok(())
    }

    async fn delete_by_key(
        &self,
        recorded_at: NaiveDateTime,
        operator_code: Option<&str>,
    ) -> Result<usize, StoreError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        let all = self.read_all()?;
        let before = all.len();

        let operator_key = operator_code.map(normalize_key);
        let kept: Vec<_> = all
            .into_iter()
            .filter(|r| {
                let batch_match = r.recorded_at == recorded_at;
                let operator_match = operator_key
                    .as_ref()
                    .is_none_or(|key| normalize_key(&r.operator_code) == *key);
                !(batch_match && operator_match)
            })
            .collect();

        let removed = before - kept.len();
        if removed > 0 {
            self.write_all(&kept)?;
        }
        debug!(removed, %recorded_at, "delete by key");
        Ok(removed)
    }

    async fn query(&self) -> Result<Vec<ProductionRecord>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        let mut records = self.read_all()?;
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(records)
    }
}

fn poisoned() -> StoreError {
    StoreError::Io("workbook lock poisoned".to_string())
}
