//! Reference-data loader.
//!
//! A workbook is a directory holding one CSV file per named sheet. This
//! module reads the three lookup sheets into a session-scoped
//! [`ReferenceData`] value:
//!
//! | Sheet             | File                  | Columns                                              |
//! |-------------------|-----------------------|------------------------------------------------------|
//! | `Base_Produccion` | `Base_Produccion.csv` | `COD MAT`, `MOLDES/TURNO`, `PERSONAS/MOLDE`          |
//! | `Tiempo_Fallas`   | `Tiempo_Fallas.csv`   | `CODIGO`, `PARTE MOLDE`, `TIEMPO (MIN)`, `CANTIDAD KG`, `LINEA` |
//! | `Operarios`       | `Operarios.csv`       | `CÓDIGO`, `OPERARIO`                                 |
//!
//! Headers are matched by name with surrounding whitespace trimmed.
//! Operator codes stay text so leading zeros survive. A missing sheet or
//! a malformed row is a [`ReferenceError`]; callers must halt dependent
//! operations when loading fails.

use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use yeseria_core::models::{DefectFactor, MoldSpec, Operator, ReferenceData};
use yeseria_core::normalize::is_blank;

pub const SHEET_MOLDS: &str = "Base_Produccion";
pub const SHEET_DEFECTS: &str = "Tiempo_Fallas";
pub const SHEET_OPERATORS: &str = "Operarios";

/// Errors raised while loading the reference workbook.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("workbook '{0}' is not a directory")]
    WorkbookMissing(String),

    #[error("sheet '{sheet}' is missing from the workbook")]
    SheetMissing { sheet: String },

    #[error("sheet '{sheet}': {message}")]
    Malformed { sheet: String, message: String },
}

impl ReferenceError {
    fn malformed(sheet: &str, err: csv::Error) -> Self {
        Self::Malformed {
            sheet: sheet.to_string(),
            message: err.to_string(),
        }
    }
}

// ── serde rows mirroring the sheet layouts ───────────────────────────────

#[derive(Debug, Deserialize)]
struct MoldRow {
    #[serde(rename = "COD MAT")]
    code: String,
    #[serde(rename = "MOLDES/TURNO")]
    molds_per_shift: Option<Decimal>,
    #[serde(rename = "PERSONAS/MOLDE")]
    people_per_mold: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct DefectRow {
    #[serde(rename = "CODIGO")]
    piece_code: String,
    #[serde(rename = "PARTE MOLDE")]
    mold_part: String,
    #[serde(rename = "TIEMPO (MIN)")]
    time_per_unit_minutes: Option<Decimal>,
    #[serde(rename = "CANTIDAD KG")]
    weight_per_unit_kg: Option<Decimal>,
    #[serde(rename = "LINEA")]
    line: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OperatorRow {
    #[serde(rename = "CÓDIGO")]
    code: String,
    #[serde(rename = "OPERARIO")]
    name: String,
}

fn sheet_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // normalize header and cell whitespace
        .from_reader(reader)
}

/// Parses the three reference sheets and assembles the session lookup
/// tables. Key normalization happens inside [`ReferenceData::new`].
pub struct ReferenceLoader;

impl ReferenceLoader {
    /// Parses the `Base_Produccion` sheet.
    ///
    /// Rows without a mold code are skipped. A row missing either
    /// throughput column is kept with zero molds/shift so its unit time
    /// reads as absent rather than silently wrong.
    pub fn parse_molds<R: Read>(reader: R) -> Result<Vec<MoldSpec>, ReferenceError> {
        let mut specs = Vec::new();
        for result in sheet_reader(reader).deserialize() {
            let row: MoldRow = result.map_err(|e| ReferenceError::malformed(SHEET_MOLDS, e))?;
            if is_blank(&row.code) {
                continue;
            }
            let (molds_per_shift, people_per_mold) =
                match (row.molds_per_shift, row.people_per_mold) {
                    (Some(m), Some(p)) => (m, p),
                    _ => {
                        warn!(mold = %row.code, "incomplete throughput data; unit time will be absent");
                        (Decimal::ZERO, Decimal::ZERO)
                    }
                };
            specs.push(MoldSpec {
                code: row.code,
                molds_per_shift,
                people_per_mold,
            });
        }
        Ok(specs)
    }

    /// Parses the `Tiempo_Fallas` sheet. Missing unit costs default to
    /// zero; the row still contributes its part and line to the form
    /// directories.
    pub fn parse_defect_factors<R: Read>(reader: R) -> Result<Vec<DefectFactor>, ReferenceError> {
        let mut factors = Vec::new();
        for result in sheet_reader(reader).deserialize() {
            let row: DefectRow = result.map_err(|e| ReferenceError::malformed(SHEET_DEFECTS, e))?;
            factors.push(DefectFactor {
                piece_code: row.piece_code,
                mold_part: row.mold_part,
                time_per_unit_minutes: row.time_per_unit_minutes.unwrap_or(Decimal::ZERO),
                weight_per_unit_kg: row.weight_per_unit_kg.unwrap_or(Decimal::ZERO),
                line: row.line.filter(|l| !is_blank(l)),
            });
        }
        Ok(factors)
    }

    /// Parses the `Operarios` sheet. Codes are read as text, never
    /// numbers, so `007` does not collapse to `7`.
    pub fn parse_operators<R: Read>(reader: R) -> Result<Vec<Operator>, ReferenceError> {
        let mut operators = Vec::new();
        for result in sheet_reader(reader).deserialize() {
            let row: OperatorRow =
                result.map_err(|e| ReferenceError::malformed(SHEET_OPERATORS, e))?;
            if is_blank(&row.code) {
                continue;
            }
            operators.push(Operator {
                code: row.code,
                name: row.name,
            });
        }
        Ok(operators)
    }

    /// Loads all three sheets from a workbook directory.
    pub fn load_workbook(workbook: &Path) -> Result<ReferenceData, ReferenceError> {
        if !workbook.is_dir() {
            return Err(ReferenceError::WorkbookMissing(
                workbook.display().to_string(),
            ));
        }

        let molds = Self::parse_molds(open_sheet(workbook, SHEET_MOLDS)?)?;
        let defects = Self::parse_defect_factors(open_sheet(workbook, SHEET_DEFECTS)?)?;
        let operators = Self::parse_operators(open_sheet(workbook, SHEET_OPERATORS)?)?;

        let data = ReferenceData::new(molds, defects, operators);
        info!(
            molds = data.mold_count(),
            defect_factors = data.defect_factor_count(),
            operators = data.operator_count(),
            "reference data loaded"
        );
        Ok(data)
    }
}

fn open_sheet(workbook: &Path, sheet: &str) -> Result<std::fs::File, ReferenceError> {
    let path = workbook.join(format!("{sheet}.csv"));
    std::fs::File::open(&path).map_err(|_| ReferenceError::SheetMissing {
        sheet: sheet.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MOLDS_CSV: &str = "\
COD MAT,MOLDES/TURNO,PERSONAS/MOLDE
M1,10,2
M2, 16 ,1
M3,,3
,5,1
";

    const DEFECTS_CSV: &str = "\
CODIGO,PARTE MOLDE,TIEMPO (MIN),CANTIDAD KG,LINEA
P1,BASE,2,0.3,L1
P1,TAPA,1.5,,L2
";

    const OPERATORS_CSV: &str = "\
CÓDIGO,OPERARIO
007,MARIA PEREZ
101,ANA RUIZ
,IGNORED
";

    #[test]
    fn molds_parse_and_skip_blank_codes() {
        let specs = ReferenceLoader::parse_molds(MOLDS_CSV.as_bytes()).unwrap();

        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0].code, "M1");
        assert_eq!(specs[0].molds_per_shift, dec!(10));
        assert_eq!(specs[1].molds_per_shift, dec!(16)); // whitespace trimmed
    }

    #[test]
    fn mold_with_missing_throughput_gets_zero_capacity() {
        let specs = ReferenceLoader::parse_molds(MOLDS_CSV.as_bytes()).unwrap();

        assert_eq!(specs[2].code, "M3");
        assert_eq!(specs[2].molds_per_shift, Decimal::ZERO);
    }

    #[test]
    fn defect_factors_default_missing_costs_to_zero() {
        let factors = ReferenceLoader::parse_defect_factors(DEFECTS_CSV.as_bytes()).unwrap();

        assert_eq!(factors.len(), 2);
        assert_eq!(factors[0].time_per_unit_minutes, dec!(2));
        assert_eq!(factors[0].weight_per_unit_kg, dec!(0.3));
        assert_eq!(factors[1].weight_per_unit_kg, Decimal::ZERO);
        assert_eq!(factors[0].line.as_deref(), Some("L1"));
    }

    #[test]
    fn operator_codes_keep_leading_zeros() {
        let operators = ReferenceLoader::parse_operators(OPERATORS_CSV.as_bytes()).unwrap();

        assert_eq!(operators.len(), 2);
        assert_eq!(operators[0].code, "007");
        assert_eq!(operators[0].name, "MARIA PEREZ");
    }

    #[test]
    fn missing_column_is_a_malformed_sheet() {
        let result = ReferenceLoader::parse_molds("COD MAT,MOLDES/TURNO\nM1,10\n".as_bytes());

        match result {
            Err(ReferenceError::Malformed { sheet, message }) => {
                assert_eq!(sheet, SHEET_MOLDS);
                assert!(message.contains("missing field"), "got: {message}");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn bad_decimal_is_a_malformed_sheet() {
        let csv = "COD MAT,MOLDES/TURNO,PERSONAS/MOLDE\nM1,abc,2\n";

        let result = ReferenceLoader::parse_molds(csv.as_bytes());

        assert!(matches!(result, Err(ReferenceError::Malformed { .. })));
    }

    #[test]
    fn empty_sheets_yield_empty_tables() {
        let specs =
            ReferenceLoader::parse_molds("COD MAT,MOLDES/TURNO,PERSONAS/MOLDE\n".as_bytes())
                .unwrap();

        assert!(specs.is_empty());
    }
}
