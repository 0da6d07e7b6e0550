//! CSV loader for the operator-slot section of a submission.
//!
//! ## CSV Format
//!
//! One row per operator slot, at most five rows. Column order does not
//! matter (headers are matched by name); only `operario` is required per
//! row, the rest may be left empty.
//!
//! | Column              | Required | Type    | Notes                                  |
//! |---------------------|----------|---------|----------------------------------------|
//! | `operario`          | yes      | string  | Operator code, kept as text            |
//! | `pieza_defecto`     | no       | string  | Piece the defect report refers to      |
//! | `parte_defecto`     | no       | string  | Mold part (e.g. `BASE`, `TAPA`)        |
//! | `cantidad_defecto`  | no       | integer | Defective units; empty means `0`       |
//! | `molde_retrabajo`   | no       | string  | Mold reworked                          |
//! | `linea_retrabajo`   | no       | string  | Production line of the rework          |
//! | `minutos_retrabajo` | no       | integer | Rework minutes; empty means `0`        |
//!
//! ### Minimal example
//!
//! ```csv
//! operario
//! 007
//! 101
//! ```
//!
//! ### Full example
//!
//! ```csv
//! operario,pieza_defecto,parte_defecto,cantidad_defecto,molde_retrabajo,linea_retrabajo,minutos_retrabajo
//! 007,M1,BASE,5,,,
//! 101,,,,M2,L1,90
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use yeseria_core::OperatorSlot;
use yeseria_core::submission::MAX_OPERATOR_SLOTS;

#[derive(Debug, Deserialize)]
struct SlotRow {
    operario: String,
    #[serde(default)]
    pieza_defecto: String,
    #[serde(default)]
    parte_defecto: String,
    #[serde(default)]
    cantidad_defecto: Option<u32>,
    #[serde(default)]
    molde_retrabajo: String,
    #[serde(default)]
    linea_retrabajo: String,
    #[serde(default)]
    minutos_retrabajo: Option<u32>,
}

impl From<SlotRow> for OperatorSlot {
    fn from(row: SlotRow) -> Self {
        OperatorSlot {
            code: row.operario,
            defect_piece: row.pieza_defecto,
            defect_part: row.parte_defecto,
            defect_quantity: row.cantidad_defecto.unwrap_or(0),
            rework_mold: row.molde_retrabajo,
            rework_line: row.linea_retrabajo,
            rework_minutes: row.minutos_retrabajo.unwrap_or(0),
        }
    }
}

/// Errors that can occur while loading a slots file.
#[derive(Debug, thiserror::Error)]
pub enum SlotLoadError {
    #[error("cannot read slots file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// `operario` column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("slots file has {count} rows; the form takes at most {MAX_OPERATOR_SLOTS}")]
    TooManyRows { count: usize },
}

/// Reads operator slots from CSV. Row order becomes slot order, which is
/// the order validation reports problems in.
pub fn load_slots<R: Read>(reader: R) -> Result<Vec<OperatorSlot>, SlotLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut slots = Vec::new();
    for result in csv_reader.deserialize() {
        let row: SlotRow = result?;
        slots.push(OperatorSlot::from(row));
    }

    if slots.len() > MAX_OPERATOR_SLOTS {
        return Err(SlotLoadError::TooManyRows { count: slots.len() });
    }
    Ok(slots)
}

pub fn load_slots_file(path: &Path) -> Result<Vec<OperatorSlot>, SlotLoadError> {
    let file = std::fs::File::open(path).map_err(|source| SlotLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_slots(file)
}
