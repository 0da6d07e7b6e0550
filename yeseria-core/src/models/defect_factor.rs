use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the `Tiempo_Fallas` sheet: the unit cost of one defective
/// piece, keyed by (piece code, mold part).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectFactor {
    pub piece_code: String,
    pub mold_part: String,
    /// Minutes lost per defective unit.
    pub time_per_unit_minutes: Decimal,
    /// Kilograms of plaster lost per defective unit.
    pub weight_per_unit_kg: Decimal,
    /// Production line this factor was measured on; also feeds the
    /// directory of lines offered for rework entries.
    pub line: Option<String>,
}
