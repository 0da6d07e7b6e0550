use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the `Base_Produccion` sheet: the throughput profile of a mold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoldSpec {
    /// Mold code as printed on the pattern (`COD MAT`).
    pub code: String,
    /// Maximum mold-cycles one unit can produce in an 8-hour shift.
    pub molds_per_shift: Decimal,
    /// Operators needed to run one mold.
    pub people_per_mold: Decimal,
}
