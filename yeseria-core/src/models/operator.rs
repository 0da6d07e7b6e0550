use serde::{Deserialize, Serialize};

/// One row of the `Operarios` sheet. Codes are text so that `007` and `7`
/// stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub code: String,
    pub name: String,
}
