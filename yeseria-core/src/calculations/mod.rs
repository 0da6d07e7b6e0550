pub mod common;
pub mod indicators;

pub use indicators::{
    DefectCost, ProductionComputation, defect_cost, defect_time_indicator, mold_unit_time,
    production_indicator, real_worked_pct, rework_indicator,
};
