mod defect_factor;
mod mold_spec;
mod operator;
mod production_record;
mod reference;

pub use defect_factor::DefectFactor;
pub use mold_spec::MoldSpec;
pub use operator::Operator;
pub use production_record::ProductionRecord;
pub use reference::ReferenceData;
