pub mod calculations;
pub mod models;
pub mod normalize;
pub mod report;
pub mod store;
pub mod submission;
pub mod validation;

pub use models::*;
pub use store::repository::{ProductionStore, StoreError};
pub use submission::{OperatorSlot, Submission};
pub use validation::ValidationError;
