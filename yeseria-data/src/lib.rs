pub mod loader;

pub use loader::{ReferenceError, ReferenceLoader};
